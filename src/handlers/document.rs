//! Document routes: POST/GET on the collection, GET/PATCH/DELETE by id.

use crate::error::{AppError, ErrorEnvelope};
use crate::extract::{parse_id, ValidatedJson};
use crate::models::document::{CreateDocument, Document, UpdateDocument};
use crate::service;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    post,
    path = "/documents",
    tag = "document",
    request_body = CreateDocument,
    responses(
        (status = 201, description = "Document created", body = Document),
        (status = 400, description = "Validation failure", body = ErrorEnvelope),
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateDocument>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let document = service::document::create(&state.pool, input).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

#[utoipa::path(
    get,
    path = "/documents",
    tag = "document",
    responses((status = 200, description = "All documents, newest first", body = [Document])),
)]
pub async fn find_all(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    let documents = service::document::find_all(&state.pool).await?;
    Ok(Json(documents))
}

#[utoipa::path(
    get,
    path = "/documents/{id}",
    tag = "document",
    params(("id" = i32, Path, description = "Document id")),
    responses(
        (status = 200, description = "The document", body = Document),
        (status = 404, description = "No such document", body = ErrorEnvelope),
    ),
)]
pub async fn find_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let id = parse_id(&id)?;
    let document = service::document::find_one(&state.pool, id).await?;
    Ok(Json(document))
}

#[utoipa::path(
    patch,
    path = "/documents/{id}",
    tag = "document",
    params(("id" = i32, Path, description = "Document id")),
    request_body = UpdateDocument,
    responses(
        (status = 200, description = "Updated document", body = Document),
        (status = 400, description = "Validation failure", body = ErrorEnvelope),
        (status = 404, description = "No such document", body = ErrorEnvelope),
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateDocument>,
) -> Result<Json<Document>, AppError> {
    let id = parse_id(&id)?;
    let document = service::document::update(&state.pool, id, input).await?;
    Ok(Json(document))
}

#[utoipa::path(
    delete,
    path = "/documents/{id}",
    tag = "document",
    params(("id" = i32, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document deleted"),
        (status = 404, description = "No such document", body = ErrorEnvelope),
    ),
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    service::document::remove(&state.pool, id).await?;
    Ok(StatusCode::OK)
}
