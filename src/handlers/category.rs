//! Category routes: POST/GET on the collection, GET/PATCH/DELETE by id.

use crate::error::{AppError, ErrorEnvelope};
use crate::extract::{parse_id, ValidatedJson};
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::service;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    post,
    path = "/categories",
    tag = "category",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation failure", body = ErrorEnvelope),
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = service::category::create(&state.pool, input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "category",
    responses((status = 200, description = "All categories, newest first", body = [Category])),
)]
pub async fn find_all(State(state): State<AppState>) -> Result<Json<Vec<Category>>, AppError> {
    let categories = service::category::find_all(&state.pool).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "category",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = Category),
        (status = 404, description = "No such category", body = ErrorEnvelope),
    ),
)]
pub async fn find_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Category>, AppError> {
    let id = parse_id(&id)?;
    let category = service::category::find_one(&state.pool, id).await?;
    Ok(Json(category))
}

#[utoipa::path(
    patch,
    path = "/categories/{id}",
    tag = "category",
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Updated category", body = Category),
        (status = 400, description = "Validation failure", body = ErrorEnvelope),
        (status = 404, description = "No such category", body = ErrorEnvelope),
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> Result<Json<Category>, AppError> {
    let id = parse_id(&id)?;
    let category = service::category::update(&state.pool, id, input).await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "category",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "No such category", body = ErrorEnvelope),
    ),
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    service::category::remove(&state.pool, id).await?;
    Ok(StatusCode::OK)
}
