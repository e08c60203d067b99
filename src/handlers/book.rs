//! Book routes: POST/GET on the collection, GET/PATCH/DELETE by id.

use crate::error::{AppError, ErrorEnvelope};
use crate::extract::{parse_id, ValidatedJson};
use crate::models::book::{Book, CreateBook, UpdateBook};
use crate::service;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    post,
    path = "/books",
    tag = "book",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Validation failure", body = ErrorEnvelope),
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateBook>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = service::book::create(&state.pool, input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    get,
    path = "/books",
    tag = "book",
    responses((status = 200, description = "All books, newest first", body = [Book])),
)]
pub async fn find_all(State(state): State<AppState>) -> Result<Json<Vec<Book>>, AppError> {
    let books = service::book::find_all(&state.pool).await?;
    Ok(Json(books))
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "book",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "No such book", body = ErrorEnvelope),
    ),
)]
pub async fn find_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id)?;
    let book = service::book::find_one(&state.pool, id).await?;
    Ok(Json(book))
}

#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "book",
    params(("id" = i32, Path, description = "Book id")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Updated book", body = Book),
        (status = 400, description = "Validation failure", body = ErrorEnvelope),
        (status = 404, description = "No such book", body = ErrorEnvelope),
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateBook>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id)?;
    let book = service::book::update(&state.pool, id, input).await?;
    Ok(Json(book))
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "book",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "No such book", body = ErrorEnvelope),
    ),
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    service::book::remove(&state.pool, id).await?;
    Ok(StatusCode::OK)
}
