//! Document persistence against the `document` table.

use crate::error::AppError;
use crate::models::document::{CreateDocument, Document, UpdateDocument};
use sqlx::PgPool;

pub async fn create(pool: &PgPool, input: CreateDocument) -> Result<Document, AppError> {
    let document = sqlx::query_as::<_, Document>(
        r#"
        INSERT INTO document ("name", "type", created_by_id, updated_by_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, now(), now())
        RETURNING id, "name", "type", created_by_id, updated_by_id, created_at, updated_at
        "#,
    )
    .bind(&input.name)
    .bind(&input.type_)
    .bind(input.created_by_id)
    .bind(input.updated_by_id)
    .fetch_one(pool)
    .await?;
    Ok(document)
}

pub async fn find_all(pool: &PgPool) -> Result<Vec<Document>, AppError> {
    let documents = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, "name", "type", created_by_id, updated_by_id, created_at, updated_at
        FROM document
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(documents)
}

pub async fn find_one(pool: &PgPool, id: i32) -> Result<Document, AppError> {
    sqlx::query_as::<_, Document>(
        r#"
        SELECT id, "name", "type", created_by_id, updated_by_id, created_at, updated_at
        FROM document
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Document with ID {id} not found")))
}

/// Load-then-merge, whole-record persist. Last write wins.
pub async fn update(pool: &PgPool, id: i32, input: UpdateDocument) -> Result<Document, AppError> {
    let current = find_one(pool, id).await?;
    let name = input.name.or(current.name);
    let type_ = input.type_.or(current.type_);
    let created_by_id = input.created_by_id.or(current.created_by_id);
    let updated_by_id = input.updated_by_id.or(current.updated_by_id);
    let document = sqlx::query_as::<_, Document>(
        r#"
        UPDATE document
        SET "name" = $1, "type" = $2, created_by_id = $3, updated_by_id = $4, updated_at = now()
        WHERE id = $5
        RETURNING id, "name", "type", created_by_id, updated_by_id, created_at, updated_at
        "#,
    )
    .bind(&name)
    .bind(&type_)
    .bind(created_by_id)
    .bind(updated_by_id)
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(document)
}

pub async fn remove(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let document = find_one(pool, id).await?;
    sqlx::query("DELETE FROM document WHERE id = $1")
        .bind(document.id)
        .execute(pool)
        .await?;
    Ok(())
}
