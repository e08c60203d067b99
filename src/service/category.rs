//! Category persistence against the `category` table.

use crate::error::AppError;
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use sqlx::PgPool;

pub async fn create(pool: &PgPool, input: CreateCategory) -> Result<Category, AppError> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO category ("name", entity, created_at, updated_at)
        VALUES ($1, $2, now(), now())
        RETURNING id, "name", entity, created_at, updated_at
        "#,
    )
    .bind(&input.name)
    .bind(&input.entity)
    .fetch_one(pool)
    .await?;
    Ok(category)
}

/// Every row, newest first. Unbounded by design: no pagination on this API.
pub async fn find_all(pool: &PgPool) -> Result<Vec<Category>, AppError> {
    let categories = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, "name", entity, created_at, updated_at
        FROM category
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn find_one(pool: &PgPool, id: i32) -> Result<Category, AppError> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, "name", entity, created_at, updated_at
        FROM category
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Category with ID {id} not found")))
}

/// Load-then-merge: fields absent from the input keep their stored values and
/// the whole record is written back. Last write wins; there is no
/// optimistic-concurrency check.
pub async fn update(pool: &PgPool, id: i32, input: UpdateCategory) -> Result<Category, AppError> {
    let current = find_one(pool, id).await?;
    let name = input.name.unwrap_or(current.name);
    let entity = input.entity.or(current.entity);
    let category = sqlx::query_as::<_, Category>(
        r#"
        UPDATE category
        SET "name" = $1, entity = $2, updated_at = now()
        WHERE id = $3
        RETURNING id, "name", entity, created_at, updated_at
        "#,
    )
    .bind(&name)
    .bind(&entity)
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(category)
}

/// Load-then-delete; signals not-found when the id has no row.
pub async fn remove(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let category = find_one(pool, id).await?;
    sqlx::query("DELETE FROM category WHERE id = $1")
        .bind(category.id)
        .execute(pool)
        .await?;
    Ok(())
}
