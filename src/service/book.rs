//! Book persistence against the `book` table.
//!
//! The `book` DDL declares no timestamp defaults, so inserts and updates set
//! them explicitly with `now()`.

use crate::error::AppError;
use crate::models::book::{Book, CreateBook, UpdateBook};
use sqlx::PgPool;

pub async fn create(pool: &PgPool, input: CreateBook) -> Result<Book, AppError> {
    let book = sqlx::query_as::<_, Book>(
        r#"
        INSERT INTO book (title, description, "name", created_at, updated_at)
        VALUES ($1, $2, $3, now(), now())
        RETURNING id, title, description, "name", created_at, updated_at
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.name)
    .fetch_one(pool)
    .await?;
    Ok(book)
}

pub async fn find_all(pool: &PgPool) -> Result<Vec<Book>, AppError> {
    let books = sqlx::query_as::<_, Book>(
        r#"
        SELECT id, title, description, "name", created_at, updated_at
        FROM book
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(books)
}

pub async fn find_one(pool: &PgPool, id: i32) -> Result<Book, AppError> {
    sqlx::query_as::<_, Book>(
        r#"
        SELECT id, title, description, "name", created_at, updated_at
        FROM book
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Book with ID {id} not found")))
}

/// Load-then-merge, whole-record persist. Last write wins.
pub async fn update(pool: &PgPool, id: i32, input: UpdateBook) -> Result<Book, AppError> {
    let current = find_one(pool, id).await?;
    let title = input.title.or(current.title);
    let description = input.description.or(current.description);
    let name = input.name.or(current.name);
    let book = sqlx::query_as::<_, Book>(
        r#"
        UPDATE book
        SET title = $1, description = $2, "name" = $3, updated_at = now()
        WHERE id = $4
        RETURNING id, title, description, "name", created_at, updated_at
        "#,
    )
    .bind(&title)
    .bind(&description)
    .bind(&name)
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(book)
}

pub async fn remove(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let book = find_one(pool, id).await?;
    sqlx::query("DELETE FROM book WHERE id = $1")
        .bind(book.id)
        .execute(pool)
        .await?;
    Ok(())
}
