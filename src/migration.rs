//! Schema migrations: ordered, timestamp-named scripts applied sequentially
//! and tracked by name in a bookkeeping table.

use crate::error::AppError;
use sqlx::PgPool;
use std::collections::HashSet;

pub struct Migration {
    pub name: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

/// All known migrations, in ascending name order. Down bodies are empty:
/// rollback is unsupported for these tables.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "2025-11-14-111418_create_category_table",
        up: r#"
            create table category (
              id int GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
              "name" varchar(255) not null,
              entity varchar(255),
              created_at timestamp(6) NOT NULL DEFAULT now(),
              updated_at timestamp(6) NOT NULL DEFAULT now()
            )
        "#,
        down: "",
    },
    Migration {
        name: "2025-11-15-110011_create_document_table",
        up: r#"
            create table document (
              id int GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
              "name" varchar(255) null,
              "type" varchar(255) null,
              created_at timestamp(6) NOT NULL DEFAULT now(),
              updated_at timestamp(6) NOT NULL DEFAULT now(),
              created_by_id int4 null,
              updated_by_id int4 null
            )
        "#,
        down: "",
    },
    Migration {
        name: "2025-11-17-110011_create_book_table",
        up: r#"
            create table book (
              id int GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
              title varchar(255) null,
              description text null,
              "name" varchar(255) null,
              created_at timestamp(6) null,
              updated_at timestamp(6) null
            )
        "#,
        down: "",
    },
];

const BOOKKEEPING_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS migrations (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL UNIQUE,
        migration_time TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

async fn ensure_bookkeeping_table(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(BOOKKEEPING_DDL).execute(pool).await?;
    Ok(())
}

async fn applied_names(pool: &PgPool) -> Result<HashSet<String>, AppError> {
    let names = sqlx::query_scalar::<_, String>("SELECT name FROM migrations")
        .fetch_all(pool)
        .await?;
    Ok(names.into_iter().collect())
}

/// Migrations not yet recorded, in ascending name order.
pub fn pending<'a>(all: &'a [Migration], applied: &HashSet<String>) -> Vec<&'a Migration> {
    let mut out: Vec<&Migration> = all.iter().filter(|m| !applied.contains(m.name)).collect();
    out.sort_by_key(|m| m.name);
    out
}

/// Apply every pending migration sequentially, recording each by name.
/// A failing script aborts the run and propagates; already-applied scripts
/// stay recorded.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    ensure_bookkeeping_table(pool).await?;
    let applied = applied_names(pool).await?;
    for migration in pending(MIGRATIONS, &applied) {
        tracing::info!(migration = migration.name, "applying migration");
        sqlx::raw_sql(migration.up).execute(pool).await?;
        sqlx::query("INSERT INTO migrations (name) VALUES ($1)")
            .bind(migration.name)
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Revert the most recently applied migration: run its down script when one
/// has a body (none currently do) and unrecord the name. Returns the reverted
/// name, or `None` when nothing has been applied.
pub async fn rollback_last(pool: &PgPool) -> Result<Option<&'static str>, AppError> {
    ensure_bookkeeping_table(pool).await?;
    let last: Option<String> =
        sqlx::query_scalar("SELECT name FROM migrations ORDER BY id DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;
    let Some(last) = last else {
        return Ok(None);
    };
    let Some(migration) = MIGRATIONS.iter().find(|m| m.name == last) else {
        return Err(AppError::Config(format!("unknown migration recorded: {last}")));
    };
    if !migration.down.trim().is_empty() {
        sqlx::raw_sql(migration.down).execute(pool).await?;
    }
    sqlx::query("DELETE FROM migrations WHERE name = $1")
        .bind(migration.name)
        .execute(pool)
        .await?;
    Ok(Some(migration.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn migration_names_are_unique_and_ascending() {
        let names: Vec<&str> = MIGRATIONS.iter().map(|m| m.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn down_bodies_are_empty() {
        for migration in MIGRATIONS {
            assert!(migration.down.trim().is_empty(), "{} has a down body", migration.name);
        }
    }

    #[test]
    fn pending_skips_applied_and_keeps_order() {
        let applied: HashSet<String> =
            ["2025-11-15-110011_create_document_table".to_string()].into();
        let names: Vec<&str> = pending(MIGRATIONS, &applied).iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            vec![
                "2025-11-14-111418_create_category_table",
                "2025-11-17-110011_create_book_table",
            ]
        );
    }

    #[test]
    fn pending_returns_everything_on_fresh_database() {
        let names: Vec<&str> = pending(MIGRATIONS, &HashSet::new()).iter().map(|m| m.name).collect();
        assert_eq!(names.len(), MIGRATIONS.len());
        assert_eq!(names[0], "2025-11-14-111418_create_category_table");
    }

    #[test]
    fn pending_is_empty_when_all_applied() {
        let applied: HashSet<String> = MIGRATIONS.iter().map(|m| m.name.to_string()).collect();
        assert!(pending(MIGRATIONS, &applied).is_empty());
    }
}
