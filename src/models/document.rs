//! Document: a named record with a free-form type and untyped creator ids.
//!
//! `created_by_id`/`updated_by_id` are plain integers with no referential
//! check against any other table.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Document {
    pub id: i32,
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub type_: Option<String>,
    pub created_by_id: Option<i32>,
    pub updated_by_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// No field is strictly required on create.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateDocument {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub created_by_id: Option<i32>,
    pub updated_by_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateDocument {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub created_by_id: Option<i32>,
    pub updated_by_id: Option<i32>,
}
