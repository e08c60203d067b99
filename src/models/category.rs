//! Category: a named grouping with a free-form entity tag.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A `category` row. Responses serialize the row exactly, no field excluded.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub entity: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    pub entity: String,
}

/// Partial update: absent fields keep their stored values.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateCategory {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,
    pub entity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_requires_name_and_entity() {
        let result: Result<CreateCategory, _> =
            serde_json::from_str(r#"{"entity": "test-entity"}"#);
        assert!(result.is_err());

        let body: CreateCategory =
            serde_json::from_str(r#"{"name": "Fiction", "entity": "book"}"#).unwrap();
        assert_eq!(body.name, "Fiction");
        assert!(body.validate().is_ok());
    }

    #[test]
    fn empty_name_fails_validation() {
        let body: CreateCategory =
            serde_json::from_str(r#"{"name": "", "entity": "book"}"#).unwrap();
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<CreateCategory, _> =
            serde_json::from_str(r#"{"name": "Fiction", "entity": "book", "color": "red"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_allows_partial_bodies_but_not_empty_name() {
        let body: UpdateCategory = serde_json::from_str(r#"{"entity": "tag"}"#).unwrap();
        assert!(body.name.is_none());
        assert!(body.validate().is_ok());

        let body: UpdateCategory = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(body.validate().is_err());
    }
}
