//! Tedly: CRUD REST backend for categories, documents, and books.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;

pub use config::AppConfig;
pub use error::{AppError, ErrorEnvelope};
pub use migration::apply_migrations;
pub use routes::app_router;
pub use state::AppState;
