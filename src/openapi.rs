//! Generated API documentation, derived from the route and DTO declarations.

use crate::error::ErrorEnvelope;
use crate::models::book::{Book, CreateBook, UpdateBook};
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::document::{CreateDocument, Document, UpdateDocument};
use utoipa::openapi::Server;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tedly API",
        description = "The Tedly API documentation",
        version = "1.0"
    ),
    paths(
        crate::handlers::category::create,
        crate::handlers::category::find_all,
        crate::handlers::category::find_one,
        crate::handlers::category::update,
        crate::handlers::category::remove,
        crate::handlers::document::create,
        crate::handlers::document::find_all,
        crate::handlers::document::find_one,
        crate::handlers::document::update,
        crate::handlers::document::remove,
        crate::handlers::book::create,
        crate::handlers::book::find_all,
        crate::handlers::book::find_one,
        crate::handlers::book::update,
        crate::handlers::book::remove,
    ),
    components(schemas(
        Category,
        CreateCategory,
        UpdateCategory,
        Document,
        CreateDocument,
        UpdateDocument,
        Book,
        CreateBook,
        UpdateBook,
        ErrorEnvelope,
    )),
    tags(
        (name = "category", description = "Category management"),
        (name = "document", description = "Document management"),
        (name = "book", description = "Book management"),
    )
)]
pub struct ApiDoc;

/// The document with the advertised server set from `BASE_URL`.
pub fn openapi_with_server(base_url: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(base_url)]);
    doc
}
