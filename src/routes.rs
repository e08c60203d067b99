//! Route table: five verbs per resource plus common operational routes,
//! wrapped in the global error normalizer and request tracing.

use crate::handlers::{book, category, common, document};
use crate::state::AppState;
use axum::routing::get;
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(common::routes(state.clone()))
        .merge(resource_routes(state))
        .layer(middleware::from_fn(crate::error::normalize_errors))
        .layer(TraceLayer::new_for_http())
}

fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(category::find_all).post(category::create))
        .route(
            "/categories/:id",
            get(category::find_one)
                .patch(category::update)
                .delete(category::remove),
        )
        .route("/documents", get(document::find_all).post(document::create))
        .route(
            "/documents/:id",
            get(document::find_one)
                .patch(document::update)
                .delete(document::remove),
        )
        .route("/books", get(book::find_all).post(book::create))
        .route(
            "/books/:id",
            get(book::find_one).patch(book::update).delete(book::remove),
        )
        .with_state(state)
}
