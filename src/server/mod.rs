//! The HTTP surface.
//!
//! Every route answers with JSON, errors are rendered by
//! [`Error`](crate::error::Error)'s `IntoResponse` implementation.
use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{category::Categories, upstream::Upstream};

mod client_ip;
mod handlers;

pub use self::client_ip::ClientIp;

/// Shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Upstream,
    pub categories: Categories,
}

impl AppState {
    pub fn new(upstream: Upstream) -> Self {
        let categories = Categories::new(upstream.clone());
        Self {
            upstream,
            categories,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/", get(handlers::banner))
        .route("/search", get(handlers::search))
        .route("/items/{id}", get(handlers::item))
        .route("/items/{id}/pictures", get(handlers::item_pictures))
        .route("/items/{id}/description", get(handlers::item_description))
        .route("/categories", get(handlers::categories))
        .route("/categories/{id}", get(handlers::category))
        .route("/categories/{id}/children", get(handlers::category_children))
        .route("/categories/{id}/parents", get(handlers::category_parents))
        .route("/categories/{id}/siblings", get(handlers::category_siblings))
        .route(
            "/categories/{id}/conditions",
            get(handlers::category_conditions),
        )
        .route("/ip", get(handlers::ip))
        .route("/time", get(handlers::time))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
