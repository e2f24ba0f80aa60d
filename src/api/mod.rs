//! API 模块
//!
//! 提供 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::observability::metrics_middleware;
use crate::security::middleware::{
    cors_layer, request_id_middleware, security_headers_middleware,
};
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .merge(routes::menu_routes::create_menu_router())
        .merge(routes::item_routes::create_item_router())
        .merge(routes::ingredient_routes::create_ingredient_router());

    let mut router = Router::new()
        .nest("/api/v1", api)
        // Add security headers middleware to all routes
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn_with_state(
            app_state.metrics.clone(),
            metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors_layer(cors_origins) {
        router = router.layer(cors);
    }

    router.with_state(app_state)
}
