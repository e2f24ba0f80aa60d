//! Ingredient Routes

use axum::{
    Router,
    routing::{delete, get},
};

use crate::api::app_state::AppState;
use crate::api::handlers::ingredient_handler::*;

/// 创建食材路由器
pub fn create_ingredient_router() -> Router<AppState> {
    Router::new()
        .route("/ingredients", get(list_ingredients).post(create_ingredient))
        .route("/ingredients/:id", delete(delete_ingredient))
}
