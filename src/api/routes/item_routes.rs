//! Item Routes

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::api::app_state::AppState;
use crate::api::handlers::item_handler::*;

/// 创建菜品路由器
pub fn create_item_router() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items))
        .route("/items", post(create_item))
        .route("/items/:id", get(get_item))
        .route("/items/:id", put(update_item))
        .route("/items/:id", delete(delete_item))
}
