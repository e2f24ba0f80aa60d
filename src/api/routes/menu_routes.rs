//! Menu Routes

use axum::{
    Router,
    routing::get,
};

use crate::api::app_state::AppState;
use crate::api::handlers::menu_handler::*;

/// 创建菜单路由器
pub fn create_menu_router() -> Router<AppState> {
    Router::new()
        .route("/menus", get(list_menus).post(create_menu))
        .route("/menus/:id", get(get_menu).put(update_menu).delete(delete_menu))
}
