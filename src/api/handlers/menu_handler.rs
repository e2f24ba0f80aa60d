//! Menu API Handlers
//!
//! HTTP handlers for menu CRUD and the current-menu listing.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;
use validator::Validate;

use crate::{
    api::{
        app_state::AppState,
        dto::menu_dto::{ListMenusResponse, MenuDetailResponse, MenuRequest, MenuResponse},
        handlers::track_write,
    },
    error::AppError,
};

/// List current menus
///
/// GET /api/v1/menus
pub async fn list_menus(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    debug!("Listing current menus");

    let listing = state.menu_service.list_current().await?;

    Ok(Json(ListMenusResponse::from(listing)))
}

/// Create a new menu
///
/// POST /api/v1/menus
pub async fn create_menu(
    State(state): State<AppState>,
    Json(request): Json<MenuRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Creating menu: {}", request.season);
    let request = request.trimmed();
    request.validate()?;

    let result = state.menu_service.create(request.into()).await;
    let menu = track_write(&state.metrics, "menu", "create", result)?;

    Ok((StatusCode::CREATED, Json(MenuResponse::from(menu))))
}

/// Get a menu with its items
///
/// GET /api/v1/menus/:id
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Getting menu: {}", id);

    let menu = state.menu_service.get(&id).await?;

    Ok(Json(MenuDetailResponse::from(menu)))
}

/// Update a menu
///
/// PUT /api/v1/menus/:id
pub async fn update_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MenuRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Updating menu: {}", id);
    let request = request.trimmed();
    request.validate()?;

    let result = state.menu_service.update(&id, request.into()).await;
    let menu = track_write(&state.metrics, "menu", "update", result)?;

    Ok(Json(MenuResponse::from(menu)))
}

/// Delete a menu
///
/// DELETE /api/v1/menus/:id
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Deleting menu: {}", id);

    let result = state.menu_service.delete(&id).await;
    track_write(&state.metrics, "menu", "delete", result)?;

    Ok(StatusCode::NO_CONTENT)
}
