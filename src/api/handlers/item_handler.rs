//! Item API Handlers

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
        dto::item_dto::{ItemRequest, ItemResponse, ListItemsResponse},
        handlers::track_write,
    },
    error::AppError,
};

/// List items sorted by name
///
/// GET /api/v1/items
pub async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    debug!("Listing items");

    let items = state.item_service.list().await?;

    Ok(Json(ListItemsResponse::from(items)))
}

/// Create a new item
///
/// POST /api/v1/items
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<ItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Creating item: {} by chef: {}", request.name, request.chef);
    let request = request.trimmed();
    request.validate()?;

    let result = state.item_service.create(request.into()).await;
    let item = track_write(&state.metrics, "item", "create", result)?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// Get an item by ID
///
/// GET /api/v1/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Getting item: {}", id);

    let item = state.item_service.get(&id).await?;

    Ok(Json(ItemResponse::from(item)))
}

/// Update an item
///
/// PUT /api/v1/items/:id
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Updating item: {}", id);
    let request = request.trimmed();
    request.validate()?;

    let result = state.item_service.update(&id, request.into()).await;
    let item = track_write(&state.metrics, "item", "update", result)?;

    Ok(Json(ItemResponse::from(item)))
}

/// Delete an item and detach it from every menu
///
/// DELETE /api/v1/items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Deleting item: {}", id);

    let result = state.item_service.delete(&id).await;
    track_write(&state.metrics, "item", "delete", result)?;

    Ok(StatusCode::NO_CONTENT)
}
