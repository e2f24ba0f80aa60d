//! Ingredient API Handlers

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
        dto::ingredient_dto::{CreateIngredientRequest, IngredientResponse, ListIngredientsResponse},
        handlers::track_write,
    },
    error::AppError,
};

/// List ingredients
///
/// GET /api/v1/ingredients
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Listing ingredients");

    let ingredients = state.ingredient_service.list().await?;

    Ok(Json(ListIngredientsResponse::from(ingredients)))
}

/// Create a new ingredient
///
/// POST /api/v1/ingredients
pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(request): Json<CreateIngredientRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Creating ingredient: {}", request.name);
    let request = request.trimmed();
    request.validate()?;

    let result = state.ingredient_service.create(&request.name).await;
    let ingredient = track_write(&state.metrics, "ingredient", "create", result)?;

    Ok((StatusCode::CREATED, Json(IngredientResponse::from(ingredient))))
}

/// Delete an ingredient and detach it from every item
///
/// DELETE /api/v1/ingredients/:id
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Deleting ingredient: {}", id);

    let result = state.ingredient_service.delete(&id).await;
    track_write(&state.metrics, "ingredient", "delete", result)?;

    Ok(StatusCode::NO_CONTENT)
}
