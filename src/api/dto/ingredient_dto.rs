//! 食材 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ingredient::Ingredient;

/// 创建食材请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateIngredientRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

impl CreateIngredientRequest {
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

/// 食材响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientResponse {
    pub id: String,
    pub name: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
        }
    }
}

/// 食材列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListIngredientsResponse {
    pub ingredients: Vec<IngredientResponse>,
    pub total: usize,
}

impl From<Vec<Ingredient>> for ListIngredientsResponse {
    fn from(ingredients: Vec<Ingredient>) -> Self {
        let ingredients: Vec<IngredientResponse> =
            ingredients.into_iter().map(IngredientResponse::from).collect();
        Self {
            total: ingredients.len(),
            ingredients,
        }
    }
}
