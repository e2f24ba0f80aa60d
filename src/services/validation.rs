//! Validation Policy
//!
//! Acceptance rules applied to a candidate Menu or Item before it is written
//! to the store. Both validators are pure: the current date is passed in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::config::PolicyConfig;
use crate::models::item::ItemDraft;
use crate::models::menu::MenuDraft;

/// Minimum number of items on a menu.
pub const DEFAULT_MIN_MENU_ITEMS: usize = 1;

/// Stricter menu minimum used by later revisions of the menu form.
pub const STRICT_MIN_MENU_ITEMS: usize = 4;

/// Minimum description length, counted in characters.
pub const DEFAULT_MIN_DESCRIPTION_CHARS: usize = 10;

/// Minimum number of ingredients once any ingredient is selected.
pub const DEFAULT_MIN_INGREDIENTS: usize = 2;

/// Validation error types
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Expiration date already passed: '{field}' is {expiration_date}, today is {reference_date}")]
    ExpirationInPast {
        field: String,
        expiration_date: NaiveDate,
        reference_date: NaiveDate,
    },

    #[error("You must select {minimum} or more items (got {got})")]
    InsufficientItems {
        field: String,
        minimum: usize,
        got: usize,
    },

    #[error("Description must contain at least {minimum} characters (got {got})")]
    DescriptionTooShort {
        field: String,
        value: Option<String>,
        minimum: usize,
        got: usize,
    },

    #[error("You must select {minimum} or more ingredients (got {got})")]
    InsufficientIngredients {
        field: String,
        minimum: usize,
        got: usize,
    },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::ExpirationInPast { field, .. } => field.as_str(),
            Self::InsufficientItems { field, .. } => field.as_str(),
            Self::DescriptionTooShort { field, .. } => field.as_str(),
            Self::InsufficientIngredients { field, .. } => field.as_str(),
        }
    }

    /// Stable label, used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ExpirationInPast { .. } => "expiration_in_past",
            Self::InsufficientItems { .. } => "insufficient_items",
            Self::DescriptionTooShort { .. } => "description_too_short",
            Self::InsufficientIngredients { .. } => "insufficient_ingredients",
        }
    }
}

/// Validation result type
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Thresholds for both validators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    pub min_menu_items: usize,
    pub min_description_chars: usize,
    pub min_ingredients: usize,
    /// When false, an item with no ingredients is accepted.
    pub reject_empty_ingredients: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_menu_items: DEFAULT_MIN_MENU_ITEMS,
            min_description_chars: DEFAULT_MIN_DESCRIPTION_CHARS,
            min_ingredients: DEFAULT_MIN_INGREDIENTS,
            reject_empty_ingredients: false,
        }
    }
}

impl ValidationPolicy {
    /// Policy matching the four-item menu revision
    pub fn strict() -> Self {
        Self {
            min_menu_items: STRICT_MIN_MENU_ITEMS,
            ..Self::default()
        }
    }
}

impl From<&PolicyConfig> for ValidationPolicy {
    fn from(config: &PolicyConfig) -> Self {
        Self {
            min_menu_items: config.min_menu_items,
            min_description_chars: config.min_description_chars,
            min_ingredients: config.min_ingredients,
            reject_empty_ingredients: config.reject_empty_ingredients,
        }
    }
}

/// A menu draft that passed `validate_menu`
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMenu(MenuDraft);

impl ValidatedMenu {
    pub fn into_inner(self) -> MenuDraft {
        self.0
    }
}

/// An item draft that passed `validate_item`
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedItem(ItemDraft);

impl ValidatedItem {
    pub fn into_inner(self) -> ItemDraft {
        self.0
    }
}

/// Validate a menu candidate against `reference_date`.
///
/// The expiration check runs before the item count check, so a draft that
/// breaks both rules reports `ExpirationInPast`.
pub fn validate_menu(
    candidate: MenuDraft,
    reference_date: NaiveDate,
    policy: &ValidationPolicy,
) -> ValidationResult<ValidatedMenu> {
    if let Some(expiration_date) = candidate.expiration_date {
        if expiration_date < reference_date {
            return Err(ValidationError::ExpirationInPast {
                field: "expiration_date".to_string(),
                expiration_date,
                reference_date,
            });
        }
    }

    if candidate.items.len() < policy.min_menu_items {
        return Err(ValidationError::InsufficientItems {
            field: "items".to_string(),
            minimum: policy.min_menu_items,
            got: candidate.items.len(),
        });
    }

    Ok(ValidatedMenu(candidate))
}

/// Validate an item candidate.
///
/// Surrounding whitespace is stripped from the description before its length
/// is counted, and the accepted draft keeps the stripped text.
pub fn validate_item(
    mut candidate: ItemDraft,
    policy: &ValidationPolicy,
) -> ValidationResult<ValidatedItem> {
    candidate.description = candidate
        .description
        .map(|d| d.trim().to_string());

    let length = candidate
        .description
        .as_deref()
        .map(|d| d.chars().count())
        .unwrap_or(0);

    if length < policy.min_description_chars {
        return Err(ValidationError::DescriptionTooShort {
            field: "description".to_string(),
            value: candidate.description.clone(),
            minimum: policy.min_description_chars,
            got: length,
        });
    }

    // Zero ingredients counts as "not specified" unless the policy opts in.
    let count = candidate.ingredients.len();
    let checked = count > 0 || policy.reject_empty_ingredients;
    if checked && count < policy.min_ingredients {
        return Err(ValidationError::InsufficientIngredients {
            field: "ingredients".to_string(),
            minimum: policy.min_ingredients,
            got: count,
        });
    }

    Ok(ValidatedItem(candidate))
}
