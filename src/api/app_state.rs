use crate::config::config::PolicyConfig;
use crate::observability::AppMetrics;
use crate::services::clock::Clock;
use crate::services::ingredient::{IngredientService, create_ingredient_service};
use crate::services::item::{ItemService, create_item_service};
use crate::services::menu::{MenuService, create_menu_service};
use crate::services::validation::ValidationPolicy;
use crate::services::visibility::VisibilityPolicy;
use crate::storage::store::RecordStore;
use std::sync::Arc;

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Record store shared by all services
    pub store: RecordStore,
    /// Menu service for menu business logic and the current-menu listing
    pub menu_service: Arc<dyn MenuService>,
    /// Item service for item business logic
    pub item_service: Arc<dyn ItemService>,
    /// Ingredient service for ingredient CRUD
    pub ingredient_service: Arc<dyn IngredientService>,
    /// Prometheus metrics
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("menu_service", &"Arc<dyn MenuService>")
            .field("item_service", &"Arc<dyn ItemService>")
            .field("ingredient_service", &"Arc<dyn IngredientService>")
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        store: RecordStore,
        menu_service: Box<dyn MenuService>,
        item_service: Box<dyn ItemService>,
        ingredient_service: Box<dyn IngredientService>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            store,
            menu_service: Arc::from(menu_service),
            item_service: Arc::from(item_service),
            ingredient_service: Arc::from(ingredient_service),
            metrics,
        }
    }

    /// Wire all services over one store using the configured policies
    pub fn from_policy(
        store: RecordStore,
        clock: Arc<dyn Clock>,
        policy: &PolicyConfig,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        let validation = ValidationPolicy::from(policy);
        let visibility = VisibilityPolicy::from(policy);

        Self::new(
            store.clone(),
            create_menu_service(store.clone(), clock, validation, visibility),
            create_item_service(store.clone(), validation),
            create_ingredient_service(store.clone()),
            metrics,
        )
    }
}
