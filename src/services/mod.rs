//! 服务模块

pub mod clock;
pub mod ingredient;
pub mod item;
pub mod menu;
pub mod validation;
pub mod visibility;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ingredient::{IngredientService, create_ingredient_service};
pub use item::{ItemService, create_item_service};
pub use menu::{MenuService, create_menu_service};
pub use validation::{
    ValidatedItem, ValidatedMenu, ValidationError, ValidationPolicy, validate_item, validate_menu,
};
pub use visibility::{
    ActiveOrder, ExpiredMenus, ExpiryComparison, ListedMenu, MenuListing, VisibilityPolicy,
    classify_and_order,
};
