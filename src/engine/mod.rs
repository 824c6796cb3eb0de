pub mod availability;
pub mod basket;
pub mod low_stock;

pub use availability::{check_dish_status, DishStatus};
pub use basket::{add_to_stock, basket_window, compute_basket, BasketEntry};
pub use low_stock::{find_low_stock, LowStockAlert};

use crate::model::MealDay;
use crate::store::{KitchenStore, StoreError};

/// Classifies a dish against the store's current inventory and recipes.
pub fn dish_status_from_store(
    store: &dyn KitchenStore,
    dish_name: &str,
    num_persons: u32,
) -> Result<DishStatus, StoreError> {
    let inventory = store.fetch_inventory()?;
    let recipe_ingredients = store.fetch_recipe_ingredients()?;
    Ok(check_dish_status(dish_name, num_persons, &inventory, &recipe_ingredients))
}

/// The shopping list for `today` and the day after, from the store's current state.
pub fn basket_from_store(store: &dyn KitchenStore, today: MealDay) -> Result<Vec<BasketEntry>, StoreError> {
    let menu = store.fetch_menu_plan()?;
    let recipe_ingredients = store.fetch_recipe_ingredients()?;
    let inventory = store.fetch_inventory()?;
    Ok(compute_basket(today, &menu, &recipe_ingredients, &inventory))
}

pub fn low_stock_from_store(store: &dyn KitchenStore) -> Result<Vec<LowStockAlert>, StoreError> {
    Ok(find_low_stock(&store.fetch_inventory()?))
}
