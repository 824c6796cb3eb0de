pub mod data;
pub mod error;
pub mod json_file;
pub mod memory;

pub use data::KitchenData;
pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::model::{
    IngredientDetail, IngredientInput, InventoryId, MealDay, MealTime, PlannedMeal, Recipe,
    RecipeId, RecipeIngredientRow, StockItem, StockItemId, StockLevel,
};

/// The storage collaborator. Every call is an independent read or
/// read-modify-write; there is no transaction spanning several calls.
pub trait KitchenStore {
    fn fetch_inventory(&self) -> Result<Vec<StockLevel>, StoreError>;
    fn fetch_recipe_ingredients(&self) -> Result<Vec<RecipeIngredientRow>, StoreError>;
    fn fetch_menu_plan(&self) -> Result<Vec<PlannedMeal>, StoreError>;
    fn list_stock_items(&self) -> Result<Vec<StockItem>, StoreError>;
    fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError>;
    fn recipe_details(&self, recipe_id: RecipeId) -> Result<Vec<IngredientDetail>, StoreError>;

    /// Catalog insert-if-absent; never touches the inventory.
    fn ensure_stock_item(&mut self, name: &str, base_unit: &str) -> Result<StockItemId, StoreError>;

    /// Adds `delta` to an item's stock, creating the catalog item and the
    /// inventory row when absent.
    fn upsert_inventory(&mut self, item_name: &str, delta: f64, unit: &str) -> Result<InventoryId, StoreError>;
    fn add_stock_item(&mut self, name: &str, quantity: f64, unit: &str) -> Result<InventoryId, StoreError>;
    fn update_inventory_quantity(&mut self, inventory_id: InventoryId, quantity: f64) -> Result<(), StoreError>;
    fn delete_inventory_item(&mut self, inventory_id: InventoryId) -> Result<(), StoreError>;
    fn save_recipe(
        &mut self,
        recipe_id: Option<RecipeId>,
        name: &str,
        ingredients: &[IngredientInput],
    ) -> Result<RecipeId, StoreError>;
    fn delete_recipe(&mut self, recipe_id: RecipeId) -> Result<(), StoreError>;
    fn set_menu_slot(&mut self, day: MealDay, meal: MealTime, recipe_id: RecipeId, num_persons: u32) -> Result<(), StoreError>;
    fn clear_menu_slot(&mut self, day: MealDay, meal: MealTime) -> Result<bool, StoreError>;
}
