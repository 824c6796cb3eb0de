use super::{KitchenData, KitchenStore, StoreError};
use crate::model::{
    IngredientDetail, IngredientInput, InventoryId, MealDay, MealTime, PlannedMeal, Recipe,
    RecipeId, RecipeIngredientRow, StockItem, StockItemId, StockLevel,
};

/// Store that lives only as long as the process. Used for fixtures and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: KitchenData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: KitchenData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &KitchenData {
        &self.data
    }
}

impl KitchenStore for MemoryStore {
    fn fetch_inventory(&self) -> Result<Vec<StockLevel>, StoreError> {
        Ok(self.data.fetch_inventory())
    }

    fn fetch_recipe_ingredients(&self) -> Result<Vec<RecipeIngredientRow>, StoreError> {
        Ok(self.data.fetch_recipe_ingredients())
    }

    fn fetch_menu_plan(&self) -> Result<Vec<PlannedMeal>, StoreError> {
        Ok(self.data.fetch_menu_plan())
    }

    fn list_stock_items(&self) -> Result<Vec<StockItem>, StoreError> {
        Ok(self.data.list_stock_items())
    }

    fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.data.list_recipes())
    }

    fn recipe_details(&self, recipe_id: RecipeId) -> Result<Vec<IngredientDetail>, StoreError> {
        self.data.recipe_details(recipe_id)
    }

    fn ensure_stock_item(&mut self, name: &str, base_unit: &str) -> Result<StockItemId, StoreError> {
        self.data.ensure_stock_item(name, base_unit)
    }

    fn upsert_inventory(&mut self, item_name: &str, delta: f64, unit: &str) -> Result<InventoryId, StoreError> {
        self.data.upsert_inventory(item_name, delta, unit)
    }

    fn add_stock_item(&mut self, name: &str, quantity: f64, unit: &str) -> Result<InventoryId, StoreError> {
        self.data.add_stock_item(name, quantity, unit)
    }

    fn update_inventory_quantity(&mut self, inventory_id: InventoryId, quantity: f64) -> Result<(), StoreError> {
        self.data.update_inventory_quantity(inventory_id, quantity)
    }

    fn delete_inventory_item(&mut self, inventory_id: InventoryId) -> Result<(), StoreError> {
        self.data.delete_inventory_item(inventory_id)
    }

    fn save_recipe(
        &mut self,
        recipe_id: Option<RecipeId>,
        name: &str,
        ingredients: &[IngredientInput],
    ) -> Result<RecipeId, StoreError> {
        self.data.save_recipe(recipe_id, name, ingredients)
    }

    fn delete_recipe(&mut self, recipe_id: RecipeId) -> Result<(), StoreError> {
        self.data.delete_recipe(recipe_id)
    }

    fn set_menu_slot(&mut self, day: MealDay, meal: MealTime, recipe_id: RecipeId, num_persons: u32) -> Result<(), StoreError> {
        self.data.set_menu_slot(day, meal, recipe_id, num_persons)
    }

    fn clear_menu_slot(&mut self, day: MealDay, meal: MealTime) -> Result<bool, StoreError> {
        Ok(self.data.clear_menu_slot(day, meal))
    }
}
