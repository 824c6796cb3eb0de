use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::error::StoreError;
use crate::model::{
    IngredientDetail, IngredientInput, InventoryEntry, InventoryId, MealDay, MealTime, MenuSlot,
    PlannedMeal, Recipe, RecipeId, RecipeIngredient, RecipeIngredientRow, StockItem, StockItemId,
    StockLevel,
};

/// All kitchen tables plus their id counters. Both stores keep one of these
/// and run every operation against it.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct KitchenData {
    #[serde(default)]
    last_stock_item_id: StockItemId,
    #[serde(default)]
    last_inventory_id: InventoryId,
    #[serde(default)]
    last_recipe_id: RecipeId,
    #[serde(default)]
    pub stock_items: Vec<StockItem>,
    #[serde(default)]
    pub inventory: Vec<InventoryEntry>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub recipe_ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub menu_plan: Vec<MenuSlot>,
}

fn clean_name(name: &str) -> Result<String, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::EmptyName);
    }
    Ok(name.to_string())
}

impl KitchenData {
    pub fn new() -> Self {
        Self::default()
    }

    fn stock_item(&self, id: StockItemId) -> Option<&StockItem> {
        self.stock_items.iter().find(|item| item.id == id)
    }

    fn stock_item_by_name(&self, name: &str) -> Option<&StockItem> {
        self.stock_items.iter().find(|item| item.name == name)
    }

    fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Inventory joined with item names, ordered by name.
    pub fn fetch_inventory(&self) -> Vec<StockLevel> {
        let mut levels: Vec<StockLevel> = self
            .inventory
            .iter()
            .filter_map(|entry| {
                self.stock_item(entry.item_id).map(|item| StockLevel {
                    inventory_id: entry.id,
                    item_name: item.name.clone(),
                    quantity: entry.quantity,
                    unit: entry.unit.clone(),
                    last_updated: entry.last_updated,
                })
            })
            .collect();
        levels.sort_by(|a, b| a.item_name.cmp(&b.item_name));
        levels
    }

    pub fn fetch_recipe_ingredients(&self) -> Vec<RecipeIngredientRow> {
        self.recipe_ingredients
            .iter()
            .filter_map(|ri| {
                let recipe = self.recipe(ri.recipe_id)?;
                let item = self.stock_item(ri.item_id)?;
                Some(RecipeIngredientRow {
                    recipe_name: recipe.name.clone(),
                    item_name: item.name.clone(),
                    quantity_per_person: ri.quantity_per_person,
                    unit: ri.unit.clone(),
                })
            })
            .collect()
    }

    /// Menu slots joined with recipe names, in week order.
    pub fn fetch_menu_plan(&self) -> Vec<PlannedMeal> {
        let mut plan: Vec<PlannedMeal> = self
            .menu_plan
            .iter()
            .filter_map(|slot| {
                self.recipe(slot.recipe_id).map(|recipe| PlannedMeal {
                    day: slot.day,
                    meal: slot.meal,
                    recipe_name: recipe.name.clone(),
                    num_persons: slot.num_persons,
                })
            })
            .collect();
        plan.sort_by_key(|meal| (meal.day, meal.meal));
        plan
    }

    pub fn list_stock_items(&self) -> Vec<StockItem> {
        let mut items = self.stock_items.clone();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    pub fn list_recipes(&self) -> Vec<Recipe> {
        let mut recipes = self.recipes.clone();
        recipes.sort_by(|a, b| a.name.cmp(&b.name));
        recipes
    }

    pub fn recipe_details(&self, recipe_id: RecipeId) -> Result<Vec<IngredientDetail>, StoreError> {
        if self.recipe(recipe_id).is_none() {
            return Err(StoreError::RecipeNotFound(recipe_id));
        }
        Ok(self
            .recipe_ingredients
            .iter()
            .filter(|ri| ri.recipe_id == recipe_id)
            .filter_map(|ri| {
                self.stock_item(ri.item_id).map(|item| IngredientDetail {
                    item_id: item.id,
                    item_name: item.name.clone(),
                    quantity_per_person: ri.quantity_per_person,
                    unit: ri.unit.clone(),
                })
            })
            .collect())
    }

    /// Insert-if-absent on the catalog. Returns the id of the (possibly existing) item.
    pub fn ensure_stock_item(&mut self, name: &str, unit: &str) -> Result<StockItemId, StoreError> {
        let name = clean_name(name)?;
        if let Some(item) = self.stock_item_by_name(&name) {
            return Ok(item.id);
        }
        self.last_stock_item_id += 1;
        let id = self.last_stock_item_id;
        self.stock_items.push(StockItem {
            id,
            name,
            base_unit: unit.to_string(),
        });
        Ok(id)
    }

    fn push_inventory(&mut self, item_id: StockItemId, quantity: f64, unit: &str) -> InventoryId {
        self.last_inventory_id += 1;
        let id = self.last_inventory_id;
        self.inventory.push(InventoryEntry {
            id,
            item_id,
            quantity,
            unit: unit.to_string(),
            last_updated: Utc::now(),
        });
        id
    }

    /// Adds a catalog item with an initial quantity. An existing inventory row
    /// for that item is left untouched.
    pub fn add_stock_item(&mut self, name: &str, quantity: f64, unit: &str) -> Result<InventoryId, StoreError> {
        let item_id = self.ensure_stock_item(name, unit)?;
        if let Some(entry) = self.inventory.iter().find(|e| e.item_id == item_id) {
            return Ok(entry.id);
        }
        Ok(self.push_inventory(item_id, quantity, unit))
    }

    /// Adds `delta` to an item's stock, creating the item and its row when absent.
    /// An existing row keeps its unit.
    pub fn upsert_inventory(&mut self, item_name: &str, delta: f64, unit: &str) -> Result<InventoryId, StoreError> {
        let item_id = self.ensure_stock_item(item_name, unit)?;
        if let Some(entry) = self.inventory.iter_mut().find(|e| e.item_id == item_id) {
            entry.quantity += delta;
            entry.last_updated = Utc::now();
            return Ok(entry.id);
        }
        Ok(self.push_inventory(item_id, delta, unit))
    }

    pub fn update_inventory_quantity(&mut self, inventory_id: InventoryId, quantity: f64) -> Result<(), StoreError> {
        let entry = self
            .inventory
            .iter_mut()
            .find(|e| e.id == inventory_id)
            .ok_or(StoreError::InventoryNotFound(inventory_id))?;
        entry.quantity = quantity;
        entry.last_updated = Utc::now();
        Ok(())
    }

    pub fn delete_inventory_item(&mut self, inventory_id: InventoryId) -> Result<(), StoreError> {
        let before = self.inventory.len();
        self.inventory.retain(|e| e.id != inventory_id);
        if self.inventory.len() == before {
            return Err(StoreError::InventoryNotFound(inventory_id));
        }
        Ok(())
    }

    /// Creates a recipe (`recipe_id == None`) or renames one and replaces its ingredient list.
    pub fn save_recipe(
        &mut self,
        recipe_id: Option<RecipeId>,
        name: &str,
        ingredients: &[IngredientInput],
    ) -> Result<RecipeId, StoreError> {
        let name = clean_name(name)?;
        if self.recipes.iter().any(|r| r.name == name && Some(r.id) != recipe_id) {
            return Err(StoreError::DuplicateRecipe(name));
        }
        if let Some(missing) = ingredients.iter().find(|i| self.stock_item(i.item_id).is_none()) {
            return Err(StoreError::StockItemNotFound(missing.item_id));
        }

        let id = match recipe_id {
            Some(id) => {
                let recipe = self
                    .recipes
                    .iter_mut()
                    .find(|r| r.id == id)
                    .ok_or(StoreError::RecipeNotFound(id))?;
                recipe.name = name;
                self.recipe_ingredients.retain(|ri| ri.recipe_id != id);
                id
            }
            None => {
                self.last_recipe_id += 1;
                let id = self.last_recipe_id;
                self.recipes.push(Recipe { id, name });
                id
            }
        };

        self.recipe_ingredients.extend(ingredients.iter().map(|i| RecipeIngredient {
            recipe_id: id,
            item_id: i.item_id,
            quantity_per_person: i.quantity_per_person,
            unit: i.unit.clone(),
        }));
        Ok(id)
    }

    /// Removes a recipe together with its ingredients and any menu slot using it.
    pub fn delete_recipe(&mut self, recipe_id: RecipeId) -> Result<(), StoreError> {
        if self.recipe(recipe_id).is_none() {
            return Err(StoreError::RecipeNotFound(recipe_id));
        }
        self.recipes.retain(|r| r.id != recipe_id);
        self.recipe_ingredients.retain(|ri| ri.recipe_id != recipe_id);
        self.menu_plan.retain(|slot| slot.recipe_id != recipe_id);
        Ok(())
    }

    pub fn set_menu_slot(
        &mut self,
        day: MealDay,
        meal: MealTime,
        recipe_id: RecipeId,
        num_persons: u32,
    ) -> Result<(), StoreError> {
        if self.recipe(recipe_id).is_none() {
            return Err(StoreError::RecipeNotFound(recipe_id));
        }
        match self.menu_plan.iter_mut().find(|s| s.day == day && s.meal == meal) {
            Some(slot) => {
                slot.recipe_id = recipe_id;
                slot.num_persons = num_persons;
            }
            None => self.menu_plan.push(MenuSlot {
                day,
                meal,
                recipe_id,
                num_persons,
            }),
        }
        Ok(())
    }

    /// Returns whether a slot was actually cleared.
    pub fn clear_menu_slot(&mut self, day: MealDay, meal: MealTime) -> bool {
        let before = self.menu_plan.len();
        self.menu_plan.retain(|s| !(s.day == day && s.meal == meal));
        self.menu_plan.len() != before
    }

    /// Checks that every row reference resolves and that keys are unique.
    pub fn validate(&self) -> Result<(), StoreError> {
        let mut names = HashSet::new();
        for item in &self.stock_items {
            if !names.insert(item.name.as_str()) {
                return Err(StoreError::Corrupt(format!("duplicate stock item '{}'", item.name)));
            }
        }
        let mut stocked = HashSet::new();
        for entry in &self.inventory {
            if self.stock_item(entry.item_id).is_none() {
                return Err(StoreError::Corrupt(format!(
                    "inventory entry {} references unknown stock item {}",
                    entry.id, entry.item_id
                )));
            }
            if !stocked.insert(entry.item_id) {
                return Err(StoreError::Corrupt(format!(
                    "stock item {} has more than one inventory entry",
                    entry.item_id
                )));
            }
        }
        for ri in &self.recipe_ingredients {
            if self.recipe(ri.recipe_id).is_none() || self.stock_item(ri.item_id).is_none() {
                return Err(StoreError::Corrupt(format!(
                    "recipe ingredient ({}, {}) has a dangling reference",
                    ri.recipe_id, ri.item_id
                )));
            }
        }
        let mut slots = HashSet::new();
        for slot in &self.menu_plan {
            if self.recipe(slot.recipe_id).is_none() {
                return Err(StoreError::Corrupt(format!(
                    "menu slot {} {} references unknown recipe {}",
                    slot.day, slot.meal, slot.recipe_id
                )));
            }
            if !slots.insert((slot.day, slot.meal)) {
                return Err(StoreError::Corrupt(format!("menu slot {} {} is duplicated", slot.day, slot.meal)));
            }
        }
        Ok(())
    }
}
