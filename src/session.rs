//! Editor state passed explicitly between user actions.
use log::{debug, warn};
use std::collections::BTreeMap;

use crate::model::{IngredientDetail, IngredientInput, InventoryId, RecipeId, StockItem, StockItemId};
use crate::notice::Notice;
use crate::store::{KitchenStore, StoreError};

/// Stock page state: the add-item panel and quantity edits not yet saved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockEditor {
    pub show_add_panel: bool,
    pending_edits: BTreeMap<InventoryId, f64>,
}

impl StockEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_add_panel(&mut self) {
        self.show_add_panel = !self.show_add_panel;
    }

    pub fn submit_new_item(&mut self, store: &mut dyn KitchenStore, name: &str, quantity: f64, unit: &str) -> Notice {
        if name.trim().is_empty() {
            return Notice::warning("Please enter an item name.");
        }
        match store.add_stock_item(name, quantity, unit) {
            Ok(_) => {
                self.show_add_panel = false;
                Notice::success(format!("Added '{}' to your inventory!", name.trim()))
            }
            Err(e) => Notice::error(format!("Error adding item: {}", e)),
        }
    }

    /// Stages `new_quantity` for a row. Setting it back to the original drops the edit.
    pub fn stage_edit(&mut self, inventory_id: InventoryId, original: f64, new_quantity: f64) {
        if new_quantity != original {
            self.pending_edits.insert(inventory_id, new_quantity);
        } else {
            self.pending_edits.remove(&inventory_id);
        }
    }

    pub fn pending_edits(&self) -> &BTreeMap<InventoryId, f64> {
        &self.pending_edits
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.pending_edits.is_empty()
    }

    /// Applies every staged edit. Edits that fail stay staged.
    pub fn save_all(&mut self, store: &mut dyn KitchenStore) -> Notice {
        if self.pending_edits.is_empty() {
            return Notice::info("No changes to save.");
        }
        let mut failures = Vec::new();
        for (&inventory_id, &quantity) in &self.pending_edits {
            if let Err(e) = store.update_inventory_quantity(inventory_id, quantity) {
                warn!("Could not update inventory entry {}: {}", inventory_id, e);
                failures.push((inventory_id, e.to_string()));
            }
        }
        self.pending_edits
            .retain(|id, _| failures.iter().any(|(failed, _)| failed == id));

        if failures.is_empty() {
            Notice::success("All changes saved!")
        } else {
            let details: Vec<String> = failures.into_iter().map(|(_, e)| e).collect();
            Notice::error(format!("Failed to save some changes: {}", details.join("; ")))
        }
    }

    pub fn delete(&mut self, store: &mut dyn KitchenStore, inventory_id: InventoryId) -> Notice {
        self.pending_edits.remove(&inventory_id);
        match store.delete_inventory_item(inventory_id) {
            Ok(()) => Notice::success("Item removed from your inventory."),
            Err(e) => Notice::error(format!("Failed to delete item: {}", e)),
        }
    }
}

/// A recipe being created or edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeEditor {
    /// `None` while drafting a new recipe.
    pub recipe_id: Option<RecipeId>,
    pub name: String,
    pub ingredients: Vec<IngredientDetail>,
}

impl RecipeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an existing recipe and its ingredient lines.
    pub fn load(store: &dyn KitchenStore, recipe_id: RecipeId) -> Result<Self, StoreError> {
        let recipe = store
            .list_recipes()?
            .into_iter()
            .find(|r| r.id == recipe_id)
            .ok_or(StoreError::RecipeNotFound(recipe_id))?;
        Ok(Self {
            recipe_id: Some(recipe.id),
            name: recipe.name,
            ingredients: store.recipe_details(recipe_id)?,
        })
    }

    /// Adds an ingredient line, replacing any earlier line for the same item.
    pub fn add_ingredient(&mut self, item: &StockItem, quantity_per_person: f64, unit: &str) {
        let detail = IngredientDetail {
            item_id: item.id,
            item_name: item.name.clone(),
            quantity_per_person,
            unit: unit.to_string(),
        };
        match self.ingredients.iter_mut().find(|i| i.item_id == item.id) {
            Some(existing) => *existing = detail,
            None => self.ingredients.push(detail),
        }
    }

    pub fn remove_ingredient(&mut self, item_id: StockItemId) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i.item_id != item_id);
        self.ingredients.len() != before
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn save(&mut self, store: &mut dyn KitchenStore) -> Notice {
        let inputs: Vec<IngredientInput> = self
            .ingredients
            .iter()
            .map(|i| IngredientInput {
                item_id: i.item_id,
                quantity_per_person: i.quantity_per_person,
                unit: i.unit.clone(),
            })
            .collect();
        match store.save_recipe(self.recipe_id, &self.name, &inputs) {
            Ok(id) => {
                debug!("Saved recipe {} with {} ingredients", id, inputs.len());
                let notice = Notice::success(format!("Recipe '{}' saved!", self.name.trim()));
                self.clear();
                notice
            }
            Err(e) => Notice::error(format!("Failed to save recipe: {}", e)),
        }
    }

    pub fn delete(&mut self, store: &mut dyn KitchenStore) -> Notice {
        let Some(recipe_id) = self.recipe_id else {
            return Notice::info("Nothing to delete: this recipe was never saved.");
        };
        match store.delete_recipe(recipe_id) {
            Ok(()) => {
                let notice = Notice::warning(format!("Recipe '{}' deleted.", self.name));
                self.clear();
                notice
            }
            Err(e) => Notice::error(format!("Failed to delete recipe: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLevel;
    use crate::store::MemoryStore;

    #[test]
    fn test_stage_edit_only_keeps_changes() {
        let mut editor = StockEditor::new();
        editor.stage_edit(1, 2.0, 2.0);
        assert!(!editor.has_pending_edits());
        editor.stage_edit(1, 2.0, 3.5);
        assert_eq!(editor.pending_edits().get(&1), Some(&3.5));
        editor.stage_edit(1, 2.0, 2.0);
        assert!(!editor.has_pending_edits());
    }

    #[test]
    fn test_save_all_applies_and_clears() {
        let mut store = MemoryStore::new();
        let id = store.add_stock_item("Eggs", 6.0, "pcs").unwrap();
        let mut editor = StockEditor::new();
        editor.stage_edit(id, 6.0, 12.0);

        let notice = editor.save_all(&mut store);
        assert_eq!(notice.level, NoticeLevel::Success);
        assert!(!editor.has_pending_edits());
        assert_eq!(store.fetch_inventory().unwrap()[0].quantity, 12.0);
    }

    #[test]
    fn test_save_all_keeps_failed_edits() {
        let mut store = MemoryStore::new();
        let id = store.add_stock_item("Eggs", 6.0, "pcs").unwrap();
        let mut editor = StockEditor::new();
        editor.stage_edit(id, 6.0, 4.0);
        editor.stage_edit(99, 1.0, 0.0);

        let notice = editor.save_all(&mut store);
        assert!(notice.is_error());
        assert!(notice.message.contains("Inventory entry 99 not found"));
        assert_eq!(editor.pending_edits().keys().copied().collect::<Vec<_>>(), vec![99]);
        assert_eq!(store.fetch_inventory().unwrap()[0].quantity, 4.0);
    }

    #[test]
    fn test_submit_new_item_requires_name() {
        let mut store = MemoryStore::new();
        let mut editor = StockEditor::new();
        editor.toggle_add_panel();
        let notice = editor.submit_new_item(&mut store, "", 1.0, "kg");
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(editor.show_add_panel);

        let notice = editor.submit_new_item(&mut store, "Rice", 1.0, "kg");
        assert_eq!(notice.message, "Added 'Rice' to your inventory!");
        assert!(!editor.show_add_panel);
    }

    #[test]
    fn test_recipe_editor_round_trip() {
        let mut store = MemoryStore::new();
        store.add_stock_item("Rice", 1.0, "kg").unwrap();
        store.add_stock_item("Moong dal", 1.0, "kg").unwrap();
        let items = store.list_stock_items().unwrap();

        let mut editor = RecipeEditor::new();
        editor.name = "Khichdi".to_string();
        for item in &items {
            editor.add_ingredient(item, 0.1, "kg");
        }
        editor.add_ingredient(&items[0], 0.05, "kg");
        assert_eq!(editor.ingredients.len(), 2);

        let notice = editor.save(&mut store);
        assert_eq!(notice.message, "Recipe 'Khichdi' saved!");
        assert_eq!(editor, RecipeEditor::default());

        let recipe_id = store.list_recipes().unwrap()[0].id;
        let mut loaded = RecipeEditor::load(&store, recipe_id).unwrap();
        assert_eq!(loaded.name, "Khichdi");
        assert_eq!(loaded.ingredients.len(), 2);
        assert!(loaded.remove_ingredient(items[1].id));

        let notice = loaded.delete(&mut store);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(store.list_recipes().unwrap().is_empty());
    }

    #[test]
    fn test_saving_unnamed_recipe_fails_softly() {
        let mut store = MemoryStore::new();
        let mut editor = RecipeEditor::new();
        let notice = editor.save(&mut store);
        assert!(notice.is_error());
        assert!(notice.message.contains("Name must not be empty"));
    }
}
