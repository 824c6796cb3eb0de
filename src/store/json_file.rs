//! Kitchen store persisted as a single JSON document.
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::{KitchenData, KitchenStore, StoreError};
use crate::model::{
    IngredientDetail, IngredientInput, InventoryId, MealDay, MealTime, PlannedMeal, Recipe,
    RecipeId, RecipeIngredientRow, StockItem, StockItemId, StockLevel,
};

/// Keeps the whole kitchen in memory and rewrites the file after every
/// successful write. A failed save leaves the in-memory change in place.
#[derive(Debug)]
pub struct JsonFileStore {
    storage_file: PathBuf,
    data: KitchenData,
}

impl JsonFileStore {
    /// Opens the store at `storage_file`. A missing or empty file yields an empty kitchen.
    pub fn open(storage_file: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_file = storage_file.as_ref().to_path_buf();
        let io_err = |source: std::io::Error| StoreError::Io {
            path: storage_file.clone(),
            source,
        };

        let data = if storage_file.exists() && storage_file.metadata().map_err(io_err)?.len() > 0 {
            let contents = fs::read_to_string(&storage_file).map_err(io_err)?;
            let data: KitchenData = serde_json::from_str(&contents)?;
            data.validate()?;
            debug!(
                "Loaded {} stock items, {} recipes and {} menu slots from {:?}",
                data.stock_items.len(),
                data.recipes.len(),
                data.menu_plan.len(),
                storage_file
            );
            data
        } else {
            info!("No kitchen data at {:?}, starting empty", storage_file);
            KitchenData::new()
        };

        Ok(Self { storage_file, data })
    }

    /// Replaces the whole content of the store and saves it.
    pub fn replace(&mut self, data: KitchenData) -> Result<(), StoreError> {
        data.validate()?;
        self.data = data;
        self.save()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let serialized = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.storage_file, serialized).map_err(|source| StoreError::Io {
            path: self.storage_file.clone(),
            source,
        })?;
        debug!("Saved kitchen data to {:?}", self.storage_file);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.storage_file
    }

    fn write<T>(&mut self, op: impl FnOnce(&mut KitchenData) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let out = op(&mut self.data)?;
        self.save()?;
        Ok(out)
    }
}

impl KitchenStore for JsonFileStore {
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
        self.write(|data| data.ensure_stock_item(name, base_unit))
    }

    fn upsert_inventory(&mut self, item_name: &str, delta: f64, unit: &str) -> Result<InventoryId, StoreError> {
        self.write(|data| data.upsert_inventory(item_name, delta, unit))
    }

    fn add_stock_item(&mut self, name: &str, quantity: f64, unit: &str) -> Result<InventoryId, StoreError> {
        self.write(|data| data.add_stock_item(name, quantity, unit))
    }

    fn update_inventory_quantity(&mut self, inventory_id: InventoryId, quantity: f64) -> Result<(), StoreError> {
        self.write(|data| data.update_inventory_quantity(inventory_id, quantity))
    }

    fn delete_inventory_item(&mut self, inventory_id: InventoryId) -> Result<(), StoreError> {
        self.write(|data| data.delete_inventory_item(inventory_id))
    }

    fn save_recipe(
        &mut self,
        recipe_id: Option<RecipeId>,
        name: &str,
        ingredients: &[IngredientInput],
    ) -> Result<RecipeId, StoreError> {
        self.write(|data| data.save_recipe(recipe_id, name, ingredients))
    }

    fn delete_recipe(&mut self, recipe_id: RecipeId) -> Result<(), StoreError> {
        self.write(|data| data.delete_recipe(recipe_id))
    }

    fn set_menu_slot(&mut self, day: MealDay, meal: MealTime, recipe_id: RecipeId, num_persons: u32) -> Result<(), StoreError> {
        self.write(|data| data.set_menu_slot(day, meal, recipe_id, num_persons))
    }

    fn clear_menu_slot(&mut self, day: MealDay, meal: MealTime) -> Result<bool, StoreError> {
        self.write(|data| Ok(data.clear_menu_slot(day, meal)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("kitchen.json")).unwrap();
        assert!(store.fetch_inventory().unwrap().is_empty());
        assert!(store.fetch_menu_plan().unwrap().is_empty());
    }

    #[test]
    fn test_writes_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kitchen.json");
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.upsert_inventory("Onion", 0.5, "kg").unwrap();
            store.upsert_inventory("Onion", 0.25, "kg").unwrap();
        }
        let store = JsonFileStore::open(&path).unwrap();
        let levels = store.fetch_inventory().unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].item_name, "Onion");
        assert!((levels[0].quantity - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_ids_keep_increasing_after_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kitchen.json");
        let first = {
            let mut store = JsonFileStore::open(&path).unwrap();
            let id = store.add_stock_item("Ghee", 0.5, "kg").unwrap();
            store.delete_inventory_item(id).unwrap();
            id
        };
        let mut store = JsonFileStore::open(&path).unwrap();
        let second = store.add_stock_item("Paneer", 0.2, "kg").unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_corrupt_json_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "{ not json").unwrap();
        let result = JsonFileStore::open(file.path());
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_dangling_reference_is_rejected_on_load() {
        let file = NamedTempFile::new().unwrap();
        let json = r#"{
            "inventory": [
                {"id": 1, "item_id": 7, "quantity": 1.0, "unit": "kg", "last_updated": "2024-01-01T00:00:00Z"}
            ]
        }"#;
        fs::write(file.path(), json).unwrap();
        let err = JsonFileStore::open(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
        assert!(err.to_string().contains("unknown stock item 7"));
    }
}
