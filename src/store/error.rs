use std::path::PathBuf;
use thiserror::Error;

use crate::model::{InventoryId, RecipeId, StockItemId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Corrupt kitchen data: {0}")]
    Corrupt(String),
    #[error("Inventory entry {0} not found")]
    InventoryNotFound(InventoryId),
    #[error("Recipe {0} not found")]
    RecipeNotFound(RecipeId),
    #[error("Stock item {0} not found")]
    StockItemNotFound(StockItemId),
    #[error("A recipe named '{0}' already exists")]
    DuplicateRecipe(String),
    #[error("Name must not be empty")]
    EmptyName,
}
