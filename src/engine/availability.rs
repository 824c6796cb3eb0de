use log::warn;
use std::collections::HashMap;
use std::fmt;

use crate::model::{RecipeIngredientRow, StockLevel};
use crate::units::to_base_unit;

/// Share of the available quantity that must remain after cooking for an
/// ingredient not to count as running low.
pub const LOW_STOCK_MARGIN: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub enum DishStatus {
    RecipeNotFound,
    /// Ingredients absent from the inventory or short of the required quantity.
    Missing(Vec<String>),
    LowStock(Vec<String>),
    Available,
}

impl DishStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            DishStatus::RecipeNotFound => "❓",
            DishStatus::Missing(_) => "❌",
            DishStatus::LowStock(_) => "⚠️",
            DishStatus::Available => "✅",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, DishStatus::Available)
    }
}

impl fmt::Display for DishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DishStatus::RecipeNotFound => write!(f, "Recipe not found"),
            DishStatus::Missing(items) => write!(f, "Missing: {}", items.join(", ")),
            DishStatus::LowStock(items) => write!(f, "Low Stock: {}", items.join(", ")),
            DishStatus::Available => write!(f, "Available"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IngredientStatus {
    Missing,
    LowStock,
    Available,
}

fn classify_ingredient(required: f64, available: f64) -> IngredientStatus {
    if available < required {
        IngredientStatus::Missing
    } else if available - required < LOW_STOCK_MARGIN * available {
        IngredientStatus::LowStock
    } else {
        IngredientStatus::Available
    }
}

/// Checks whether `dish_name` can be cooked for `num_persons` with the given inventory.
///
/// Quantities are brought to their base unit (kg -> g, L -> ml) before comparing.
/// Missing ingredients take precedence over low-stock ones.
pub fn check_dish_status(
    dish_name: &str,
    num_persons: u32,
    inventory: &[StockLevel],
    recipe_ingredients: &[RecipeIngredientRow],
) -> DishStatus {
    let ingredients: Vec<&RecipeIngredientRow> = recipe_ingredients
        .iter()
        .filter(|row| row.recipe_name == dish_name)
        .collect();
    if ingredients.is_empty() {
        return DishStatus::RecipeNotFound;
    }

    let mut stock_by_name: HashMap<&str, &StockLevel> = HashMap::new();
    for level in inventory {
        stock_by_name.entry(level.item_name.as_str()).or_insert(level);
    }

    let mut missing = Vec::new();
    let mut low_stock = Vec::new();
    for ingredient in ingredients {
        let Some(stock) = stock_by_name.get(ingredient.item_name.as_str()) else {
            missing.push(ingredient.item_name.clone());
            continue;
        };

        let (required, required_unit) = to_base_unit(
            ingredient.quantity_per_person * f64::from(num_persons),
            &ingredient.unit,
        );
        let (available, available_unit) = to_base_unit(stock.quantity, &stock.unit);
        if required_unit != available_unit {
            warn!(
                "'{}' in '{}' is measured in {} but stocked in {}; comparing raw quantities",
                ingredient.item_name, dish_name, required_unit, available_unit
            );
        }

        match classify_ingredient(required, available) {
            IngredientStatus::Missing => missing.push(ingredient.item_name.clone()),
            IngredientStatus::LowStock => low_stock.push(ingredient.item_name.clone()),
            IngredientStatus::Available => {}
        }
    }

    if !missing.is_empty() {
        DishStatus::Missing(missing)
    } else if !low_stock.is_empty() {
        DishStatus::LowStock(low_stock)
    } else {
        DishStatus::Available
    }
}
