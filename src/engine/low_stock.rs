use serde::Serialize;

use crate::model::StockLevel;
use crate::units::UnitFamily;

/// kg and L rows below this are running low.
pub const BULK_THRESHOLD: f64 = 0.25;
/// g and ml rows below this are running low.
pub const FINE_THRESHOLD: f64 = 100.0;
/// pcs rows at or below this are running low.
pub const COUNT_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowStockAlert {
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
}

pub fn is_low_stock(quantity: f64, unit: &str) -> bool {
    match UnitFamily::of(unit) {
        UnitFamily::Bulk => quantity < BULK_THRESHOLD,
        UnitFamily::Fine => quantity < FINE_THRESHOLD,
        UnitFamily::Count => quantity <= COUNT_THRESHOLD,
        UnitFamily::Other => false,
    }
}

/// Inventory rows under the fixed threshold of their unit family, in inventory order.
pub fn find_low_stock(inventory: &[StockLevel]) -> Vec<LowStockAlert> {
    inventory
        .iter()
        .filter(|level| is_low_stock(level.quantity, &level.unit))
        .map(|level| LowStockAlert {
            item_name: level.item_name.clone(),
            quantity: level.quantity,
            unit: level.unit.clone(),
        })
        .collect()
}
