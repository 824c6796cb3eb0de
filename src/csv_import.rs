use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use log::info;
use std::io::Read;

use crate::model::{IngredientInput, RecipeIngredientRow};
use crate::store::KitchenStore;

const RECIPE_COL: &str = "recipe_name";
const ITEM_COL: &str = "item_name";
const QTY_PER_PERSON_COL: &str = "quantity_per_person";
const QUANTITY_COL: &str = "quantity";
const UNIT_COL: &str = "unit";

/// One inventory line of an import file.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub recipes_created: usize,
    pub recipes_updated: usize,
    pub inventory_rows: usize,
}

fn column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| anyhow!("Column '{}' not found", name))
}

fn parse_quantity(record: &StringRecord, idx: usize, row_index: usize) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse::<f64>()
        .with_context(|| format!("Invalid quantity '{}' at row {}", raw, row_index))
}

fn field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").trim().to_string()
}

/// Reads `recipe_name,item_name,quantity_per_person,unit` rows. Rows with a blank
/// recipe or item name are skipped.
pub fn read_recipe_rows<R: Read>(reader: R) -> Result<Vec<RecipeIngredientRow>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let recipe_idx = column(&headers, RECIPE_COL)?;
    let item_idx = column(&headers, ITEM_COL)?;
    let qty_idx = column(&headers, QTY_PER_PERSON_COL)?;
    let unit_idx = column(&headers, UNIT_COL)?;

    let mut rows = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
        let recipe_name = field(&record, recipe_idx);
        let item_name = field(&record, item_idx);
        if recipe_name.is_empty() || item_name.is_empty() {
            continue;
        }
        rows.push(RecipeIngredientRow {
            recipe_name,
            item_name,
            quantity_per_person: parse_quantity(&record, qty_idx, row_index)?,
            unit: field(&record, unit_idx),
        });
    }
    Ok(rows)
}

/// Reads `item_name,quantity,unit` rows. Rows with a blank item name are skipped.
pub fn read_inventory_rows<R: Read>(reader: R) -> Result<Vec<InventoryRow>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let item_idx = column(&headers, ITEM_COL)?;
    let qty_idx = column(&headers, QUANTITY_COL)?;
    let unit_idx = column(&headers, UNIT_COL)?;

    let mut rows = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
        let item_name = field(&record, item_idx);
        if item_name.is_empty() {
            continue;
        }
        rows.push(InventoryRow {
            item_name,
            quantity: parse_quantity(&record, qty_idx, row_index)?,
            unit: field(&record, unit_idx),
        });
    }
    Ok(rows)
}

/// Saves the recipes found in `rows`. A recipe that already exists by name has
/// its ingredient list replaced.
pub fn import_recipes(store: &mut dyn KitchenStore, rows: &[RecipeIngredientRow]) -> Result<ImportSummary> {
    let mut order: Vec<&str> = Vec::new();
    for row in rows {
        if !order.contains(&row.recipe_name.as_str()) {
            order.push(&row.recipe_name);
        }
    }

    let existing = store.list_recipes()?;
    let mut summary = ImportSummary::default();
    for recipe_name in order {
        let mut inputs = Vec::new();
        for row in rows.iter().filter(|r| r.recipe_name == recipe_name) {
            inputs.push(IngredientInput {
                item_id: store.ensure_stock_item(&row.item_name, &row.unit)?,
                quantity_per_person: row.quantity_per_person,
                unit: row.unit.clone(),
            });
        }
        let recipe_id = existing.iter().find(|r| r.name == recipe_name).map(|r| r.id);
        store
            .save_recipe(recipe_id, recipe_name, &inputs)
            .with_context(|| format!("Failed to save recipe '{}'", recipe_name))?;
        match recipe_id {
            Some(_) => summary.recipes_updated += 1,
            None => summary.recipes_created += 1,
        }
    }
    info!(
        "Imported recipes: {} created, {} updated",
        summary.recipes_created, summary.recipes_updated
    );
    Ok(summary)
}

/// Adds every row to the inventory through `upsert_inventory`.
pub fn import_inventory(store: &mut dyn KitchenStore, rows: &[InventoryRow]) -> Result<ImportSummary> {
    for row in rows {
        store
            .upsert_inventory(&row.item_name, row.quantity, &row.unit)
            .with_context(|| format!("Failed to stock '{}'", row.item_name))?;
    }
    info!("Imported {} inventory rows", rows.len());
    Ok(ImportSummary {
        inventory_rows: rows.len(),
        ..Default::default()
    })
}
