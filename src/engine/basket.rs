use log::{debug, info, warn};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::model::{MealDay, PlannedMeal, RecipeIngredientRow, StockLevel};
use crate::notice::Notice;
use crate::store::KitchenStore;

/// One line of the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasketEntry {
    pub item_name: String,
    pub required: f64,
    pub available: f64,
    pub shortfall: f64,
    /// Unit of the first recipe line that asked for the item.
    pub unit: String,
    /// Distinct dishes needing the item, sorted.
    pub dishes: Vec<String>,
}

struct Requirement {
    total: f64,
    unit: String,
    dishes: BTreeSet<String>,
}

/// The two days the basket covers.
pub fn basket_window(today: MealDay) -> [MealDay; 2] {
    [today, today.succ()]
}

/// Aggregates what the meals of `today` and tomorrow need and keeps the
/// items whose stock falls short, ordered by item name.
///
/// Quantities are summed as written in the recipes; the unit of an item is
/// assumed to be the same across recipes.
pub fn compute_basket(
    today: MealDay,
    menu: &[PlannedMeal],
    recipe_ingredients: &[RecipeIngredientRow],
    inventory: &[StockLevel],
) -> Vec<BasketEntry> {
    let window = basket_window(today);
    let upcoming: Vec<&PlannedMeal> = menu.iter().filter(|meal| window.contains(&meal.day)).collect();
    debug!("Basket window {:?} holds {} planned meals", window, upcoming.len());

    let mut requirements: BTreeMap<String, Requirement> = BTreeMap::new();
    for meal in upcoming {
        let mut matched = false;
        for ingredient in recipe_ingredients.iter().filter(|row| row.recipe_name == meal.recipe_name) {
            matched = true;
            let total_required = f64::from(meal.num_persons) * ingredient.quantity_per_person;
            let requirement = requirements
                .entry(ingredient.item_name.clone())
                .or_insert_with(|| Requirement {
                    total: 0.0,
                    unit: ingredient.unit.clone(),
                    dishes: BTreeSet::new(),
                });
            requirement.total += total_required;
            requirement.dishes.insert(meal.recipe_name.clone());
        }
        if !matched {
            warn!(
                "{} {} plans '{}' which has no ingredients",
                meal.day, meal.meal, meal.recipe_name
            );
        }
    }

    let mut stock_by_name: HashMap<&str, f64> = HashMap::new();
    for level in inventory {
        stock_by_name.entry(level.item_name.as_str()).or_insert(level.quantity);
    }

    let basket: Vec<BasketEntry> = requirements
        .into_iter()
        .filter_map(|(item_name, requirement)| {
            let available = stock_by_name.get(item_name.as_str()).copied().unwrap_or(0.0);
            let shortfall = requirement.total - available;
            (shortfall > 0.0).then(|| BasketEntry {
                item_name,
                required: requirement.total,
                available,
                shortfall,
                unit: requirement.unit,
                dishes: requirement.dishes.into_iter().collect(),
            })
        })
        .collect();
    debug!("Basket holds {} items", basket.len());
    basket
}

/// Adds the shortfall of `entry` to the inventory. Failures come back as an
/// error notice rather than an `Err`.
pub fn add_to_stock(store: &mut dyn KitchenStore, entry: &BasketEntry) -> Notice {
    match store.upsert_inventory(&entry.item_name, entry.shortfall, &entry.unit) {
        Ok(_) => {
            info!("Restocked {} with {} {}", entry.item_name, entry.shortfall, entry.unit);
            Notice::success(format!(
                "Added {:.2} {} of {} to your stock!",
                entry.shortfall, entry.unit, entry.item_name
            ))
        }
        Err(e) => {
            warn!("Could not restock {}: {}", entry.item_name, e);
            Notice::error(format!("Failed to update stock: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MealTime;
    use crate::store::MemoryStore;
    use chrono::Utc;

    const EPS: f64 = 1e-9;

    fn stock(name: &str, quantity: f64, unit: &str) -> StockLevel {
        StockLevel {
            inventory_id: 0,
            item_name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            last_updated: Utc::now(),
        }
    }

    fn ingredient(recipe: &str, item: &str, qty: f64, unit: &str) -> RecipeIngredientRow {
        RecipeIngredientRow {
            recipe_name: recipe.to_string(),
            item_name: item.to_string(),
            quantity_per_person: qty,
            unit: unit.to_string(),
        }
    }

    fn meal(day: MealDay, meal: MealTime, recipe: &str, persons: u32) -> PlannedMeal {
        PlannedMeal {
            day,
            meal,
            recipe_name: recipe.to_string(),
            num_persons: persons,
        }
    }

    fn recipes() -> Vec<RecipeIngredientRow> {
        vec![
            ingredient("Idli", "Rice", 0.15, "kg"),
            ingredient("Idli", "Urad dal", 0.04, "kg"),
            ingredient("Khichdi", "Rice", 0.15, "kg"),
            ingredient("Khichdi", "Moong dal", 0.05, "kg"),
            ingredient("Chole", "Chickpeas", 0.1, "kg"),
        ]
    }

    #[test]
    fn test_window_wraps_sunday() {
        assert_eq!(basket_window(MealDay::Sunday), [MealDay::Sunday, MealDay::Monday]);
    }

    #[test]
    fn test_accumulates_across_dishes_in_window() {
        let menu = vec![
            meal(MealDay::Tuesday, MealTime::Breakfast, "Idli", 1),
            meal(MealDay::Wednesday, MealTime::Dinner, "Khichdi", 2),
        ];
        let inventory = vec![
            stock("Rice", 0.1, "kg"),
            stock("Urad dal", 1.0, "kg"),
            stock("Moong dal", 1.0, "kg"),
        ];
        let basket = compute_basket(MealDay::Tuesday, &menu, &recipes(), &inventory);

        assert_eq!(basket.len(), 1);
        let rice = &basket[0];
        assert_eq!(rice.item_name, "Rice");
        assert!((rice.required - 0.45).abs() < EPS);
        assert!((rice.shortfall - 0.35).abs() < EPS);
        assert_eq!(rice.unit, "kg");
        assert_eq!(rice.dishes, vec!["Idli".to_string(), "Khichdi".to_string()]);
    }

    #[test]
    fn test_meals_outside_window_are_ignored() {
        let menu = vec![
            meal(MealDay::Monday, MealTime::Lunch, "Chole", 4),
            meal(MealDay::Friday, MealTime::Dinner, "Khichdi", 2),
        ];
        let basket = compute_basket(MealDay::Thursday, &menu, &recipes(), &[]);
        let names: Vec<&str> = basket.iter().map(|e| e.item_name.as_str()).collect();
        assert_eq!(names, vec!["Moong dal", "Rice"]);
    }

    #[test]
    fn test_never_returns_non_positive_shortfall() {
        let menu = vec![
            meal(MealDay::Monday, MealTime::Breakfast, "Idli", 2),
            meal(MealDay::Monday, MealTime::Dinner, "Chole", 2),
        ];
        let inventory = vec![
            stock("Rice", 0.3, "kg"),
            stock("Urad dal", 5.0, "kg"),
            stock("Chickpeas", 0.1, "kg"),
        ];
        let basket = compute_basket(MealDay::Monday, &menu, &recipes(), &inventory);
        assert_eq!(basket.len(), 1);
        assert_eq!(basket[0].item_name, "Chickpeas");
        assert!(basket.iter().all(|e| e.shortfall > 0.0));
    }

    #[test]
    fn test_same_dish_twice_is_listed_once() {
        let menu = vec![
            meal(MealDay::Saturday, MealTime::Lunch, "Chole", 1),
            meal(MealDay::Sunday, MealTime::Lunch, "Chole", 3),
        ];
        let basket = compute_basket(MealDay::Saturday, &menu, &recipes(), &[]);
        assert_eq!(basket[0].dishes, vec!["Chole".to_string()]);
        assert!((basket[0].shortfall - 0.4).abs() < EPS);
    }

    #[test]
    fn test_unknown_recipe_in_plan_contributes_nothing() {
        let menu = vec![meal(MealDay::Monday, MealTime::Lunch, "Mystery stew", 2)];
        assert!(compute_basket(MealDay::Monday, &menu, &recipes(), &[]).is_empty());
    }

    #[test]
    fn test_add_to_stock_creates_row_in_entry_unit() {
        let mut store = MemoryStore::new();
        let entry = BasketEntry {
            item_name: "Rice".to_string(),
            required: 0.45,
            available: 0.1,
            shortfall: 0.35,
            unit: "kg".to_string(),
            dishes: vec!["Idli".to_string()],
        };
        let notice = add_to_stock(&mut store, &entry);
        assert!(!notice.is_error());
        assert_eq!(notice.message, "Added 0.35 kg of Rice to your stock!");

        let levels = store.fetch_inventory().unwrap();
        assert_eq!(levels[0].item_name, "Rice");
        assert_eq!(levels[0].unit, "kg");
        assert!((levels[0].quantity - 0.35).abs() < EPS);
    }

    #[test]
    fn test_add_to_stock_reports_failure() {
        let mut store = MemoryStore::new();
        let entry = BasketEntry {
            item_name: "  ".to_string(),
            required: 1.0,
            available: 0.0,
            shortfall: 1.0,
            unit: "kg".to_string(),
            dishes: vec![],
        };
        let notice = add_to_stock(&mut store, &entry);
        assert!(notice.is_error());
        assert!(notice.message.starts_with("Failed to update stock"));
    }
}
