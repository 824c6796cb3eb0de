//! Demo kitchen: a dozen everyday recipes, a Monday-to-Friday plan and a
//! small starting pantry.
use crate::model::{IngredientInput, MealDay, MealTime};
use crate::store::{KitchenData, StoreError};

const PERSONS_PER_MEAL: u32 = 2;

/// (recipe, [(ingredient, kg per person)])
const RECIPES: &[(&str, &[(&str, f64)])] = &[
    ("Poha", &[("Poha (rice flakes)", 0.1), ("Onion", 0.05), ("Peanuts", 0.02)]),
    ("Idli", &[("Rice", 0.1), ("Urad dal", 0.04), ("Salt", 0.002)]),
    ("Upma", &[("Rava (semolina)", 0.1), ("Onion", 0.05)]),
    ("Veg Pulao", &[("Rice", 0.15), ("Mixed veg", 0.1)]),
    ("Rajma Chawal", &[("Rajma", 0.1), ("Rice", 0.15)]),
    ("Dal Tadka", &[("Toor dal", 0.1), ("Ghee", 0.01)]),
    ("Paneer Butter Masala", &[("Paneer", 0.1), ("Butter", 0.03)]),
    ("Chole", &[("Chickpeas", 0.1), ("Onion", 0.05)]),
    ("Veg Biryani", &[("Basmati rice", 0.15), ("Mixed veg", 0.1)]),
    ("Khichdi", &[("Rice", 0.1), ("Moong dal", 0.05)]),
    ("Aloo Paratha", &[("Wheat flour", 0.15), ("Potato", 0.1)]),
    ("Sambar Rice", &[("Rice", 0.15), ("Toor dal", 0.05)]),
];

const MENU: &[(MealDay, MealTime, &str)] = &[
    (MealDay::Monday, MealTime::Breakfast, "Poha"),
    (MealDay::Monday, MealTime::Lunch, "Veg Pulao"),
    (MealDay::Monday, MealTime::Dinner, "Paneer Butter Masala"),
    (MealDay::Tuesday, MealTime::Breakfast, "Idli"),
    (MealDay::Tuesday, MealTime::Lunch, "Rajma Chawal"),
    (MealDay::Tuesday, MealTime::Dinner, "Chole"),
    (MealDay::Wednesday, MealTime::Breakfast, "Upma"),
    (MealDay::Wednesday, MealTime::Lunch, "Dal Tadka"),
    (MealDay::Wednesday, MealTime::Dinner, "Veg Biryani"),
    (MealDay::Thursday, MealTime::Breakfast, "Aloo Paratha"),
    (MealDay::Thursday, MealTime::Lunch, "Sambar Rice"),
    (MealDay::Thursday, MealTime::Dinner, "Paneer Butter Masala"),
    (MealDay::Friday, MealTime::Breakfast, "Poha"),
    (MealDay::Friday, MealTime::Lunch, "Veg Pulao"),
    (MealDay::Friday, MealTime::Dinner, "Khichdi"),
];

const PANTRY: &[(&str, f64, &str)] = &[
    ("Rice", 1.0, "kg"),
    ("Onion", 0.2, "kg"),
    ("Toor dal", 500.0, "g"),
    ("Ghee", 0.05, "kg"),
    ("Wheat flour", 2.0, "kg"),
    ("Potato", 6.0, "pcs"),
];

/// Builds the demo kitchen from scratch.
pub fn sample_kitchen() -> Result<KitchenData, StoreError> {
    let mut data = KitchenData::new();

    for (name, quantity, unit) in PANTRY {
        data.add_stock_item(name, *quantity, unit)?;
    }

    for (recipe_name, ingredients) in RECIPES {
        let mut inputs = Vec::with_capacity(ingredients.len());
        for (item_name, qty) in ingredients.iter() {
            inputs.push(IngredientInput {
                item_id: data.ensure_stock_item(item_name, "kg")?,
                quantity_per_person: *qty,
                unit: "kg".to_string(),
            });
        }
        data.save_recipe(None, recipe_name, &inputs)?;
    }

    let recipes = data.list_recipes();
    for (day, meal, recipe_name) in MENU {
        if let Some(recipe) = recipes.iter().find(|r| r.name == *recipe_name) {
            data.set_menu_slot(*day, *meal, recipe.id, PERSONS_PER_MEAL)?;
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{check_dish_status, compute_basket, find_low_stock, DishStatus};

    #[test]
    fn test_sample_kitchen_is_consistent() {
        let data = sample_kitchen().unwrap();
        assert!(data.validate().is_ok());
        assert_eq!(data.list_recipes().len(), 12);
        assert_eq!(data.fetch_menu_plan().len(), 15);
        assert!(data.fetch_menu_plan().iter().all(|m| m.num_persons == 2));
    }

    #[test]
    fn test_sample_kitchen_drives_the_engine() {
        let data = sample_kitchen().unwrap();
        let inventory = data.fetch_inventory();
        let recipes = data.fetch_recipe_ingredients();

        // Rice 1 kg against 0.2 kg for Khichdi: plenty left.
        let khichdi = check_dish_status("Khichdi", 2, &inventory, &recipes);
        assert_eq!(khichdi, DishStatus::Missing(vec!["Moong dal".to_string()]));

        // Onion (0.2 kg) and Ghee (0.05 kg) are under the kg threshold.
        let low: Vec<String> = find_low_stock(&inventory).into_iter().map(|a| a.item_name).collect();
        assert_eq!(low, vec!["Ghee".to_string(), "Onion".to_string()]);

        // Saturday + Sunday are unplanned.
        let plan = data.fetch_menu_plan();
        assert!(compute_basket(MealDay::Saturday, &plan, &recipes, &inventory).is_empty());
        // Sunday wraps into Monday's meals.
        assert!(!compute_basket(MealDay::Sunday, &plan, &recipes, &inventory).is_empty());
    }
}
