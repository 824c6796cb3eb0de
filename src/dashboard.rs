use std::fmt;

use crate::engine::{check_dish_status, find_low_stock, DishStatus, LowStockAlert};
use crate::model::{MealDay, MealTime, PlannedMeal, RecipeIngredientRow, StockLevel};
use crate::store::{KitchenStore, StoreError};

const EMPTY_SLOT: &str = "—";

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedDish {
    pub dish: String,
    pub num_persons: u32,
    pub status: DishStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealOverview {
    pub meal: MealTime,
    pub planned: Option<PlannedDish>,
}

/// What the home screen shows for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyOverview {
    pub day: MealDay,
    pub meals: Vec<MealOverview>,
    pub low_stock: Vec<LowStockAlert>,
}

impl DailyOverview {
    pub fn build(
        day: MealDay,
        menu: &[PlannedMeal],
        recipe_ingredients: &[RecipeIngredientRow],
        inventory: &[StockLevel],
    ) -> Self {
        let meals = MealTime::ALL
            .iter()
            .map(|&meal| {
                let planned = menu
                    .iter()
                    .find(|m| m.day == day && m.meal == meal)
                    .map(|m| PlannedDish {
                        dish: m.recipe_name.clone(),
                        num_persons: m.num_persons,
                        status: check_dish_status(&m.recipe_name, m.num_persons, inventory, recipe_ingredients),
                    });
                MealOverview { meal, planned }
            })
            .collect();

        Self {
            day,
            meals,
            low_stock: find_low_stock(inventory),
        }
    }

    pub fn from_store(store: &dyn KitchenStore, day: MealDay) -> Result<Self, StoreError> {
        Ok(Self::build(
            day,
            &store.fetch_menu_plan()?,
            &store.fetch_recipe_ingredients()?,
            &store.fetch_inventory()?,
        ))
    }
}

impl fmt::Display for DailyOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Today's Plan: {}", self.day)?;
        for overview in &self.meals {
            match &overview.planned {
                Some(planned) => writeln!(
                    f,
                    "  {} {:<10} {} (x{}) - {}",
                    planned.status.icon(),
                    overview.meal,
                    planned.dish,
                    planned.num_persons,
                    planned.status
                )?,
                None => writeln!(f, "  ⚪ {:<10} Not Planned", overview.meal)?,
            }
        }
        writeln!(f)?;
        writeln!(f, "What's Running Low?")?;
        if self.low_stock.is_empty() {
            writeln!(f, "  Your inventory looks well-stocked!")?;
        }
        for alert in &self.low_stock {
            writeln!(f, "  - {}: {} {}", alert.item_name, alert.quantity, alert.unit)?;
        }
        Ok(())
    }
}

/// The weekly plan as a day x meal grid, Monday first.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyTimetable {
    rows: Vec<(MealDay, [Option<String>; 3])>,
}

impl WeeklyTimetable {
    pub fn build(menu: &[PlannedMeal]) -> Self {
        let rows = MealDay::ALL
            .iter()
            .map(|&day| {
                let mut slots: [Option<String>; 3] = Default::default();
                for (slot, meal) in slots.iter_mut().zip(MealTime::ALL) {
                    *slot = menu
                        .iter()
                        .find(|m| m.day == day && m.meal == meal)
                        .map(|m| m.recipe_name.clone());
                }
                (day, slots)
            })
            .collect();
        Self { rows }
    }

    pub fn dish(&self, day: MealDay, meal: MealTime) -> Option<&str> {
        let (_, slots) = self.rows.iter().find(|(d, _)| *d == day)?;
        let index = MealTime::ALL.iter().position(|m| *m == meal)?;
        slots[index].as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|(_, slots)| slots.iter().all(Option::is_none))
    }
}

impl fmt::Display for WeeklyTimetable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10} | {:<22} | {:<22} | {:<22}", "", "Breakfast", "Lunch", "Dinner")?;
        for (day, slots) in &self.rows {
            let cells: Vec<&str> = slots.iter().map(|s| s.as_deref().unwrap_or(EMPTY_SLOT)).collect();
            writeln!(f, "{:<10} | {:<22} | {:<22} | {:<22}", day, cells[0], cells[1], cells[2])?;
        }
        Ok(())
    }
}
