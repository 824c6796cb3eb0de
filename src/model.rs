use chrono::{DateTime, Datelike, Local, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type StockItemId = u32;
pub type InventoryId = u32;
pub type RecipeId = u32;

/// Master catalog entry for anything that can be stocked.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StockItem {
    pub id: StockItemId,
    pub name: String,
    pub base_unit: String,
}

/// One stocked quantity. There is at most one row per stock item.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InventoryEntry {
    pub id: InventoryId,
    pub item_id: StockItemId,
    pub quantity: f64,
    pub unit: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeIngredient {
    pub recipe_id: RecipeId,
    pub item_id: StockItemId,
    pub quantity_per_person: f64,
    pub unit: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MenuSlot {
    pub day: MealDay,
    pub meal: MealTime,
    pub recipe_id: RecipeId,
    pub num_persons: u32,
}

// Joined rows handed to the engine and the views.

/// Inventory row joined with its catalog name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StockLevel {
    pub inventory_id: InventoryId,
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeIngredientRow {
    pub recipe_name: String,
    pub item_name: String,
    pub quantity_per_person: f64,
    pub unit: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlannedMeal {
    pub day: MealDay,
    pub meal: MealTime,
    pub recipe_name: String,
    pub num_persons: u32,
}

/// Ingredient line of a single recipe, as loaded into the recipe editor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IngredientDetail {
    pub item_id: StockItemId,
    pub item_name: String,
    pub quantity_per_person: f64,
    pub unit: String,
}

/// Input line for `save_recipe`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IngredientInput {
    pub item_id: StockItemId,
    pub quantity_per_person: f64,
    pub unit: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MealDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl MealDay {
    pub const ALL: [MealDay; 7] = [
        MealDay::Monday,
        MealDay::Tuesday,
        MealDay::Wednesday,
        MealDay::Thursday,
        MealDay::Friday,
        MealDay::Saturday,
        MealDay::Sunday,
    ];

    /// The weekday of the local wall clock.
    pub fn today() -> Self {
        Local::now().weekday().into()
    }

    /// The following day. Sunday wraps to Monday since the plan is a weekly template.
    pub fn succ(self) -> Self {
        Weekday::from(self).succ().into()
    }

    pub fn name(self) -> &'static str {
        match self {
            MealDay::Monday => "Monday",
            MealDay::Tuesday => "Tuesday",
            MealDay::Wednesday => "Wednesday",
            MealDay::Thursday => "Thursday",
            MealDay::Friday => "Friday",
            MealDay::Saturday => "Saturday",
            MealDay::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for MealDay {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => MealDay::Monday,
            Weekday::Tue => MealDay::Tuesday,
            Weekday::Wed => MealDay::Wednesday,
            Weekday::Thu => MealDay::Thursday,
            Weekday::Fri => MealDay::Friday,
            Weekday::Sat => MealDay::Saturday,
            Weekday::Sun => MealDay::Sunday,
        }
    }
}

impl From<MealDay> for Weekday {
    fn from(day: MealDay) -> Self {
        match day {
            MealDay::Monday => Weekday::Mon,
            MealDay::Tuesday => Weekday::Tue,
            MealDay::Wednesday => Weekday::Wed,
            MealDay::Thursday => Weekday::Thu,
            MealDay::Friday => Weekday::Fri,
            MealDay::Saturday => Weekday::Sat,
            MealDay::Sunday => Weekday::Sun,
        }
    }
}

impl fmt::Display for MealDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for MealDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts both "Mon" and "Monday", case-insensitively
        s.trim()
            .parse::<Weekday>()
            .map(MealDay::from)
            .map_err(|_| format!("Unknown day '{}'", s))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MealTime {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealTime {
    pub const ALL: [MealTime; 3] = [MealTime::Breakfast, MealTime::Lunch, MealTime::Dinner];

    pub fn name(self) -> &'static str {
        match self {
            MealTime::Breakfast => "Breakfast",
            MealTime::Lunch => "Lunch",
            MealTime::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for MealTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealTime::ALL
            .iter()
            .copied()
            .find(|meal| meal.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown meal '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_day_succ_wraps_week() {
        assert_eq!(MealDay::Monday.succ(), MealDay::Tuesday);
        assert_eq!(MealDay::Sunday.succ(), MealDay::Monday);
    }

    #[test]
    fn test_meal_day_parsing() {
        assert_eq!("Monday".parse::<MealDay>(), Ok(MealDay::Monday));
        assert_eq!("fri".parse::<MealDay>(), Ok(MealDay::Friday));
        assert!("Someday".parse::<MealDay>().is_err());
    }

    #[test]
    fn test_meal_time_parsing() {
        assert_eq!("dinner".parse::<MealTime>(), Ok(MealTime::Dinner));
        assert!("brunch".parse::<MealTime>().is_err());
    }

    #[test]
    fn test_serializes_full_day_names() {
        let json = serde_json::to_string(&MealDay::Wednesday).unwrap();
        assert_eq!(json, "\"Wednesday\"");
    }
}
