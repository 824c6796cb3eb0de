use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::model::{MealDay, MealTime};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pantry, menu and shopping basket for your kitchen", long_about = None)]
pub struct Cli {
    /// Path to the kitchen data file (defaults to $FRIDGE_DATA_FILE or fridge_data.json)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Treat this day as today instead of the local clock's weekday
    #[arg(long, global = true)]
    pub day: Option<MealDay>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Today's meals with their availability, plus what is running low
    Home,
    /// Shopping list for today and tomorrow
    Basket {
        /// Add the shortfall of this item to the stock
        #[arg(long, conflicts_with = "add_all")]
        add: Option<String>,
        /// Add every shortfall to the stock
        #[arg(long)]
        add_all: bool,
    },
    /// Check whether a dish can be cooked
    Status {
        dish: String,
        #[arg(short, long, default_value_t = 2)]
        persons: u32,
    },
    /// Manage the inventory
    #[command(subcommand)]
    Stock(StockCommand),
    /// Manage recipes
    #[command(subcommand)]
    Recipe(RecipeCommand),
    /// Manage the weekly menu
    #[command(subcommand)]
    Menu(MenuCommand),
    /// Bulk import from CSV
    #[command(subcommand)]
    Import(ImportCommand),
    /// Replace the data file with the demo kitchen
    Seed {
        /// Overwrite a data file that already holds data
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum StockCommand {
    List,
    Add {
        name: String,
        quantity: f64,
        #[arg(default_value = "kg")]
        unit: String,
    },
    /// Set quantities, e.g. `stock set 3=1.5 7=12`
    Set {
        #[arg(required = true, value_parser = parse_edit)]
        edits: Vec<(u32, f64)>,
    },
    Delete { inventory_id: u32 },
    /// Items under their low-stock threshold
    Low,
}

#[derive(Subcommand, Debug)]
pub enum RecipeCommand {
    List,
    Show { name: String },
    /// Create or replace a recipe, e.g. `recipe save Khichdi -i Rice=0.1:kg -i "Moong dal=0.05:kg"`
    Save {
        name: String,
        #[arg(short, long = "ingredient", value_parser = parse_ingredient)]
        ingredients: Vec<IngredientArg>,
    },
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum MenuCommand {
    /// Weekly timetable
    Show,
    Set {
        weekday: MealDay,
        meal: MealTime,
        recipe: String,
        #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
        persons: u32,
    },
    Clear { weekday: MealDay, meal: MealTime },
}

#[derive(Subcommand, Debug)]
pub enum ImportCommand {
    /// CSV with recipe_name,item_name,quantity_per_person,unit
    Recipes { file: PathBuf },
    /// CSV with item_name,quantity,unit
    Inventory { file: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientArg {
    pub item_name: String,
    pub quantity_per_person: f64,
    pub unit: String,
}

/// `NAME=QTY[:UNIT]`, unit defaulting to kg.
fn parse_ingredient(s: &str) -> Result<IngredientArg, String> {
    let (name, rest) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=QTY[:UNIT], got '{}'", s))?;
    let (qty, unit) = rest.split_once(':').unwrap_or((rest, "kg"));
    let quantity_per_person = qty
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid quantity '{}': {}", qty, e))?;
    if name.trim().is_empty() {
        return Err(format!("missing ingredient name in '{}'", s));
    }
    Ok(IngredientArg {
        item_name: name.trim().to_string(),
        quantity_per_person,
        unit: unit.trim().to_string(),
    })
}

/// `ID=QTY`
fn parse_edit(s: &str) -> Result<(u32, f64), String> {
    let (id, qty) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got '{}'", s))?;
    let id = id.trim().parse::<u32>().map_err(|e| format!("invalid id '{}': {}", id, e))?;
    let qty = qty.trim().parse::<f64>().map_err(|e| format!("invalid quantity '{}': {}", qty, e))?;
    Ok((id, qty))
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient() {
        let arg = parse_ingredient("Moong dal=0.05:kg").unwrap();
        assert_eq!(arg.item_name, "Moong dal");
        assert_eq!(arg.quantity_per_person, 0.05);
        assert_eq!(arg.unit, "kg");

        assert_eq!(parse_ingredient("Egg=2:pcs").unwrap().unit, "pcs");
        assert_eq!(parse_ingredient("Rice=0.1").unwrap().unit, "kg");
        assert!(parse_ingredient("Rice").is_err());
        assert!(parse_ingredient("=0.1").is_err());
    }

    #[test]
    fn test_parse_edit() {
        assert_eq!(parse_edit("3=1.5"), Ok((3, 1.5)));
        assert!(parse_edit("x=1").is_err());
    }

    #[test]
    fn test_cli_parses_basket_with_day_override() {
        let cli = Cli::try_parse_from(["fridge_planner", "basket", "--day", "sunday", "--add-all"]).unwrap();
        assert_eq!(cli.day, Some(MealDay::Sunday));
        assert!(matches!(cli.command, Command::Basket { add: None, add_all: true }));
    }

    #[test]
    fn test_cli_parses_menu_set() {
        let cli = Cli::try_parse_from(["fridge_planner", "menu", "set", "Monday", "lunch", "Veg Pulao", "-p", "3"]).unwrap();
        match cli.command {
            Command::Menu(MenuCommand::Set { weekday, meal, recipe, persons }) => {
                assert_eq!(weekday, MealDay::Monday);
                assert_eq!(meal, MealTime::Lunch);
                assert_eq!(recipe, "Veg Pulao");
                assert_eq!(persons, 3);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
