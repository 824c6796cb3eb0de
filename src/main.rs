use anyhow::{anyhow, Context, Result};
use fridge_planner::cli::{parse_args, Command, ImportCommand, MenuCommand, RecipeCommand, StockCommand};
use fridge_planner::config::{init_logging, AppConfig};
use fridge_planner::csv_import::{import_inventory, import_recipes, read_inventory_rows, read_recipe_rows};
use fridge_planner::dashboard::{DailyOverview, WeeklyTimetable};
use fridge_planner::engine::{add_to_stock, basket_from_store, dish_status_from_store, low_stock_from_store};
use fridge_planner::fixtures::sample_kitchen;
use fridge_planner::model::{MealDay, Recipe};
use fridge_planner::notice::Notice;
use fridge_planner::session::{RecipeEditor, StockEditor};
use fridge_planner::store::{JsonFileStore, KitchenStore};
use fridge_planner::units::format_quantity;
use log::debug;
use tokio::fs;

fn find_recipe(store: &dyn KitchenStore, name: &str) -> Result<Option<Recipe>> {
    Ok(store.list_recipes()?.into_iter().find(|r| r.name == name))
}

fn report(notice: &Notice) {
    if notice.is_error() {
        eprintln!("{}", notice);
    } else {
        println!("{}", notice);
    }
}

fn show_basket(store: &mut JsonFileStore, today: MealDay, add: Option<String>, add_all: bool) -> Result<()> {
    let basket = basket_from_store(&*store, today)?;
    let tomorrow = today.succ();
    println!("Prep basket for {} and {}", today, tomorrow);

    if basket.is_empty() {
        println!("✅ You're all set! You have all the ingredients for the next two days.");
        return Ok(());
    }

    if add_all || add.is_some() {
        let chosen: Vec<_> = basket
            .iter()
            .filter(|entry| add_all || add.as_deref() == Some(entry.item_name.as_str()))
            .collect();
        if chosen.is_empty() {
            return Err(anyhow!("'{}' is not in the basket", add.unwrap_or_default()));
        }
        for entry in chosen {
            report(&add_to_stock(store, entry));
        }
        return Ok(());
    }

    println!("Your Shopping List");
    for entry in &basket {
        println!(
            "  {:<20} need to buy {:.2} {}  (required for: {})",
            entry.item_name,
            entry.shortfall,
            entry.unit,
            entry.dishes.join(", ")
        );
    }
    Ok(())
}

fn run_stock(store: &mut JsonFileStore, command: StockCommand) -> Result<()> {
    let mut editor = StockEditor::new();
    match command {
        StockCommand::List => {
            let levels = store.fetch_inventory()?;
            if levels.is_empty() {
                println!("Your inventory is empty. Add a new item to get started!");
            }
            for level in levels {
                println!(
                    "  [{:>3}] {:<24} {:>12}  (updated {})",
                    level.inventory_id,
                    level.item_name,
                    format_quantity(level.quantity, &level.unit),
                    level.last_updated.format("%Y-%m-%d %H:%M")
                );
            }
        }
        StockCommand::Add { name, quantity, unit } => {
            report(&editor.submit_new_item(store, &name, quantity, &unit));
        }
        StockCommand::Set { edits } => {
            let levels = store.fetch_inventory()?;
            for (inventory_id, quantity) in edits {
                // Unknown ids are staged too so the save reports them.
                let original = levels
                    .iter()
                    .find(|l| l.inventory_id == inventory_id)
                    .map(|l| l.quantity)
                    .unwrap_or(f64::NAN);
                editor.stage_edit(inventory_id, original, quantity);
            }
            report(&editor.save_all(store));
        }
        StockCommand::Delete { inventory_id } => {
            report(&editor.delete(store, inventory_id));
        }
        StockCommand::Low => {
            let alerts = low_stock_from_store(&*store)?;
            if alerts.is_empty() {
                println!("Your inventory looks well-stocked!");
            }
            for alert in alerts {
                println!("  - {}: {} {}", alert.item_name, alert.quantity, alert.unit);
            }
        }
    }
    Ok(())
}

fn run_recipe(store: &mut JsonFileStore, command: RecipeCommand) -> Result<()> {
    match command {
        RecipeCommand::List => {
            for recipe in store.list_recipes()? {
                println!("  [{:>3}] {}", recipe.id, recipe.name);
            }
        }
        RecipeCommand::Show { name } => {
            let recipe = find_recipe(&*store, &name)?.ok_or_else(|| anyhow!("Recipe '{}' not found", name))?;
            let editor = RecipeEditor::load(&*store, recipe.id)?;
            println!("{} (per person)", editor.name);
            for ingredient in editor.ingredients {
                println!(
                    "  - {:<24} {} {}",
                    ingredient.item_name, ingredient.quantity_per_person, ingredient.unit
                );
            }
        }
        RecipeCommand::Save { name, ingredients } => {
            let mut editor = match find_recipe(&*store, &name)? {
                Some(recipe) => RecipeEditor {
                    recipe_id: Some(recipe.id),
                    name: recipe.name,
                    ingredients: Vec::new(),
                },
                None => RecipeEditor {
                    name,
                    ..RecipeEditor::new()
                },
            };
            for ingredient in ingredients {
                let item_id = store.ensure_stock_item(&ingredient.item_name, &ingredient.unit)?;
                let item = store
                    .list_stock_items()?
                    .into_iter()
                    .find(|i| i.id == item_id)
                    .ok_or_else(|| anyhow!("Stock item '{}' vanished", ingredient.item_name))?;
                editor.add_ingredient(&item, ingredient.quantity_per_person, &ingredient.unit);
            }
            report(&editor.save(store));
        }
        RecipeCommand::Delete { name } => {
            let recipe = find_recipe(&*store, &name)?.ok_or_else(|| anyhow!("Recipe '{}' not found", name))?;
            let mut editor = RecipeEditor::load(&*store, recipe.id)?;
            report(&editor.delete(store));
        }
    }
    Ok(())
}

fn run_menu(store: &mut JsonFileStore, command: MenuCommand) -> Result<()> {
    match command {
        MenuCommand::Show => {
            let timetable = WeeklyTimetable::build(&store.fetch_menu_plan()?);
            if timetable.is_empty() {
                println!("Your menu is empty. Add some meals with `menu set`!");
            } else {
                print!("{}", timetable);
            }
        }
        MenuCommand::Set { weekday, meal, recipe, persons } => {
            let found = find_recipe(&*store, &recipe)?.ok_or_else(|| anyhow!("Recipe '{}' not found", recipe))?;
            match store.set_menu_slot(weekday, meal, found.id, persons) {
                Ok(()) => report(&Notice::success(format!("Saved '{}' for {} {}.", found.name, weekday, meal))),
                Err(e) => report(&Notice::error(format!("Failed to save slot: {}", e))),
            }
        }
        MenuCommand::Clear { weekday, meal } => match store.clear_menu_slot(weekday, meal) {
            Ok(true) => report(&Notice::info(format!("Slot {} {} cleared.", weekday, meal))),
            Ok(false) => report(&Notice::info(format!("Slot {} {} was already empty.", weekday, meal))),
            Err(e) => report(&Notice::error(format!("Failed to clear slot: {}", e))),
        },
    }
    Ok(())
}

async fn run_import(store: &mut JsonFileStore, command: ImportCommand) -> Result<()> {
    match command {
        ImportCommand::Recipes { file } => {
            let content = fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read recipe file '{}'", file.display()))?;
            let rows = read_recipe_rows(content.as_bytes())?;
            let summary = import_recipes(store, &rows)?;
            println!(
                "Imported {} new and {} updated recipes from {}",
                summary.recipes_created,
                summary.recipes_updated,
                file.display()
            );
        }
        ImportCommand::Inventory { file } => {
            let content = fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read inventory file '{}'", file.display()))?;
            let rows = read_inventory_rows(content.as_bytes())?;
            let summary = import_inventory(store, &rows)?;
            println!("Added {} inventory rows from {}", summary.inventory_rows, file.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli_args = parse_args();
    let config = AppConfig::load(cli_args.data_file.clone());
    let today = cli_args.day.unwrap_or_else(MealDay::today);
    debug!("Using data file {:?}, today is {}", config.data_file, today);

    let mut store = JsonFileStore::open(&config.data_file)
        .with_context(|| format!("Failed to open kitchen data at '{}'", config.data_file.display()))?;

    match cli_args.command {
        Command::Home => {
            let overview = DailyOverview::from_store(&store, today)?;
            print!("{}", overview);
        }
        Command::Basket { add, add_all } => show_basket(&mut store, today, add, add_all)?,
        Command::Status { dish, persons } => {
            let status = dish_status_from_store(&store, &dish, persons)?;
            println!("{} {} for {}: {}", status.icon(), dish, persons, status);
        }
        Command::Stock(command) => run_stock(&mut store, command)?,
        Command::Recipe(command) => run_recipe(&mut store, command)?,
        Command::Menu(command) => run_menu(&mut store, command)?,
        Command::Import(command) => run_import(&mut store, command).await?,
        Command::Seed { force } => {
            let has_data = !store.list_stock_items()?.is_empty() || !store.list_recipes()?.is_empty();
            if has_data && !force {
                return Err(anyhow!(
                    "'{}' already holds kitchen data; pass --force to overwrite it",
                    store.path().display()
                ));
            }
            store.replace(sample_kitchen()?)?;
            println!("Loaded the demo kitchen into {}", store.path().display());
        }
    }

    Ok(())
}
