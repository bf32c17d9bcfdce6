//! Command-line front-end: argument parsing and command dispatch.

pub mod output;
pub mod render;

use std::collections::{HashMap, HashSet};
use std::env;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::ConfigManager;
use crate::core::{resolve_today, FinancialStore, LoadOrigin, SystemClock};
use crate::currency::{format_input_number, parse_decimal};
use crate::domain::{
    Displayable, Inputs, InputsPatch, ItemDraft, ItemId, ItemKind, ItemPatch, NamedEntity,
};
use crate::errors::CliError;
use crate::storage::JsonStorage;

pub type CliResult<T> = Result<T, CliError>;

const BOOLEAN_FLAGS: &[&str] = &["inactive", "help"];

pub const USAGE: &str = "\
Usage: finanzplaner [command] [options]

Commands:
  overview [--date YYYY-MM-DD]          Projection until month-end (default)
  details  [--date YYYY-MM-DD]          Day-by-day breakdown of pending items
  items                                 List all recurring items
  add <name> <amount> <day> <income|expense> [--inactive]
  update <id> [--name N] [--amount A] [--day D] [--type T] [--active true|false]
  toggle <id>                           Switch an item between active and inactive
  activate <id> | deactivate <id>
  delete <id>
  inputs [--kontostand X] [--bargeld X] [--bekomme X]
  reset                                 Replace all items with the default list
  help";

/// Positional arguments plus `--key value` options and `--flag` switches.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub command: Option<String>,
    pub positional: Vec<String>,
    pub options: HashMap<String, String>,
    pub flags: HashSet<String>,
}

impl ParsedArgs {
    pub fn parse<I>(args: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            if let Some(key) = arg.strip_prefix("--") {
                if BOOLEAN_FLAGS.contains(&key) {
                    parsed.flags.insert(key.to_string());
                    continue;
                }
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Usage(format!("option --{key} needs a value")))?;
                parsed.options.insert(key.to_string(), value);
            } else if parsed.command.is_none() {
                parsed.command = Some(arg);
            } else {
                parsed.positional.push(arg);
            }
        }
        Ok(parsed)
    }

    fn positional(&self, index: usize, name: &str) -> CliResult<&str> {
        self.positional
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CliError::Usage(format!("missing <{name}>")))
    }

    fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// Entry point used by the binary.
pub fn run_cli() -> CliResult<()> {
    let args = ParsedArgs::parse(env::args().skip(1))?;
    if args.flags.contains("help") || matches!(args.command.as_deref(), Some("help" | "-h")) {
        println!("{USAGE}");
        return Ok(());
    }

    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    crate::init_with_filter(&config.log_filter);
    if !manager.path().exists() {
        manager.save(&config)?;
        info!(path = %manager.path().display(), "wrote default configuration");
    }
    let timezone = config.timezone()?;

    let storage = JsonStorage::new(config.resolve_data_dir(manager.base_dir()))?;
    debug!(root = %storage.root().display(), "using data directory");
    let mut store = FinancialStore::open(Box::new(storage));
    if store.origin() == LoadOrigin::Recovered {
        output::warning("Gespeicherte Posten konnten nicht gelesen werden, Standardliste wird verwendet.");
    }

    let today = match args.option("date") {
        Some(raw) => parse_date(raw)?,
        None => resolve_today(&SystemClock, timezone),
    };

    execute(&args, &mut store, today)
}

/// Runs one parsed command against the store.
pub fn execute(args: &ParsedArgs, store: &mut FinancialStore, today: NaiveDate) -> CliResult<()> {
    match args.command.as_deref().unwrap_or("overview") {
        "overview" => print!("{}", render::overview(&store.snapshot(), today)),
        "details" => print!("{}", render::details(&store.snapshot(), today)),
        "items" => print!("{}", render::items(store.items())),
        "add" => {
            let mut draft = ItemDraft::new(
                args.positional(0, "name")?,
                parse_amount(args.positional(1, "amount")?)?,
                parse_day(args.positional(2, "day")?)?,
                args.positional(3, "income|expense")?.parse::<ItemKind>()?,
            );
            if args.flags.contains("inactive") {
                draft = draft.inactive();
            }
            let id = store.add_item(draft)?;
            store.flush()?;
            output::success(format!("Posten angelegt: {id}"));
        }
        "update" => {
            let id = ItemId::from(args.positional(0, "id")?);
            let patch = ItemPatch {
                name: args.option("name").map(str::to_string),
                amount: args.option("amount").map(parse_amount).transpose()?,
                day_of_month: args.option("day").map(parse_day).transpose()?,
                kind: args
                    .option("type")
                    .map(str::parse::<ItemKind>)
                    .transpose()?,
                active: args.option("active").map(parse_bool).transpose()?,
            };
            if patch.is_empty() {
                return Err(CliError::Usage("update needs at least one option".into()));
            }
            store.update_item(&id, patch)?;
            store.flush()?;
            output::success(format!("Posten aktualisiert: {id}"));
        }
        "toggle" => {
            let id = ItemId::from(args.positional(0, "id")?);
            let snapshot = store.toggle_item(&id)?;
            store.flush()?;
            if let Some(item) = snapshot.item(&id) {
                let state = if item.active { "aktiv" } else { "inaktiv" };
                output::success(format!("{} ist jetzt {state}", item.name()));
            }
        }
        "activate" | "deactivate" => {
            let id = ItemId::from(args.positional(0, "id")?);
            let active = args.command.as_deref() == Some("activate");
            store.set_item_active(&id, active)?;
            store.flush()?;
            if let Some(item) = store.item(&id) {
                let state = if active { "aktiv" } else { "inaktiv" };
                output::success(format!("{} ist jetzt {state}", item.name()));
            }
        }
        "delete" => {
            let removed = store.delete_item(&ItemId::from(args.positional(0, "id")?))?;
            store.flush()?;
            output::success(format!("Posten gelöscht: {}", removed.display_label()));
        }
        "inputs" => {
            let patch = InputsPatch {
                kontostand: args.option("kontostand").map(parse_amount).transpose()?,
                bargeld: args.option("bargeld").map(parse_amount).transpose()?,
                bekomme: args.option("bekomme").map(parse_amount).transpose()?,
            };
            if !patch.is_empty() {
                store.update_inputs(patch)?;
                store.flush()?;
                output::success("Eingaben wurden gespeichert!");
            }
            print!("{}", render::inputs(store.inputs()));
            println!("{}", inputs_command_line(store.inputs()));
        }
        "reset" => {
            store.reset_to_default();
            store.flush()?;
            output::success("Posten auf Standardliste zurückgesetzt.");
        }
        other => {
            return Err(CliError::Usage(format!("unknown command `{other}`\n\n{USAGE}")));
        }
    }
    Ok(())
}

fn parse_amount(raw: &str) -> CliResult<Decimal> {
    parse_decimal(raw).ok_or_else(|| CliError::Input(format!("`{raw}` is not an amount")))
}

/// Command that recreates the current inputs. Zero fields are omitted.
fn inputs_command_line(inputs: &Inputs) -> String {
    let mut line = String::from("finanzplaner inputs");
    for (flag, value) in [
        ("kontostand", inputs.kontostand),
        ("bargeld", inputs.bargeld),
        ("bekomme", inputs.bekomme),
    ] {
        let shown = format_input_number(value);
        if !shown.is_empty() {
            line.push_str(&format!(" --{flag} {shown}"));
        }
    }
    line
}

fn parse_day(raw: &str) -> CliResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CliError::Input(format!("`{raw}` is not a day of month")))
}

fn parse_bool(raw: &str) -> CliResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "ja" | "1" => Ok(true),
        "false" | "no" | "nein" | "0" => Ok(false),
        _ => Err(CliError::Input(format!("`{raw}` is not true or false"))),
    }
}

fn parse_date(raw: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d.%m.%Y"))
        .map_err(|_| CliError::Input(format!("`{raw}` is not a date (YYYY-MM-DD)")))
}
