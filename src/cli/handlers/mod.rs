use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::controller::{Controller, ControllerEvent, HoverGate, Signal, ViewAction};
use crate::io::store::{JsonStore, MemoryStore, Store};
use crate::io::{config_io, logging};
use crate::model::Config;
use crate::tui;
use crate::tui::theme::Theme;

const LOG_FILE: &str = "tagdo.log";

type CliController<S> = Controller<S, HoverGate>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Resolve the data directory, start logging, read config, and run the
/// requested command (or the TUI when there is none).
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref())?;

    // An ephemeral session leaves the data dir alone unless asked to log
    let log_path = match (&cli.log_file, cli.ephemeral) {
        (Some(path), _) => Some(PathBuf::from(path)),
        (None, false) => Some(data_dir.join(LOG_FILE)),
        (None, true) => None,
    };
    if let Some(path) = log_path {
        logging::init_file_logging(&path)
            .map_err(|e| format!("cannot open log file '{}': {}", path.display(), e))?;
    }

    let config = config_io::read_config(&data_dir)?;
    tracing::debug!(dir = %data_dir.display(), ephemeral = cli.ephemeral, "starting");

    if cli.ephemeral {
        dispatch(cli, MemoryStore::default(), &config)
    } else {
        dispatch(cli, JsonStore::new(data_dir), &config)
    }
}

fn dispatch<S: Store>(
    cli: Cli,
    store: S,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let controller = Controller::new(store, HoverGate::default(), &config.input);

    match cli.command {
        None => tui::run(controller, Theme::from_config(&config.ui)),
        Some(cmd) => match cmd {
            Commands::Add(args) => cmd_add(controller, args, json),
            Commands::List => cmd_list(&controller, json),
            Commands::Categories => cmd_categories(&controller, json),
            Commands::Suggest(args) => cmd_suggest(controller, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

/// Drive the controller exactly as the input box would: type the text,
/// confirm the highlighted category if a tag is open, then confirm the
/// remaining text.
fn cmd_add<S: Store>(
    mut controller: CliController<S>,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    controller.apply(ViewAction::FocusInput);
    controller.set_text(args.text.as_str());

    if controller.is_tagging() {
        if controller.candidates().is_empty() {
            return Err(format!(
                "no category matches '{}{}'",
                controller.trigger(),
                controller.input().tag_query
            )
            .into());
        }
        controller.handle_signal(Signal::Confirm);
        controller.drain();
        controller.apply(ViewAction::FocusInput);
    }

    controller.handle_signal(Signal::Confirm);
    let events = controller.drain();
    let (action, id) = events
        .into_iter()
        .find_map(|event| match event {
            ControllerEvent::ItemCreated(id) => Some(("created", id)),
            ControllerEvent::ItemReused { id, .. } => Some(("moved", id)),
            _ => None,
        })
        .ok_or("nothing to add: todo text is empty")?;

    let item = controller
        .items()
        .iter()
        .find(|i| i.id == id)
        .ok_or_else(|| format!("todo not found after add: {}", id))?;

    if json {
        let out = AddJson {
            action,
            item: item_to_json(item, controller.categories()),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let category = controller
            .category(&item.category)
            .map(|c| c.name.as_str())
            .unwrap_or("?");
        println!("{} {} [{}]", action, item.name, category);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list<S: Store>(
    controller: &CliController<S>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = controller.items();
    let categories = controller.categories();

    if json {
        let out: Vec<ItemJson> = items
            .iter()
            .map(|i| item_to_json(i, categories))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let name_w = name_width(items);
        for item in items {
            println!("{}", format_item_line(item, categories, name_w));
        }
    }
    Ok(())
}

fn cmd_categories<S: Store>(
    controller: &CliController<S>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let active = controller.active_category().map(|c| c.id.clone());

    if json {
        let out: Vec<CategoryJson> = controller
            .categories()
            .iter()
            .map(|c| category_to_json(c, Some(&c.id) == active.as_ref()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for category in controller.categories() {
            let marker = if Some(&category.id) == active.as_ref() {
                "*"
            } else {
                " "
            };
            println!("{} {:<12} {}", marker, category.id.as_str(), category.name);
        }
    }
    Ok(())
}

fn cmd_suggest<S: Store>(
    mut controller: CliController<S>,
    args: SuggestArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    controller.apply(ViewAction::FocusInput);
    controller.set_text(args.text.as_str());

    let out = if controller.is_tagging() {
        SuggestJson::Categories {
            query: controller.input().tag_query.clone(),
            categories: controller
                .filtered_categories()
                .iter()
                .map(|c| category_to_json(c, false))
                .collect(),
        }
    } else {
        SuggestJson::Items {
            query: controller.input().suggestion_query().to_string(),
            items: controller
                .suggestions()
                .iter()
                .map(|i| item_to_json(i, controller.categories()))
                .collect(),
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    match out {
        SuggestJson::Categories { categories, .. } => {
            for c in categories {
                println!("{}{}", controller.trigger(), c.name);
            }
        }
        SuggestJson::Items { items, .. } => {
            for i in items {
                println!("{}", i.name);
            }
        }
    }
    Ok(())
}
