// UI layer: an interactive menu built on `dialoguer`. Each menu entry maps
// to one store command; the outcome is printed as a notification and the
// loop carries on, whatever happened.

use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::CatalogApi;
use crate::error::CatalogError;
use crate::store::CatalogStore;
use crate::view::render_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    NextPage,
    PrevPage,
    Search,
    Add,
    Delete,
    Import,
    Refresh,
    Exit,
}

/// Run the menu until the user picks "Exit". Loads the catalog first.
///
/// `Select::interact()` is keyboard-driven: arrow keys and Enter.
pub fn main_menu<A: CatalogApi>(store: &mut CatalogStore<A>) -> Result<()> {
    refresh(store)?;
    loop {
        print_page(store);

        let view = store.view();
        let mut actions = Vec::new();
        if view.has_next {
            actions.push(("Next page", MenuAction::NextPage));
        }
        if view.has_prev {
            actions.push(("Previous page", MenuAction::PrevPage));
        }
        actions.push(("Search", MenuAction::Search));
        actions.push(("Add entry", MenuAction::Add));
        if !view.rows.is_empty() {
            actions.push(("Delete entry", MenuAction::Delete));
        }
        actions.push(("Import .txt", MenuAction::Import));
        actions.push(("Refresh", MenuAction::Refresh));
        actions.push(("Exit", MenuAction::Exit));

        let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
        let selection = Select::new().items(&labels).default(0).interact()?;
        match actions[selection].1 {
            MenuAction::NextPage => {
                store.next_page();
            }
            MenuAction::PrevPage => {
                store.prev_page();
            }
            MenuAction::Search => handle_search(store)?,
            MenuAction::Add => handle_add(store)?,
            MenuAction::Delete => handle_delete(store)?,
            MenuAction::Import => handle_import(store)?,
            MenuAction::Refresh => refresh(store)?,
            MenuAction::Exit => break,
        }
    }
    Ok(())
}

fn print_page<A: CatalogApi>(store: &CatalogStore<A>) {
    println!();
    println!("{}", "Nomenclature".bold());
    if !store.search_query().is_empty() {
        println!("Search: {}", store.search_query().to_string().cyan());
    }
    print!("{}", render_text(&store.view()));
}

/// Show a spinner on stderr while `f` runs.
fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    Ok(out)
}

fn notify_ok(message: impl Display) {
    println!("{}", format!("✅ {message}").green());
}

fn notify_err(err: impl Display) {
    println!("{}", format!("❌ {err}").red());
}

fn refresh<A: CatalogApi>(store: &mut CatalogStore<A>) -> Result<()> {
    match with_spinner("Loading catalog...", || store.fetch_all())? {
        Ok(count) => notify_ok(format!("Loaded {count} entries.")),
        Err(e) => notify_err(e),
    }
    Ok(())
}

fn handle_search<A: CatalogApi>(store: &mut CatalogStore<A>) -> Result<()> {
    let query: String = Input::new()
        .with_prompt("Search by code or name (empty shows all)")
        .with_initial_text(store.search_query())
        .allow_empty(true)
        .interact_text()?;
    store.on_search(&query);
    Ok(())
}

/// Prompts start from the previous draft, so a rejected entry can be fixed
/// without retyping it.
fn handle_add<A: CatalogApi>(store: &mut CatalogStore<A>) -> Result<()> {
    let draft = store.add_form().clone();
    let code: String = Input::new()
        .with_prompt("Code (5+ digits)")
        .with_initial_text(draft.code)
        .allow_empty(true)
        .interact_text()?;
    let name: String = Input::new()
        .with_prompt("Name")
        .with_initial_text(draft.name)
        .allow_empty(true)
        .interact_text()?;

    match with_spinner("Adding...", || store.on_add_submit(&code, &name))? {
        Ok(entry) => notify_ok(format!("Entry {} added.", entry.code)),
        Err(e) => notify_err(e),
    }
    Ok(())
}

fn handle_delete<A: CatalogApi>(store: &mut CatalogStore<A>) -> Result<()> {
    let rows = store.view().rows;
    let mut labels: Vec<String> = rows
        .iter()
        .map(|r| format!("{}  {}", r.code, r.name))
        .collect();
    labels.push("Cancel".into());

    let selection = Select::new()
        .with_prompt("Entry to delete")
        .items(&labels)
        .default(labels.len() - 1)
        .interact()?;
    let Some(entry) = rows.get(selection) else {
        return Ok(());
    };
    let confirmed = Confirm::new()
        .with_prompt(format!("Delete {} ({})?", entry.code, entry.name))
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    match with_spinner("Deleting...", || store.on_delete_click(&entry.code))? {
        Ok(()) => notify_ok(format!("Entry {} deleted.", entry.code)),
        Err(e) => notify_err(e),
    }
    Ok(())
}

fn handle_import<A: CatalogApi>(store: &mut CatalogStore<A>) -> Result<()> {
    let Some(path) = pick_import_file()? else {
        return Ok(());
    };
    match with_spinner("Importing...", || store.import_file(&path))? {
        Ok(rows) => notify_ok(format!(
            "Imported {rows} rows, catalog now holds {} entries.",
            store.entries().len()
        )),
        Err(CatalogError::ImportReload { rows, source }) => {
            notify_ok(format!("Imported {rows} rows."));
            notify_err(format!("Reloading the catalog failed: {source}"));
        }
        Err(e) => notify_err(e),
    }
    Ok(())
}

/// Ask for a `.txt` file, either through the native file dialog (opened in
/// the home directory) or by typing a path. `None` means cancelled.
fn pick_import_file() -> Result<Option<PathBuf>> {
    let choices = ["Choose file in dialog", "Type a path", "Cancel"];
    let selection = Select::new()
        .with_prompt("Import file (one \"code name\" pair per line)")
        .items(&choices)
        .default(0)
        .interact()?;
    match selection {
        0 => {
            let start = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            let picked = rfd::FileDialog::new()
                .add_filter("Text", &["txt"])
                .set_directory(&start)
                .pick_file();
            if picked.is_none() {
                println!("No file chosen.");
            }
            Ok(picked)
        }
        1 => {
            let typed: String = Input::new()
                .with_prompt("Path to .txt file (empty to cancel)")
                .allow_empty(true)
                .interact_text()?;
            let typed = typed.trim();
            Ok((!typed.is_empty()).then(|| PathBuf::from(typed)))
        }
        _ => Ok(None),
    }
}
