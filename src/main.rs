// Entrypoint for the catalog CLI.
// - Builds the config (env, `.env`, then flags), an API client and a store.
// - Without a subcommand it starts the interactive menu; the subcommands
//   run a single action and exit non-zero if it fails.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nomenclature_cli::view::{render_html, render_text};
use nomenclature_cli::{ui::main_menu, ApiClient, CatalogStore, Config};

/// Browse and edit the nomenclature catalog (code/name pairs)
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// API base URL [env: NOMENCLATURE_API_URL]
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Rows per page [env: NOMENCLATURE_PAGE_SIZE]
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Request timeout in seconds [env: NOMENCLATURE_TIMEOUT_SECS]
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Log level (error, warn, info, debug, trace). RUST_LOG wins when set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive menu (default)
    Interactive,

    /// Print one page of the catalog
    List {
        /// Filter by code substring or name (case-insensitive)
        #[arg(short, long)]
        query: Option<String>,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Emit an HTML table instead of text
        #[arg(long)]
        html: bool,
    },

    /// Add an entry
    Add {
        /// Code, at least 5 digits
        code: String,
        /// Name
        name: String,
    },

    /// Delete the entry with the given code
    Delete { code: String },

    /// Bulk import a .txt file with one "code name" pair per line
    Import { file: PathBuf },
}

fn initialize_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,nomenclature_cli={log_level}")));
    // Logs go to stderr so they never mix with listings on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::from_env().context("Reading configuration from environment")?;
    if let Some(url) = &cli.base_url {
        config.set_base_url(url)?;
    }
    if let Some(size) = cli.page_size {
        config.set_page_size(size)?;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let config = build_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, page_size = config.page_size, "configured");
    let api = ApiClient::new(&config).context("Failed to build HTTP client")?;
    let mut store = CatalogStore::new(api, config.page_size);

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => main_menu(&mut store)?,
        Command::List { query, page, html } => {
            store.fetch_all()?;
            if let Some(q) = query {
                store.on_search(&q);
            }
            store.go_to_page(page.saturating_sub(1));
            let view = store.view();
            if html {
                print!("{}", render_html(&view));
            } else {
                print!("{}", render_text(&view));
            }
        }
        Command::Add { code, name } => {
            // Duplicate detection needs the current catalog.
            store.fetch_all()?;
            let entry = store.on_add_submit(&code, &name)?;
            println!("Added {} {}", entry.code, entry.name);
        }
        Command::Delete { code } => {
            store.on_delete_click(&code)?;
            println!("Deleted {code}");
        }
        Command::Import { file } => {
            let rows = store
                .import_file(&file)
                .with_context(|| format!("Importing {}", file.display()))?;
            println!(
                "Imported {rows} rows; catalog holds {} entries",
                store.entries().len()
            );
        }
    }
    Ok(())
}
