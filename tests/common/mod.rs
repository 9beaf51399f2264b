// Shared helpers for the integration tests: a hand-rolled in-memory
// backend implementing `CatalogApi` and one-time log setup.

#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Once;

use nomenclature_cli::error::Result;
use nomenclature_cli::{Action, CatalogApi, CatalogEntry, CatalogError};
use reqwest::StatusCode;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Fake backend holding its own copy of the catalog.
///
/// Every call is recorded by name. Actions listed in `failing` answer with
/// a 500 and leave the server copy alone.
#[derive(Default)]
pub struct MockApi {
    server: RefCell<Vec<CatalogEntry>>,
    failing: RefCell<Vec<Action>>,
    calls: RefCell<Vec<String>>,
    last_import: RefCell<Vec<CatalogEntry>>,
}

impl MockApi {
    pub fn with_entries(entries: Vec<CatalogEntry>) -> Self {
        let api = Self::default();
        *api.server.borrow_mut() = entries;
        api
    }

    pub fn fail(&self, action: Action) {
        self.failing.borrow_mut().push(action);
    }

    pub fn recover(&self) {
        self.failing.borrow_mut().clear();
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.as_str() == name).count()
    }

    pub fn server_entries(&self) -> Vec<CatalogEntry> {
        self.server.borrow().clone()
    }

    pub fn last_import(&self) -> Vec<CatalogEntry> {
        self.last_import.borrow().clone()
    }

    fn enter(&self, action: Action, name: &str) -> Result<()> {
        self.calls.borrow_mut().push(name.to_string());
        if self.failing.borrow().contains(&action) {
            return Err(CatalogError::Status {
                action,
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "simulated failure".into(),
            });
        }
        Ok(())
    }
}

impl CatalogApi for MockApi {
    fn fetch_all(&self) -> Result<Vec<CatalogEntry>> {
        self.enter(Action::Fetch, "fetch")?;
        Ok(self.server.borrow().clone())
    }

    fn add(&self, entry: &CatalogEntry) -> Result<()> {
        self.enter(Action::Add, "add")?;
        self.server.borrow_mut().push(entry.clone());
        Ok(())
    }

    fn delete(&self, code: &str) -> Result<()> {
        self.enter(Action::Delete, "delete")?;
        self.server.borrow_mut().retain(|e| e.code != code);
        Ok(())
    }

    fn import(&self, entries: &[CatalogEntry]) -> Result<()> {
        self.enter(Action::Import, "import")?;
        *self.last_import.borrow_mut() = entries.to_vec();
        self.server.borrow_mut().extend_from_slice(entries);
        Ok(())
    }
}

/// `n` entries with six-digit codes starting at 100000.
pub fn numbered_entries(n: usize) -> Vec<CatalogEntry> {
    (0..n)
        .map(|i| CatalogEntry::new(format!("{}", 100000 + i), format!("Item {i}")))
        .collect()
}
