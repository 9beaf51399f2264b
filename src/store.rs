// The catalog controller. `CatalogStore` owns the in-memory state and
// exposes one method per user command. Rendering is left to callers,
// which read the state back through [`CatalogStore::view`].

use std::path::Path;

use tracing::{debug, info, warn};

use crate::api::CatalogApi;
use crate::catalog::{self, CatalogEntry};
use crate::error::{CatalogError, Result};
use crate::view::PageView;

/// Draft contents of the add form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub code: String,
    pub name: String,
}

impl AddForm {
    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.name.is_empty()
    }
}

pub struct CatalogStore<A> {
    api: A,
    entries: Vec<CatalogEntry>,
    page: usize,
    search_query: String,
    page_size: usize,
    add_form: AddForm,
}

impl<A: CatalogApi> CatalogStore<A> {
    /// An empty store. Call [`fetch_all`](Self::fetch_all) to load data.
    /// A `page_size` of 0 is treated as 1.
    pub fn new(api: A, page_size: usize) -> Self {
        Self {
            api,
            entries: Vec::new(),
            page: 0,
            search_query: String::new(),
            page_size: page_size.max(1),
            add_form: AddForm::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn add_form(&self) -> &AddForm {
        &self.add_form
    }

    /// Entries visible under the current search query.
    pub fn filtered(&self) -> Vec<&CatalogEntry> {
        catalog::filter_entries(&self.entries, &self.search_query)
    }

    /// Reload the whole catalog. On failure nothing changes.
    pub fn fetch_all(&mut self) -> Result<usize> {
        let entries = self.api.fetch_all()?;
        info!(count = entries.len(), "catalog loaded");
        self.entries = entries;
        self.page = 0;
        Ok(self.entries.len())
    }

    pub fn on_search(&mut self, query: &str) {
        debug!(query, "search");
        self.search_query = query.to_string();
        self.page = 0;
    }

    pub fn next_page(&mut self) -> bool {
        let len = self.filtered().len();
        if catalog::has_next_page(len, self.page, self.page_size) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if catalog::has_prev_page(self.page) {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a zero-based page, clamped to the last page.
    pub fn go_to_page(&mut self, page: usize) {
        let last = catalog::last_page(self.filtered().len(), self.page_size);
        self.page = page.min(last);
    }

    /// Validate and submit a new entry.
    ///
    /// The submitted values are kept as the form draft until the server
    /// accepts the entry. Validation failures never reach the network.
    pub fn on_add_submit(&mut self, code: &str, name: &str) -> Result<CatalogEntry> {
        self.add_form = AddForm {
            code: code.to_string(),
            name: name.to_string(),
        };
        let entry = catalog::validate_new_entry(code, name, &self.entries)?;
        self.api.add(&entry)?;
        info!(code = %entry.code, "entry added");
        self.entries.push(entry.clone());
        self.add_form = AddForm::default();
        self.page = 0;
        Ok(entry)
    }

    /// Delete the entry with `code`. Only the first local match is removed.
    pub fn on_delete_click(&mut self, code: &str) -> Result<()> {
        self.api.delete(code)?;
        if let Some(pos) = self.entries.iter().position(|e| e.code == code) {
            self.entries.remove(pos);
        }
        info!(code, "entry deleted");
        self.page = 0;
        Ok(())
    }

    /// Parse `text` as an import file, send every row, then reload the
    /// catalog from the server. Returns the number of rows sent.
    ///
    /// A failed reload after an accepted import is reported as
    /// [`CatalogError::ImportReload`], so callers can tell the two apart.
    pub fn on_import_text(&mut self, text: &str) -> Result<usize> {
        let rows = catalog::parse_import(text);
        self.api.import(&rows)?;
        let sent = rows.len();
        info!(rows = sent, "import accepted");
        if let Err(source) = self.fetch_all() {
            warn!(rows = sent, error = %source, "reload after import failed");
            return Err(CatalogError::ImportReload {
                rows: sent,
                source: Box::new(source),
            });
        }
        Ok(sent)
    }

    /// Read a UTF-8 text file and import it.
    pub fn import_file(&mut self, path: &Path) -> Result<usize> {
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = text.len(), "import file read");
        self.on_import_text(&text)
    }

    /// The rows and navigation state for the current page.
    pub fn view(&self) -> PageView {
        let filtered = self.filtered();
        let len = filtered.len();
        let rows = catalog::paginate(&filtered, self.page, self.page_size)
            .iter()
            .map(|e| (*e).clone())
            .collect();
        PageView {
            rows,
            page: self.page,
            total_pages: catalog::page_count(len, self.page_size),
            filtered_count: len,
            offset: (self.page * self.page_size).min(len),
            has_prev: catalog::has_prev_page(self.page),
            has_next: catalog::has_next_page(len, self.page, self.page_size),
        }
    }
}
