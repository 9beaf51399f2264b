// Error types for the catalog library. The binary wraps these in
// `anyhow` (see `main.rs`); library code returns them as-is so callers
// can tell a local validation failure from a failed round trip.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Which user action a request belonged to. Used to label errors and
/// log lines the same way everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch,
    Add,
    Delete,
    Import,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Fetch => "fetching the catalog",
            Action::Add => "adding the entry",
            Action::Delete => "deleting the entry",
            Action::Import => "importing the catalog",
        };
        f.write_str(label)
    }
}

/// Rejections raised by the add form before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("fields required")]
    FieldsRequired,

    #[error("invalid code format: code must be at least 5 digits")]
    InvalidCodeFormat,

    #[error("duplicate code: an entry with code {code} already exists")]
    DuplicateCode { code: String },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport failure or an undecodable response body.
    #[error("{action} failed: {source}")]
    Request {
        action: Action,
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("{action} failed: {status} - {body}")]
    Status {
        action: Action,
        status: StatusCode,
        body: String,
    },

    /// The server accepted an import but reloading the catalog afterwards
    /// failed. Local entries still hold their pre-import contents.
    #[error("imported {rows} rows, but reloading the catalog failed: {source}")]
    ImportReload {
        rows: usize,
        source: Box<CatalogError>,
    },

    #[error("invalid API base URL: {0}")]
    InvalidUrl(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// The action a network error belongs to, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            CatalogError::Request { action, .. } | CatalogError::Status { action, .. } => {
                Some(*action)
            }
            CatalogError::ImportReload { source, .. } => source.action(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
