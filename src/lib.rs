// Library root
// -----------
// The catalog client as a library. The binary (`main.rs`) wires these
// modules into one-shot commands and the interactive menu.
//
// Module responsibilities:
// - `catalog`: entry type and pure logic (search, pagination, add-form
//   validation, import parsing, markup escaping).
// - `api`: the `CatalogApi` seam and its blocking HTTP implementation.
// - `store`: `CatalogStore`, which owns the in-memory state and exposes
//   one method per user command.
// - `view`: page projection plus text and HTML renderers.
// - `config`, `error`: settings and error types.
// - `ui`: terminal menu flows; delegates everything to `store`.
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod store;
pub mod ui;
pub mod view;

pub use api::{ApiClient, CatalogApi};
pub use catalog::CatalogEntry;
pub use config::Config;
pub use error::{Action, CatalogError, ValidationError};
pub use store::CatalogStore;
