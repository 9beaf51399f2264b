// API client module: a small blocking HTTP client for the nomenclature
// backend. The `CatalogApi` trait is the seam the store talks through, so
// the store can be driven by an in-memory fake in tests.

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use tracing::{debug, warn};

use crate::catalog::CatalogEntry;
use crate::config::Config;
use crate::error::{Action, CatalogError, Result};

/// The four endpoints of the nomenclature backend.
///
/// Every call is a single request/response round trip with no retry. A
/// call returns `Ok` only for a 2xx response.
pub trait CatalogApi {
    /// `GET /api/nomenclature`
    fn fetch_all(&self) -> Result<Vec<CatalogEntry>>;

    /// `POST /api/add` with `{code, name}`.
    fn add(&self, entry: &CatalogEntry) -> Result<()>;

    /// `DELETE /api/delete/{code}`
    fn delete(&self, code: &str) -> Result<()>;

    /// `POST /api/import` with the whole list as a JSON array.
    fn import(&self, entries: &[CatalogEntry]) -> Result<()>;
}

/// reqwest-backed implementation of [`CatalogApi`].
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the backend described by `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(ApiClient {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(&Config::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `segments` to the base URL. Each segment is percent-encoded,
    /// so a code can never escape its path position.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turn a non-2xx response into [`CatalogError::Status`], keeping the
/// server's body text for the message.
fn check_status(action: Action, res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        debug!(%status, %action, "request succeeded");
        return Ok(res);
    }
    let body = res.text().unwrap_or_default();
    warn!(%status, %action, body = %body, "request rejected by server");
    Err(CatalogError::Status {
        action,
        status,
        body,
    })
}

fn send_failed(action: Action) -> impl FnOnce(reqwest::Error) -> CatalogError {
    move |source| {
        warn!(%action, error = %source, "request failed");
        CatalogError::Request { action, source }
    }
}

impl CatalogApi for ApiClient {
    fn fetch_all(&self) -> Result<Vec<CatalogEntry>> {
        let action = Action::Fetch;
        let url = self.endpoint(&["api", "nomenclature"])?;
        debug!(%url, "GET");
        let res = self.client.get(url).send().map_err(send_failed(action))?;
        let entries: Vec<CatalogEntry> = check_status(action, res)?
            .json()
            .map_err(send_failed(action))?;
        debug!(count = entries.len(), "catalog received");
        Ok(entries)
    }

    fn add(&self, entry: &CatalogEntry) -> Result<()> {
        let action = Action::Add;
        let url = self.endpoint(&["api", "add"])?;
        debug!(%url, code = %entry.code, "POST");
        let res = self
            .client
            .post(url)
            .json(entry)
            .send()
            .map_err(send_failed(action))?;
        check_status(action, res)?;
        Ok(())
    }

    fn delete(&self, code: &str) -> Result<()> {
        let action = Action::Delete;
        let url = self.endpoint(&["api", "delete", code])?;
        debug!(%url, "DELETE");
        let res = self
            .client
            .delete(url)
            .send()
            .map_err(send_failed(action))?;
        check_status(action, res)?;
        Ok(())
    }

    fn import(&self, entries: &[CatalogEntry]) -> Result<()> {
        let action = Action::Import;
        let url = self.endpoint(&["api", "import"])?;
        debug!(%url, rows = entries.len(), "POST");
        let res = self
            .client
            .post(url)
            .json(entries)
            .send()
            .map_err(send_failed(action))?;
        check_status(action, res)?;
        Ok(())
    }
}
