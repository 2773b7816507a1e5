//! Page fetching.
//!
//! `TableSource` is the seam between the extractors and the network: the
//! production implementation fetches over HTTP, tests feed fixture HTML.

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::config::Settings;
use crate::data::html::parse_tables;
use crate::data::text::repair_mojibake;
use crate::domain::RawTable;
use crate::error::{AppError, ErrorKind};

pub trait TableSource {
    /// Return every table on the page at `url`, in document order.
    fn fetch_tables(&self, url: &str) -> Result<Vec<RawTable>, AppError>;
}

pub struct PageClient {
    client: Client,
}

impl PageClient {
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| AppError::new(ErrorKind::Fetch, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// GET `url` and return the body decoded with the charset the server declares.
    pub fn fetch_html(&self, url: &str) -> Result<String, AppError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::new(ErrorKind::Fetch, format!("Request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                ErrorKind::Fetch,
                format!("Request to {url} failed with status {}.", resp.status()),
            ));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::new(ErrorKind::Fetch, format!("Failed to read body of {url}: {e}")))?;
        debug!(url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}

impl TableSource for PageClient {
    fn fetch_tables(&self, url: &str) -> Result<Vec<RawTable>, AppError> {
        let body = self.fetch_html(url)?;
        let tables = parse_tables(&repair_mojibake(&body));
        info!(url, tables = tables.len(), "parsed tables");
        Ok(tables)
    }
}

/// A fixed HTML document served for any URL.
pub struct StaticPage {
    html: String,
}

impl StaticPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl TableSource for StaticPage {
    fn fetch_tables(&self, _url: &str) -> Result<Vec<RawTable>, AppError> {
        Ok(parse_tables(&repair_mojibake(&self.html)))
    }
}
