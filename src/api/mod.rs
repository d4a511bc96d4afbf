//! Remote retrieval of budget CSV extracts.
//!
//! Government portals publish extracts under a year-parameterized base URL.
//! `RemoteSource` builds candidate URLs from the configured endpoint template
//! and fetches them with a bounded per-request timeout.

use crate::Result;
use anyhow::Context;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// A client for the remote budget endpoint.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    endpoint_template: String,
}

impl RemoteSource {
    /// Creates a client for `endpoint_template`, a URL containing a `{year}`
    /// placeholder. `timeout` bounds each probe attempt.
    pub fn new(endpoint_template: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Unable to build the HTTP client")?;
        Ok(Self {
            client,
            endpoint_template: endpoint_template.into(),
        })
    }

    /// Builds the URL for `filename` under the endpoint for `year`.
    pub fn url_for(&self, year: i32, filename: &str) -> Result<Url> {
        let mut base = self.endpoint_template.replace("{year}", &year.to_string());
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).with_context(|| {
            format!(
                "The endpoint template '{}' is not a valid URL",
                self.endpoint_template
            )
        })?;
        base.join(filename)
            .with_context(|| format!("Unable to append '{filename}' to '{base}'"))
    }

    /// Fetches one candidate file as text.
    ///
    /// Returns `Ok(None)` when the file is not there (HTTP 404). Any other
    /// failure is an error for the caller to log and move past.
    pub async fn fetch_csv(&self, year: i32, filename: &str) -> Result<Option<String>> {
        let url = self.url_for(year, filename)?;
        debug!("Probing {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("The request to {url} failed"))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response
            .error_for_status()
            .with_context(|| format!("The request to {url} was rejected"))?
            .text()
            .await
            .with_context(|| format!("Unable to read the body from {url}"))?;
        Ok(Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(template: &str) -> RemoteSource {
        RemoteSource::new(template, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_url_for_substitutes_year() {
        let remote = source("https://example.org/budgets/{year}");
        let url = remote.url_for(2024, "liquidacion.csv").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/budgets/2024/liquidacion.csv"
        );
    }

    #[test]
    fn test_url_for_tolerates_trailing_slash() {
        let remote = source("https://example.org/budgets/{year}/");
        let url = remote.url_for(2024, "presupuesto.csv").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/budgets/2024/presupuesto.csv"
        );
    }

    #[test]
    fn test_url_for_rejects_garbage_template() {
        let remote = source("not a url {year}");
        assert!(remote.url_for(2024, "presupuesto.csv").is_err());
    }
}
