//! Synchronous client for the REST Countries API (v2).
//!
//! One request fetches the full country list with a fixed field set; the
//! response is a single top-level JSON array, so there is no pagination to
//! handle. Non-success statuses abort immediately (the refresh contract
//! forbids retries). Network timeouts use a sane default (30s total, 10s
//! connect).

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

/// Fields requested from upstream; keep in sync with `models::RawCountry`.
const FIELDS: &str = "name,capital,region,population,flag,currencies";

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("countries-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: "https://restcountries.com/v2".into(),
            http,
        }
    }
}

impl Client {
    /// Fetch all countries as loosely-typed JSON objects.
    ///
    /// ### Errors
    /// - Network/HTTP error or non-success status (no retry)
    /// - JSON decoding error
    /// - Response body that is not a top-level array
    ///
    /// ### Example
    /// ```no_run
    /// # use countries_api::api::Client;
    /// let client = Client::default();
    /// let objects = client.fetch_all()?;
    /// println!("{} countries", objects.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn fetch_all(&self) -> Result<Vec<Value>> {
        let url = format!("{}/all?fields={}", self.base_url, FIELDS);
        let resp = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("GET {url}"))?;
        if !resp.status().is_success() {
            bail!("request failed with HTTP {}", resp.status());
        }
        let v: Value = resp.json().context("decode json")?;
        match v {
            Value::Array(items) => Ok(items),
            _ => bail!("unexpected response shape: not a top-level array"),
        }
    }
}
