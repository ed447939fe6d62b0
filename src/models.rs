use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw country object as returned by the upstream API (loosely typed).
/// Every field the API may omit is an `Option`; unknown extra fields are
/// ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCountry {
    pub name: Option<String>,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: Option<u64>,
    pub flag: Option<String>,
    pub currencies: Option<Vec<RawCurrency>>,
}

/// One entry of the upstream currency list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCurrency {
    pub code: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Reasons a single upstream object is rejected during refresh.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("missing or empty country name")]
    MissingName,
    #[error("malformed country object: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Tidy structure stored in the `countries` table (one row = one country,
/// keyed by name).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: Option<i64>,
    pub currency_code: Option<String>,
    pub currency_name: Option<String>,
    /// Relative to a fixed reference currency; no fetch logic exists yet.
    pub exchange_rate: Option<f64>,
    /// No derivation is defined; stays null until a computation is specified.
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl Country {
    /// Build a stored record from an upstream object. The first entry of the
    /// currency list wins (upstream order, not contractually stable). Fails
    /// only when the name is missing or blank.
    pub fn from_raw(raw: RawCountry, refreshed_at: DateTime<Utc>) -> Result<Self, SeedError> {
        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(SeedError::MissingName)?;
        let (currency_code, currency_name) = raw
            .currencies
            .and_then(|list| list.into_iter().next())
            .map(|c| (c.code, c.name))
            .unwrap_or((None, None));
        Ok(Self {
            name,
            capital: raw.capital,
            region: raw.region,
            population: raw.population.and_then(|p| i64::try_from(p).ok()),
            currency_code,
            currency_name,
            exchange_rate: None,
            estimated_gdp: None,
            flag_url: raw.flag,
            last_refreshed_at: Some(refreshed_at),
        })
    }

    /// Same as [`Country::from_raw`] starting from an untyped JSON value.
    pub fn from_value(
        value: serde_json::Value,
        refreshed_at: DateTime<Utc>,
    ) -> Result<Self, SeedError> {
        let raw: RawCountry = serde_json::from_value(value)?;
        Self::from_raw(raw, refreshed_at)
    }
}

/// Recognized GDP sort directions for the list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GdpSort {
    Asc,
    Desc,
}

impl GdpSort {
    /// Parse the `sort` query value; anything unrecognized means storage order.
    pub fn from_query(s: &str) -> Option<Self> {
        match s {
            "gdp_asc" => Some(GdpSort::Asc),
            "gdp_desc" => Some(GdpSort::Desc),
            _ => None,
        }
    }
}

/// Query parameters accepted by `GET /countries`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListFilter {
    pub region: Option<String>,
    pub currency: Option<String>,
    pub sort: Option<String>,
}

impl ListFilter {
    /// Region filter with empty strings treated as absent (`?region=`).
    pub fn region_filter(&self) -> Option<&str> {
        self.region.as_deref().filter(|s| !s.is_empty())
    }

    /// Currency-code filter with empty strings treated as absent.
    pub fn currency_filter(&self) -> Option<&str> {
        self.currency.as_deref().filter(|s| !s.is_empty())
    }

    pub fn sort_key(&self) -> Option<GdpSort> {
        self.sort.as_deref().and_then(GdpSort::from_query)
    }
}

/// Derived liveness summary; computed on demand, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Status {
    pub total_countries: i64,
    pub status: String,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}
