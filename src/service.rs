//! Refresh orchestration and the derived status summary.
//!
//! Refresh is the only write path besides delete-by-name: it re-pulls the
//! full upstream set, wipes the table, and re-inserts row by row. The wipe
//! and the inserts are not one transaction; a crash mid-refresh can leave the
//! store empty or partially populated (acknowledged gap).

use crate::api::Client;
use crate::db::Db;
use crate::error::ServiceError;
use crate::models::{Country, Status};
use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;
use serde_json::Value;

/// Counts reported by one refresh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    pub inserted: usize,
    pub failed: usize,
}

/// Convert raw upstream objects into storable records, stamping each with
/// `refreshed_at`. Rejected objects (malformed, missing name) are counted,
/// never fatal.
pub fn parse_countries(values: Vec<Value>, refreshed_at: DateTime<Utc>) -> (Vec<Country>, usize) {
    let mut parsed = Vec::with_capacity(values.len());
    let mut failed = 0;
    for value in values {
        match Country::from_value(value, refreshed_at) {
            Ok(country) => parsed.push(country),
            Err(err) => {
                warn!("skipping country object: {err}");
                failed += 1;
            }
        }
    }
    (parsed, failed)
}

/// Replace the whole record set from upstream.
///
/// Fails with [`ServiceError::UpstreamUnavailable`] when the remote call does
/// not return a success status (no retry) and with
/// [`ServiceError::StoreUnavailable`] when the table cannot be wiped. A
/// single row failing to parse or insert never aborts the batch; it adds to
/// the failure tally and the loop continues.
pub fn refresh(db: &Db, upstream: &Client) -> Result<RefreshOutcome, ServiceError> {
    let values = upstream
        .fetch_all()
        .map_err(|err| ServiceError::UpstreamUnavailable(format!("{err:#}")))?;
    let started_at = Utc::now();

    db.wipe()?;

    let (countries, mut failed) = parse_countries(values, started_at);
    let mut inserted = 0;
    for country in &countries {
        match db.insert(country) {
            Ok(()) => inserted += 1,
            Err(err) => {
                warn!("insert of '{}' failed: {err}", country.name);
                failed += 1;
            }
        }
    }

    Ok(RefreshOutcome { inserted, failed })
}

/// Row count plus a constant liveness marker; no real health check happens.
pub fn status(db: &Db) -> Result<Status, ServiceError> {
    Ok(Status {
        total_countries: db.count()?,
        status: "active".to_string(),
        last_refreshed_at: db.last_refreshed()?,
    })
}
