//! countries-api
//!
//! A small HTTP service that mirrors a subset of the REST Countries
//! reference data (name, capital, region, population, currency, flag) into a
//! local Postgres table and serves it back as JSON: listing with filters and
//! GDP sorting, point lookup, deletion, a manual refresh that re-pulls from
//! upstream, and an optional PNG summary image of aggregate statistics.
//!
//! ### Example
//! ```no_run
//! use countries_api::{Config, Db, api, service};
//!
//! let config = Config::from_env()?;
//! let db = Db::connect(&config)?;
//! db.init_schema()?;
//! let outcome = service::refresh(&db, &api::Client::default())?;
//! println!("inserted {} rows ({} failed)", outcome.inserted, outcome.failed);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod summary;

pub use api::Client;
pub use config::Config;
pub use db::Db;
pub use error::{ServiceError, StoreError};
pub use models::{Country, GdpSort, ListFilter, Status};
pub use service::RefreshOutcome;
