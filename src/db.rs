//! Record store: one Postgres table of country rows behind an r2d2 pool.
//!
//! Connections are acquired per operation and released when the pooled guard
//! drops, on every exit path. The pool keeps no idle connections at build
//! time, so constructing a [`Db`] succeeds even while the database is down;
//! operations then surface [`StoreError`] until it returns.

use crate::config::Config;
use crate::error::StoreError;
use crate::models::{Country, GdpSort, ListFilter};
use chrono::{DateTime, Utc};
use postgres::types::ToSql;
use postgres::{NoTls, Row};
use r2d2_postgres::PostgresConnectionManager;
use r2d2_postgres::r2d2::{Pool, PooledConnection};

type Manager = PostgresConnectionManager<NoTls>;
type Connection = PooledConnection<Manager>;

const MAX_CONNECTION_COUNT: u32 = 4;

/// Column list shared by every SELECT so rows always map the same way.
pub const COLUMNS: &str = "name, capital, region, population, currency_code, \
     currency_name, exchange_rate, estimated_gdp, flag_url, last_refreshed_at";

#[derive(Clone)]
pub struct Db {
    pool: Pool<Manager>,
}

impl Db {
    pub fn connect(config: &Config) -> Result<Self, StoreError> {
        let mut pg = postgres::Config::new();
        pg.host(&config.db_host)
            .user(&config.db_user)
            .dbname(&config.db_name);
        if !config.db_password.is_empty() {
            pg.password(&config.db_password);
        }
        let manager = PostgresConnectionManager::new(pg, NoTls);
        let pool = Pool::builder()
            .min_idle(Some(0))
            .max_size(MAX_CONNECTION_COUNT)
            .build(manager)?;
        Ok(Self { pool })
    }

    fn conn(&self) -> Result<Connection, StoreError> {
        Ok(self.pool.get()?)
    }

    pub fn init_schema(&self) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        conn.batch_execute(
            r#"
                create table if not exists countries (
                    name text primary key,
                    capital text,
                    region text,
                    population bigint,
                    currency_code text,
                    currency_name text,
                    exchange_rate double precision,
                    estimated_gdp double precision,
                    flag_url text,
                    last_refreshed_at timestamptz
                )
            "#,
        )?;
        Ok(())
    }

    /// Unconditional wipe; returns the number of rows removed.
    pub fn wipe(&self) -> Result<u64, StoreError> {
        let mut conn = self.conn()?;
        Ok(conn.execute("delete from countries", &[])?)
    }

    pub fn insert(&self, country: &Country) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        conn.execute(
            "insert into countries (name, capital, region, population, \
             currency_code, currency_name, exchange_rate, estimated_gdp, \
             flag_url, last_refreshed_at) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            &[
                &country.name,
                &country.capital,
                &country.region,
                &country.population,
                &country.currency_code,
                &country.currency_name,
                &country.exchange_rate,
                &country.estimated_gdp,
                &country.flag_url,
                &country.last_refreshed_at,
            ],
        )?;
        Ok(())
    }

    /// Filtered/sorted listing; always the full matching set (no pagination).
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<Country>, StoreError> {
        let (sql, params) = build_list_query(filter);
        let refs: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        let mut conn = self.conn()?;
        let rows = conn.query(sql.as_str(), &refs)?;
        Ok(rows.iter().map(row_to_country).collect())
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Country>, StoreError> {
        let mut conn = self.conn()?;
        let row = conn.query_opt(
            format!("select {COLUMNS} from countries where name = $1").as_str(),
            &[&name],
        )?;
        Ok(row.as_ref().map(row_to_country))
    }

    /// Idempotent: returns whether a row was actually removed.
    pub fn delete_by_name(&self, name: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn()?;
        let removed = conn.execute("delete from countries where name = $1", &[&name])?;
        Ok(removed > 0)
    }

    pub fn count(&self) -> Result<i64, StoreError> {
        let mut conn = self.conn()?;
        let row = conn.query_one("select count(*) from countries", &[])?;
        Ok(row.get(0))
    }

    /// Most recent refresh stamp across all rows; null on an empty store.
    pub fn last_refreshed(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        let mut conn = self.conn()?;
        let row = conn.query_one("select max(last_refreshed_at) from countries", &[])?;
        Ok(row.get(0))
    }

    /// Top rows by estimated GDP for the summary image. Rows without an
    /// estimate trail the sorted ones, so the result stays populated while
    /// the GDP column is still entirely null.
    pub fn top_by_gdp(&self, limit: i64) -> Result<Vec<Country>, StoreError> {
        let mut conn = self.conn()?;
        let rows = conn.query(
            format!(
                "select {COLUMNS} from countries \
                 order by estimated_gdp desc nulls last limit $1"
            )
            .as_str(),
            &[&limit],
        )?;
        Ok(rows.iter().map(row_to_country).collect())
    }
}

/// Assemble the list SELECT and its bound parameters in one pass. Region and
/// currency are exact, case-sensitive matches; an unrecognized sort value
/// leaves the storage order untouched. NULL estimates sort last in both
/// directions.
pub fn build_list_query(filter: &ListFilter) -> (String, Vec<String>) {
    let mut sql = format!("select {COLUMNS} from countries");
    let mut params: Vec<String> = Vec::new();

    if let Some(region) = filter.region_filter() {
        params.push(region.to_string());
        sql.push_str(&format!(" where region = ${}", params.len()));
    }
    if let Some(currency) = filter.currency_filter() {
        params.push(currency.to_string());
        let keyword = if params.len() == 1 { "where" } else { "and" };
        sql.push_str(&format!(" {keyword} currency_code = ${}", params.len()));
    }
    match filter.sort_key() {
        Some(GdpSort::Asc) => sql.push_str(" order by estimated_gdp asc nulls last"),
        Some(GdpSort::Desc) => sql.push_str(" order by estimated_gdp desc nulls last"),
        None => {}
    }

    (sql, params)
}

fn row_to_country(row: &Row) -> Country {
    Country {
        name: row.get("name"),
        capital: row.get("capital"),
        region: row.get("region"),
        population: row.get("population"),
        currency_code: row.get("currency_code"),
        currency_name: row.get("currency_name"),
        exchange_rate: row.get("exchange_rate"),
        estimated_gdp: row.get("estimated_gdp"),
        flag_url: row.get("flag_url"),
        last_refreshed_at: row.get("last_refreshed_at"),
    }
}
