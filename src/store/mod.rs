//! Remote record store abstraction.
//!
//! The dashboard talks to a hosted database-as-a-service through a uniform
//! request/response API: select with filters/order/limit, insert, update,
//! delete, and a single-row existence check. [`RestStore`] speaks the PostgREST
//! dialect over `reqwest`; [`MemoryStore`] interprets the same [`Query`] in
//! memory for the demo mode and tests.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

mod demo;
mod memory;
mod query;
mod rest;

pub use demo::{DEMO_ORIGIN, demo_store};
pub use memory::MemoryStore;
pub use query::{Order, Query, SelectItem};
pub use rest::RestStore;

/// Errors surfaced by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure (DNS, TLS, connection reset, ...).
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store returned {status} for {table}: {body}")]
    Status {
        /// Table the request targeted.
        table: String,
        /// HTTP status code.
        status: u16,
        /// Response body (error description from the store).
        body: String,
    },

    /// Rows could not be decoded into the expected shape.
    #[error("failed to decode {table} rows: {source}")]
    Decode {
        /// Table the rows came from.
        table: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A single-row query matched more than one row.
    #[error("expected at most one {table} row, got {count}")]
    MultipleRows {
        /// Table the query targeted.
        table: String,
        /// Number of rows returned.
        count: usize,
    },

    /// An insert succeeded but the store echoed no row back.
    #[error("insert into {table} returned no row")]
    EmptyInsert {
        /// Table the insert targeted.
        table: String,
    },

    /// The table is not known to the backend.
    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// The backend is missing connection settings.
    #[error("store not configured: {0}")]
    Config(String),
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// A keyed record store offering filtered reads and simple writes.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read rows matching `query`.
    async fn select(&self, query: &Query) -> Result<Vec<Value>>;

    /// Insert one row into `table`, returning the stored representation.
    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>>;

    /// Merge `patch` into every row matching the filters of `query`; returns rows touched.
    async fn update(&self, query: &Query, patch: Value) -> Result<usize>;

    /// Delete every row matching the filters of `query`; returns rows removed.
    async fn delete(&self, query: &Query) -> Result<usize>;

    /// What: Fetch zero or one row matching `query`.
    ///
    /// Output:
    /// - `Ok(None)` when nothing matches, `Ok(Some(row))` for exactly one match.
    ///
    /// # Errors
    /// - [`StoreError::MultipleRows`] when more than one row matches.
    /// - Any error from [`RecordStore::select`].
    ///
    /// Details:
    /// - Fetches with limit 2 (or the query's own smaller limit) to detect duplicates.
    async fn maybe_single(&self, query: &Query) -> Result<Option<Value>> {
        let limit = query.row_limit().map_or(2, |n| n.min(2));
        let rows = self.select(&query.clone().limit(limit)).await?;
        match rows.len() {
            0 | 1 => Ok(rows.into_iter().next()),
            count => Err(StoreError::MultipleRows {
                table: query.table().to_string(),
                count,
            }),
        }
    }
}

/// What: Decode raw JSON rows into typed records.
///
/// Inputs:
/// - `table`: Table name used in the error message.
/// - `rows`: Raw rows as returned by a backend.
///
/// Output:
/// - Typed rows, or [`StoreError::Decode`] on the first mismatch.
///
/// # Errors
/// - Returns `Err` when any row does not match `T`.
pub fn decode_rows<T: serde::de::DeserializeOwned>(table: &str, rows: Vec<Value>) -> Result<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|source| StoreError::Decode {
                table: table.to_string(),
                source,
            })
        })
        .collect()
}
