//! Remote endpoint: a spreadsheet script or small REST API that mirrors the
//! day records. The backend itself is external; this module only speaks
//! its three (four, with `ping`) operations.

mod client;
pub mod variant;
pub mod wire;

pub use client::{HttpRemote, HttpRemoteConfig};
pub use variant::{ApiStyle, BodyEncoding, DeleteMode};
pub use wire::RangePayload;

use crate::models::DayRecord;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("cannot decode response: {0}")]
    Decode(String),

    #[error("backend rejected the request: {0}")]
    Rejected(String),

    #[error("invalid endpoint configuration: {0}")]
    Config(String),
}

/// Operations every deployment variant supports.
#[async_trait]
pub trait RemoteEndpoint: Send + Sync {
    /// Reachability probe. Returns the backend's status string.
    async fn ping(&self) -> Result<String, RemoteError>;

    /// Records for `[start, end]`, in whatever shape the backend answers.
    async fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RangePayload, RemoteError>;

    /// Full overwrite of one date. Idempotent.
    async fn upsert_day(&self, date: NaiveDate, record: &DayRecord) -> Result<(), RemoteError>;

    /// Best-effort delete of one date.
    async fn delete_day(&self, date: NaiveDate) -> Result<(), RemoteError>;
}
