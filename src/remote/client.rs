//! HTTP client for the remote endpoint.

use super::variant::{ApiStyle, BodyEncoding, DeleteMode};
use super::wire::{DeletePayload, RangePayload, UpsertPayload, check_ack, ping_status};
use super::{RemoteEndpoint, RemoteError};
use crate::models::DayRecord;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpRemoteConfig {
    /// Base URL, e.g. a spreadsheet web-app `.../exec` URL
    pub base_url: String,
    /// User identifier sent to script-style backends
    pub user: Option<String>,
    pub style: ApiStyle,
    pub encoding: BodyEncoding,
    pub delete_mode: DeleteMode,
    /// Timeout for each request
    pub timeout: Duration,
}

impl Default for HttpRemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            user: None,
            style: ApiStyle::Script,
            encoding: BodyEncoding::Json,
            delete_mode: DeleteMode::Endpoint,
            timeout: Duration::from_secs(15),
        }
    }
}

enum Route {
    Ping,
    Range,
    Upsert,
    Delete,
}

pub struct HttpRemote {
    client: reqwest::Client,
    config: HttpRemoteConfig,
}

impl HttpRemote {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not http(s) or the client cannot be built
    pub fn new(config: HttpRemoteConfig) -> Result<Self, RemoteError> {
        let base = config.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(RemoteError::Config(format!(
                "base URL must start with http:// or https:// (got '{}')",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn user(&self) -> Option<&str> {
        self.config.user.as_deref().filter(|u| !u.is_empty())
    }

    /// URL and query pairs for a route under the configured style.
    fn route(&self, route: Route) -> (String, Vec<(&'static str, String)>) {
        let base = self.config.base_url.trim();
        match self.config.style {
            ApiStyle::Script => {
                let query = match route {
                    Route::Ping => vec![("fn", "ping".to_string())],
                    Route::Range => vec![("fn", "range".to_string())],
                    Route::Upsert => vec![("fn", "punch".to_string())],
                    Route::Delete => vec![("action", "delete".to_string())],
                };
                (base.to_string(), query)
            }
            ApiStyle::Rest => {
                let base = base.trim_end_matches('/');
                let path = match route {
                    Route::Ping => "ping",
                    Route::Range => "range",
                    Route::Upsert => "update",
                    Route::Delete => "delete",
                };
                (format!("{}/{}", base, path), Vec::new())
            }
        }
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, RemoteError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RemoteError::Timeout(self.config.timeout)
            } else {
                RemoteError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "remote returned non-success status");
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn post<T: Serialize + Sync>(
        &self,
        route: Route,
        payload: &T,
    ) -> Result<(), RemoteError> {
        let (url, query) = self.route(route);
        let request = self.client.post(&url).query(&query);

        let request = match self.config.encoding {
            BodyEncoding::Json => request.json(payload),
            BodyEncoding::Form => {
                let data = serde_json::to_string(payload)
                    .map_err(|e| RemoteError::Decode(format!("Failed to serialize body: {}", e)))?;
                request.form(&[("data", data)])
            }
        };

        let response = self.send(request, &url).await?;
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        check_ack(&body).map_err(RemoteError::Rejected)
    }
}

#[async_trait]
impl RemoteEndpoint for HttpRemote {
    #[instrument(skip(self))]
    async fn ping(&self) -> Result<String, RemoteError> {
        let (url, query) = self.route(Route::Ping);
        let response = self.send(self.client.get(&url).query(&query), &url).await?;
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(ping_status(&body))
    }

    #[instrument(skip(self))]
    async fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RangePayload, RemoteError> {
        let (url, mut query) = self.route(Route::Range);
        if self.config.style == ApiStyle::Script {
            query.push(("user", self.user().unwrap_or_default().to_string()));
        }
        query.push(("start", start.format("%Y-%m-%d").to_string()));
        query.push(("end", end.format("%Y-%m-%d").to_string()));

        debug!(url = %url, "GET range");
        let response = self.send(self.client.get(&url).query(&query), &url).await?;

        let payload: RangePayload = response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(format!("Failed to parse range response: {}", e)))?;

        info!(%start, %end, "range fetched");
        Ok(payload)
    }

    #[instrument(skip(self, record))]
    async fn upsert_day(&self, date: NaiveDate, record: &DayRecord) -> Result<(), RemoteError> {
        let payload = UpsertPayload::new(self.user(), date, record);
        self.post(Route::Upsert, &payload).await?;
        debug!(%date, "day upserted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_day(&self, date: NaiveDate) -> Result<(), RemoteError> {
        match self.config.delete_mode {
            DeleteMode::LocalOnly => {
                debug!(%date, "delete kept local");
                Ok(())
            }
            DeleteMode::EmptyRecord => {
                let empty = DayRecord::tombstone();
                self.upsert_day(date, &empty).await
            }
            DeleteMode::Endpoint => {
                let payload = DeletePayload {
                    user: self.user(),
                    date: date.format("%Y-%m-%d").to_string(),
                };
                self.post(Route::Delete, &payload).await
            }
        }
    }
}
