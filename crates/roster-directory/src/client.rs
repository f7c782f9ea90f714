//! HTTP client for the upstream employee directory.
//!
//! Plain HTTP/1.1 over hyper's pooled legacy client. Every upstream call is
//! bounded by the configured timeout.

use std::time::Duration;

use bytes::Bytes;
use http::{header, Method, Request, Uri};
use http_body_util::{BodyExt, Empty};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use roster_core::config::{ConfigError, DirectoryConfig};
use roster_core::{EmployeeId, Record};

use crate::error::{DirectoryError, DirectoryResult};
use crate::{DirectoryFuture, EmployeeDirectory, Window};

/// Directory client speaking to `{base_url}/employees`.
#[derive(Clone)]
pub struct HttpDirectory {
    client: Client<HttpConnector, Empty<Bytes>>,
    base_url: String,
    batch_size: usize,
    timeout: Duration,
}

impl HttpDirectory {
    pub fn new(base_url: &str, batch_size: usize, timeout: Duration) -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            base_url: base_url.trim_end_matches('/').to_string(),
            batch_size: batch_size.max(1),
            timeout,
        }
    }

    pub fn from_config(config: &DirectoryConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            &config.base_url,
            config.batch_size,
            config.timeout()?,
        ))
    }

    /// GET `/employees?{query}` and decode the JSON array body.
    async fn get_records(&self, query: String) -> DirectoryResult<Vec<Record>> {
        let uri: Uri = format!("{}/employees?{query}", self.base_url)
            .parse()
            .map_err(|e: http::uri::InvalidUri| DirectoryError::InvalidUri(e.to_string()))?;

        let req = Request::builder()
            .method(Method::GET)
            .uri(uri.clone())
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, "roster-directory/0.1")
            .body(Empty::<Bytes>::new())
            .map_err(|e| DirectoryError::InvalidUri(e.to_string()))?;

        let call = async {
            let resp = self
                .client
                .request(req)
                .await
                .map_err(|e| DirectoryError::Transport(e.to_string()))?;

            let status = resp.status();
            if !status.is_success() {
                return Err(DirectoryError::Status(status.as_u16()));
            }

            let body = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| DirectoryError::Transport(e.to_string()))?
                .to_bytes();

            serde_json::from_slice::<Vec<Record>>(&body)
                .map_err(|e| DirectoryError::Decode(e.to_string()))
        };

        let records = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| DirectoryError::Timeout(self.timeout))??;

        debug!(%uri, count = records.len(), "directory call completed");
        Ok(records)
    }
}

impl EmployeeDirectory for HttpDirectory {
    fn list(&self, window: Window) -> DirectoryFuture<'_> {
        Box::pin(async move {
            self.get_records(format!("limit={}&offset={}", window.limit, window.offset))
                .await
        })
    }

    fn fetch_by_ids<'a>(&'a self, ids: &'a [EmployeeId]) -> DirectoryFuture<'a> {
        Box::pin(async move {
            let mut employees = Vec::with_capacity(ids.len());
            for batch in ids.chunks(self.batch_size) {
                let query = batch
                    .iter()
                    .map(|id| format!("id={id}"))
                    .collect::<Vec<_>>()
                    .join("&");
                employees.extend(self.get_records(query).await?);
            }
            Ok(employees)
        })
    }
}
