//! Remote data client.
//!
//! Talks to the dashboard's remote-procedure API. Every procedure is a GET on
//! `{base}/{procedure}`; input travels JSON-encoded in the `input` query
//! parameter and results come back wrapped as `{"result": {"data": ...}}`.

use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const WORKSPACE_LIST: &str = "workspace.list";
pub const ADMIN_STATS: &str = "admin.stats";

/// Entry of `workspace.list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub slug: String,
    pub name: String,
}

/// Result of `admin.stats`: positional counters, any of which may be null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminStats(pub Vec<Option<i64>>);

impl AdminStats {
    pub fn values(&self) -> &[Option<i64>] {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{procedure}: failed to encode input: {source}")]
    Input {
        procedure: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{procedure}: request failed: {source}")]
    Transport {
        procedure: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{procedure}: HTTP {status}")]
    Status { procedure: String, status: u16 },

    #[error("{procedure}: invalid response: {source}")]
    Decode {
        procedure: String,
        #[source]
        source: reqwest::Error,
    },
}

impl RemoteError {
    /// Transport failures and server errors are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::Transport { .. } => true,
            RemoteError::Status { status, .. } => *status >= 500,
            RemoteError::Input { .. } | RemoteError::Decode { .. } => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: EnvelopeResult<T>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeResult<T> {
    data: T,
}

/// Observable state of one remote query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    Loading,
    Error(String),
    Success(T),
}

impl<T> QueryState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }

    pub fn from_result(result: Result<T, RemoteError>) -> Self {
        match result {
            Ok(data) => QueryState::Success(data),
            Err(e) => QueryState::Error(e.to_string()),
        }
    }
}

/// Await a query for at most `deadline`.
///
/// A query that has not settled by then is reported as `Loading` and the
/// future is dropped.
pub async fn observe<T, F>(procedure: &str, deadline: Duration, query: F) -> QueryState<T>
where
    F: Future<Output = Result<T, RemoteError>>,
{
    match tokio::time::timeout(deadline, query).await {
        Ok(Ok(data)) => QueryState::Success(data),
        Ok(Err(e)) => {
            warn!("{} failed: {}", procedure, e);
            QueryState::Error(e.to_string())
        }
        Err(_) => {
            debug!("{} still pending after {:?}", procedure, deadline);
            QueryState::Loading
        }
    }
}

/// Typed client for the remote-procedure API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    token: Option<Arc<str>>,
    retry: RetryConfig,
}

impl RemoteClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            token: token.map(Arc::from),
            retry: RetryConfig::remote_query(),
        })
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call `procedure` with an optional input.
    pub async fn query<I, T>(&self, procedure: &str, input: Option<&I>) -> Result<T, RemoteError>
    where
        I: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, procedure);
        let encoded = input
            .map(serde_json::to_string)
            .transpose()
            .map_err(|source| RemoteError::Input {
                procedure: procedure.to_string(),
                source,
            })?;

        let url = url.as_str();
        let encoded = encoded.as_deref();
        with_retry_if(
            &self.retry,
            procedure,
            move || async move { self.send::<T>(url, procedure, encoded).await },
            RemoteError::is_retryable,
        )
        .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        procedure: &str,
        input: Option<&str>,
    ) -> Result<T, RemoteError> {
        let mut request = self.http.get(url);
        if let Some(input) = input {
            request = request.query(&[("input", input)]);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|source| RemoteError::Transport {
                procedure: procedure.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                procedure: procedure.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: Envelope<T> =
            response
                .json()
                .await
                .map_err(|source| RemoteError::Decode {
                    procedure: procedure.to_string(),
                    source,
                })?;

        Ok(envelope.result.data)
    }

    pub async fn workspace_list(&self) -> Result<Vec<WorkspaceSummary>, RemoteError> {
        self.query::<(), _>(WORKSPACE_LIST, None).await
    }

    pub async fn admin_stats(&self) -> Result<AdminStats, RemoteError> {
        self.query::<(), _>(ADMIN_STATS, None).await
    }
}
