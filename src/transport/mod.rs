//! Retrying HTTP transport.
//!
//! Executes one logical request per `send` call, retrying server-class
//! failures with capped exponential backoff per the configured
//! [`RetryPolicy`]. Non-retryable statuses (e.g. 404) come back as plain
//! responses for the caller to classify.

mod request;

pub use request::{Body, RequestSpec};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::retry::{classify, run_with_retry, RetryPolicy, TransportError};

/// Predicate deciding whether a failed exchange should be retried.
pub type RetryPredicate = Arc<dyn Fn(&TransportError) -> bool + Send + Sync>;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A completed exchange: final status plus the raw body.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    body: Vec<u8>,
}

impl Response {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Body as lossy UTF-8, for error snippets and logs.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP transport with a fixed retry policy.
///
/// Cheap to clone; clones share the underlying connection pool. The policy
/// and predicate are set at construction and immutable thereafter.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    policy: RetryPolicy,
    retryable: RetryPredicate,
}

impl Transport {
    /// Transport with the default policy: 3 retries, 5s initial backoff,
    /// 60s ceiling, retrying server-class failures.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_policy(RetryPolicy::default())
    }

    pub fn with_policy(policy: RetryPolicy) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TransportError::Network)?;
        Ok(Self {
            http,
            policy: policy.normalized(),
            retryable: Arc::new(|e: &TransportError| classify(e).is_retryable()),
        })
    }

    /// Replaces the retry predicate. The backoff schedule still comes from
    /// the policy; only the retry/no-retry verdict changes.
    pub fn retry_when(
        mut self,
        predicate: impl Fn(&TransportError) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.retryable = Arc::new(predicate);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Executes `spec`, retrying per the policy.
    ///
    /// Statuses the predicate rejects as non-retryable are returned as
    /// `Ok(Response)` for the caller to classify; retryable failures that
    /// exhaust the retry allowance surface as the last [`TransportError`].
    pub async fn send(
        &self,
        cancel: &CancellationToken,
        spec: &RequestSpec,
    ) -> Result<Response, TransportError> {
        run_with_retry(
            &self.policy,
            cancel,
            |e| (self.retryable)(e),
            || self.execute(spec),
        )
        .await
    }

    /// One attempt: build the request from the descriptor, send it, read
    /// the body. Retryable statuses become errors so the retry loop sees
    /// them; everything else is a response.
    async fn execute(&self, spec: &RequestSpec) -> Result<Response, TransportError> {
        let mut req = self.http.request(spec.method.clone(), spec.url.as_str());
        for (name, value) in &spec.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        req = match &spec.body {
            Body::Empty => req,
            Body::Json(v) => req.json(v),
            Body::Form(pairs) => req.form(pairs),
        };

        let resp = req.send().await.map_err(TransportError::Network)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(TransportError::Network)?.to_vec();
        let response = Response { status, body };

        if response.is_success() {
            return Ok(response);
        }
        let err = TransportError::Http {
            status,
            url: spec.url.clone(),
        };
        if (self.retryable)(&err) {
            Err(err)
        } else {
            Ok(response)
        }
    }
}
