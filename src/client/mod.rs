//! Typed Bangumi API client.
//!
//! Thin layer over the retrying transport and the bounded fan-out
//! fetcher: builds requests, classifies non-2xx responses into tagged API
//! errors, and decodes JSON bodies into the response models.

mod options;

pub use options::RequestOption;

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::fetcher;
use crate::model::{ApiErrorBody, RelatedCharacter, Subject, SubjectId};
use crate::retry::TransportError;
use crate::transport::{RequestSpec, Response, Transport};

/// Public base URL of the Bangumi v0 API.
pub const API_BASE_URL: &str = "https://api.bgm.tv";
/// User-Agent sent with every request unless overridden in config.
pub const USER_AGENT: &str = "github.com/bangumilite (Rust; bangumi-client)";

const CONTENT_TYPE_JSON: &str = "application/json";

/// Client for the Bangumi v0 API.
///
/// Cheap to clone; clones share the transport's connection pool and retry
/// policy.
#[derive(Clone)]
pub struct Client {
    transport: Transport,
    base_url: Url,
    user_agent: String,
    max_concurrent_fetches: usize,
}

impl Client {
    /// Client with the default configuration: public API base URL, default
    /// retry policy, 10 concurrent fetches.
    pub fn new() -> Result<Self, Error> {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(cfg: &ClientConfig) -> Result<Self, Error> {
        let policy = cfg
            .retry
            .as_ref()
            .map(|r| r.to_policy())
            .unwrap_or_default();
        let transport = Transport::with_policy(policy)?;
        Self::with_transport(transport, cfg)
    }

    /// Client over a caller-supplied transport (custom retry predicate,
    /// test servers).
    pub fn with_transport(transport: Transport, cfg: &ClientConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&cfg.api_base_url)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self {
            transport,
            base_url,
            user_agent: cfg.user_agent.clone(),
            max_concurrent_fetches: cfg.max_concurrent_fetches.max(1),
        })
    }

    /// Fetches one subject by id.
    pub async fn get_subject(
        &self,
        cancel: &CancellationToken,
        id: SubjectId,
        opts: &[RequestOption],
    ) -> Result<Subject, Error> {
        let path = format!("/v0/subjects/{}", id);
        let resp = self.get(cancel, &path, opts).await?;
        self.decode(&path, resp)
    }

    /// Fetches many subjects concurrently, bounded by the configured cap.
    ///
    /// Returns every subject or the first observed failure; result order
    /// is arbitrary and duplicate ids fetch twice.
    pub async fn get_subjects(
        &self,
        cancel: &CancellationToken,
        ids: Vec<SubjectId>,
        opts: &[RequestOption],
    ) -> Result<Vec<Subject>, Error> {
        let client = self.clone();
        let opts = opts.to_vec();
        fetcher::fetch_all(
            cancel,
            ids,
            move |token, id| {
                let client = client.clone();
                let opts = opts.clone();
                async move { client.get_subject(&token, id, &opts).await }
            },
            self.max_concurrent_fetches,
        )
        .await
        .map_err(Error::from)
    }

    /// Fetches the characters related to a subject.
    pub async fn get_subject_characters(
        &self,
        cancel: &CancellationToken,
        id: SubjectId,
    ) -> Result<Vec<RelatedCharacter>, Error> {
        let path = format!("/v0/subjects/{}/characters", id);
        let resp = self.get(cancel, &path, &[]).await?;
        self.decode(&path, resp)
    }

    async fn get(
        &self,
        cancel: &CancellationToken,
        path: &str,
        opts: &[RequestOption],
    ) -> Result<Response, Error> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        let mut spec = RequestSpec::get(url.as_str())
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", CONTENT_TYPE_JSON);
        for opt in opts {
            opt.apply(&mut spec);
        }
        tracing::debug!(url = %url, "GET");
        Ok(self.transport.send(cancel, &spec).await?)
    }

    /// Classifies the response: 2xx decodes into `T`, anything else is
    /// parsed into the tagged API error.
    fn decode<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        resp: Response,
    ) -> Result<T, Error> {
        if !resp.is_success() {
            return Err(api_error(path, &resp));
        }
        resp.json().map_err(|e| Error::Decode {
            path: path.to_string(),
            source: e,
        })
    }
}

/// Builds the tagged API error from a non-2xx response, falling back to a
/// body snippet when the error body does not parse as `{title, description}`.
fn api_error(path: &str, resp: &Response) -> Error {
    let body: ApiErrorBody = resp.json().unwrap_or_else(|_| ApiErrorBody {
        title: "unparseable error body".to_string(),
        description: snippet(&resp.text()),
    });
    Error::Api {
        path: path.to_string(),
        status: resp.status(),
        title: body.title,
        description: body.description,
    }
}

fn snippet(s: &str) -> String {
    s.chars().take(120).collect()
}
