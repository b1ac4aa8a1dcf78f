//! Request descriptor: enough to rebuild an identical request per attempt.

use reqwest::Method;

/// Body payload for a request. Kept cloneable so each retry attempt can
/// rebuild the request from scratch.
#[derive(Debug, Clone, Default)]
pub enum Body {
    /// No body (GET and friends).
    #[default]
    Empty,
    /// JSON payload.
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` key/value pairs.
    Form(Vec<(String, String)>),
}

/// Descriptor for one logical HTTP request: method, URL, headers, body.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    /// Header pairs applied in order; later pairs win on repeated names.
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl RequestSpec {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Appends a header pair.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }
}
