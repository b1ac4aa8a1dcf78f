//! Per-request decoration applied before a request is sent.

use std::fmt;
use std::sync::Arc;

use crate::transport::RequestSpec;

/// A reusable request decorator (e.g. an Authorization header).
///
/// Cloneable and shareable across the concurrent workers of a batch
/// fetch; applied to the descriptor just before it is handed to the
/// transport.
#[derive(Clone)]
pub struct RequestOption(Arc<dyn Fn(&mut RequestSpec) + Send + Sync>);

impl RequestOption {
    /// Wraps an arbitrary mutation of the outgoing request.
    pub fn new(f: impl Fn(&mut RequestSpec) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Sets `Authorization: Bearer <token>`. An empty token leaves the
    /// request untouched.
    pub fn bearer_auth(token: impl Into<String>) -> Self {
        let token = token.into();
        Self::new(move |spec| {
            if !token.is_empty() {
                spec.headers
                    .push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
        })
    }

    pub(crate) fn apply(&self, spec: &mut RequestSpec) {
        (self.0)(spec);
    }
}

impl fmt::Debug for RequestOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequestOption")
    }
}
