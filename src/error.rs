//! Typed failures for provider-backed routing.
//!
//! None of these are retried here; the caller owns the
//! fall-back-to-greedy policy, so every variant must survive to it intact.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    /// The selected provider has no base URL configured. Raised before any
    /// network I/O, so it is always distinguishable from a transport failure.
    #[error("routing provider {provider} is not configured")]
    Unconfigured { provider: &'static str },

    /// Network failure, timeout or non-2xx response from the provider.
    #[error("routing provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered 2xx but the body is missing the expected
    /// route/path fields.
    #[error("routing provider response malformed: {detail}")]
    MalformedResponse { detail: String },
}

impl RoutingError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse { detail: detail.into() }
    }
}
