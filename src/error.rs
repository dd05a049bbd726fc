//! Error taxonomy for the gateway.
//!
//! Credential values must never appear in these messages: upstream errors
//! are built from reqwest errors with the request URL stripped, since the
//! aggregator backend carries its key in the query string.

use crate::models::ProviderKind;

/// Everything that can go wrong between accepting a query and returning a
/// normalized response.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A required credential is missing, or no backend is selectable at all.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The upstream call failed: non-success status, network failure,
    /// timeout, or an undecodable body.
    #[error("{provider} request failed: {message}")]
    Upstream {
        provider: ProviderKind,
        message: String,
    },

    /// A caller-supplied parameter is out of contract, or a result URL from
    /// upstream did not parse as an absolute URL.
    #[error("validation error: {0}")]
    Validation(String),
}

impl SearchError {
    pub fn upstream(provider: ProviderKind, err: impl std::fmt::Display) -> Self {
        Self::Upstream {
            provider,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
