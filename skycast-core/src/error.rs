use thiserror::Error;

use crate::provider::Service;

/// Failure of a single upstream call.
///
/// Callers treat every variant the same way: report it and skip the section.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{service} request failed: {source}")]
    Http {
        service: Service,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: Service,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse {service} JSON: {source}")]
    Parse {
        service: Service,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service} returned unusable data: {reason}")]
    InvalidData { service: Service, reason: String },
}

impl FetchError {
    pub fn invalid(service: Service, reason: impl Into<String>) -> Self {
        FetchError::InvalidData { service, reason: reason.into() }
    }

    pub fn service(&self) -> Service {
        match self {
            FetchError::Http { service, .. }
            | FetchError::Status { service, .. }
            | FetchError::Parse { service, .. }
            | FetchError::InvalidData { service, .. } => *service,
        }
    }
}
