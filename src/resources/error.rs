use thiserror::Error;

use crate::database::StoreError;

/// Errors from the options validators, the data-access layer and the service layer.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("invalid options")]
    InvalidOptions,

    #[error("invalid id")]
    InvalidId,

    #[error("invalid title")]
    InvalidTitle,

    #[error("invalid owner id")]
    InvalidOwner,

    #[error("invalid {0}")]
    InvalidReference(&'static str),

    #[error("invalid filters: {0}")]
    InvalidFilters(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("no rows affected")]
    NoRowsAffected,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to decode {resource} row: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ResourceError {
    /// Input problems detected before any store access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ResourceError::InvalidOptions
                | ResourceError::InvalidId
                | ResourceError::InvalidTitle
                | ResourceError::InvalidOwner
                | ResourceError::InvalidReference(_)
                | ResourceError::InvalidFilters(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceError::NotFound(_) | ResourceError::NoRowsAffected)
    }
}
