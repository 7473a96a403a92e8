//! Error types and result aliases for Tendril operations.
//!
//! Provides a unified error type that covers all possible error conditions
//! across the Tendril crates with actionable error messages.

use thiserror::Error;

/// Unified error type for all Tendril operations
#[derive(Error, Debug)]
pub enum TendrilError {
    // Lookup errors
    #[error("'{resource}' not found upstream")]
    NotFound { resource: String },

    // Validation errors (raised before any network call)
    #[error("Invalid arguments for '{method}': {}", .violations.join("; "))]
    ValidationFailed {
        method: String,
        violations: Vec<String>,
    },

    // Credential errors
    #[error("GitHub authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Access forbidden: {message}")]
    Forbidden { message: String },

    #[error("GitHub rate limit exceeded: {message}")]
    RateLimited { message: String },

    // Circuit breaker fail-fast
    #[error("Service temporarily unavailable: circuit breaker is open")]
    ServiceUnavailable,

    // Transport errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Any other non-2xx upstream response
    #[error("GitHub returned status {status}: {message}")]
    Remote { status: u16, message: String },
}

/// Result type alias for Tendril operations
pub type TendrilResult<T> = Result<T, TendrilError>;

impl TendrilError {
    /// Create a NotFound error for a named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Wire-level error code for the protocol layer
    pub fn code(&self) -> &'static str {
        match self {
            TendrilError::NotFound { .. } => "not_found",
            TendrilError::ValidationFailed { .. } => "validation_failed",
            TendrilError::AuthenticationFailed { .. } => "authentication_failed",
            TendrilError::Forbidden { .. } => "forbidden",
            TendrilError::RateLimited { .. } => "rate_limited",
            TendrilError::ServiceUnavailable => "service_unavailable",
            TendrilError::Network { .. } => "network_error",
            TendrilError::Remote { .. } => "remote_error",
        }
    }

    /// Check if this error is recoverable by retrying later
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TendrilError::Network { .. }
                | TendrilError::RateLimited { .. }
                | TendrilError::ServiceUnavailable
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            TendrilError::NotFound { .. } => {
                Some("Check the component or block name spelling against list_components")
            }
            TendrilError::AuthenticationFailed { .. } => {
                Some("Verify the GITHUB_TOKEN value is valid and not expired")
            }
            TendrilError::RateLimited { .. } => {
                Some("Provide a GitHub token to raise the API quota, or wait and retry")
            }
            TendrilError::ServiceUnavailable => {
                Some("The upstream host is failing repeatedly; retry after the cooldown")
            }
            TendrilError::Network { .. } => Some("Check your internet connection and try again"),
            _ => None,
        }
    }
}
