//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//! Provider failures are classified so that diagnostics can tell an
//! exhausted quota apart from a rejected credential.
//!
//! ## Error Categories
//!
//! - **RateLimit**: API rate limiting or exhausted quota
//! - **Auth**: Authentication failures
//! - **Network**: Connectivity issues
//! - **Unavailable**: Provider unavailable
//!
//! Provider errors never abort a tree build: adapters log them and report
//! "no result", and the fallback cascade moves on.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories for provider failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited or quota exhausted - the credential itself is valid
    RateLimit,
    /// Authentication failed
    Auth,
    /// Network/connectivity issues
    Network,
    /// Provider unavailable
    Unavailable,
    /// Invalid request
    BadRequest,
    /// Provider response could not be parsed
    ParseError,
    /// Temporary server issues
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl ErrorCategory {
    /// Whether the failure means the credential was accepted by the provider
    pub fn credential_accepted(&self) -> bool {
        matches!(self, Self::RateLimit)
    }
}

// =============================================================================
// Provider Error
// =============================================================================

/// Provider error with category and originating provider
#[derive(Debug, Clone)]
pub struct ProviderError {
    /// Error category for diagnostics
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for ProviderError {}

impl ProviderError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    /// Create error with provider context
    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps provider failures onto error categories
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an error message from any provider
    pub fn classify(message: &str, provider: &str) -> ProviderError {
        let lower = message.to_lowercase();

        if lower.contains("rate limit")
            || lower.contains("429")
            || lower.contains("too many requests")
            || lower.contains("quota")
            || lower.contains("capacity")
            || lower.contains("resource exhausted")
            || lower.contains("resource_exhausted")
        {
            return ProviderError::with_provider(ErrorCategory::RateLimit, message, provider);
        }

        if lower.contains("auth")
            || lower.contains("401")
            || lower.contains("403")
            || lower.contains("api key")
            || lower.contains("invalid key")
            || lower.contains("unauthorized")
            || lower.contains("permission denied")
        {
            return ProviderError::with_provider(ErrorCategory::Auth, message, provider);
        }

        if lower.contains("network")
            || lower.contains("connection")
            || lower.contains("dns")
            || lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("unreachable")
        {
            return ProviderError::with_provider(ErrorCategory::Network, message, provider);
        }

        if lower.contains("503")
            || lower.contains("502")
            || lower.contains("service unavailable")
            || lower.contains("server error")
            || lower.contains("500")
            || lower.contains("internal error")
            || lower.contains("not found")
        {
            return ProviderError::with_provider(ErrorCategory::Unavailable, message, provider);
        }

        if lower.contains("400") || lower.contains("bad request") || lower.contains("malformed")
        {
            return ProviderError::with_provider(ErrorCategory::BadRequest, message, provider);
        }

        if lower.contains("parse")
            || lower.contains("json")
            || lower.contains("unexpected token")
        {
            return ProviderError::with_provider(ErrorCategory::ParseError, message, provider);
        }

        if lower.contains("temporary") || lower.contains("overloaded") {
            return ProviderError::with_provider(ErrorCategory::Transient, message, provider);
        }

        ProviderError::with_provider(ErrorCategory::Unknown, message, provider)
    }

    /// Classify HTTP status code directly (more accurate than string matching)
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> ProviderError {
        match status {
            429 => ProviderError::with_provider(ErrorCategory::RateLimit, message, provider),
            401 | 403 => ProviderError::with_provider(ErrorCategory::Auth, message, provider),
            400 => ProviderError::with_provider(ErrorCategory::BadRequest, message, provider),
            500 | 502 | 503 | 504 => {
                ProviderError::with_provider(ErrorCategory::Transient, message, provider)
            }
            404 => ProviderError::with_provider(ErrorCategory::Unavailable, message, provider),
            _ => Self::classify(message, provider),
        }
    }

    /// Classify a KeyweaveError with type-based routing
    pub fn classify_error(err: &KeyweaveError, provider: &str) -> ProviderError {
        match err {
            KeyweaveError::Provider(e) => e.clone(),
            KeyweaveError::ProviderApi(msg) => Self::classify(msg, provider),
            KeyweaveError::Json(_) => {
                ProviderError::with_provider(ErrorCategory::ParseError, err.to_string(), provider)
            }
            KeyweaveError::Config(_) => {
                ProviderError::with_provider(ErrorCategory::BadRequest, err.to_string(), provider)
            }
            _ => ProviderError::with_provider(ErrorCategory::Unknown, err.to_string(), provider),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structured validation error with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// What validation failed
    pub kind: ValidationErrorKind,
    /// Field or input that failed validation
    pub field: Option<String>,
    /// Detailed message
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Validation failed for '{}': {}", field, self.message)
        } else {
            write!(f, "Validation failed: {}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Validation error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Required input missing
    MissingField,
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum KeyweaveError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    // -------------------------------------------------------------------------
    // Provider Errors
    // -------------------------------------------------------------------------
    /// Structured provider error with category
    #[error("Provider error: {0}")]
    Provider(ProviderError),

    /// Simple provider API error (classified lazily via ErrorClassifier)
    #[error("Provider API error: {0}")]
    ProviderApi(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Validation(ValidationError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Export failed: {0}")]
    Export(String),
}

impl From<ProviderError> for KeyweaveError {
    fn from(err: ProviderError) -> Self {
        KeyweaveError::Provider(err)
    }
}

impl From<ValidationError> for KeyweaveError {
    fn from(err: ValidationError) -> Self {
        KeyweaveError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, KeyweaveError>;

impl KeyweaveError {
    /// Create a missing-input validation error
    pub fn missing(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(
            ValidationError::new(ValidationErrorKind::MissingField, message).with_field(field),
        )
    }

    /// Check if this error is a user input problem rather than a system failure
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// =============================================================================
// Tests
// =============================================================================
