//! Error types for trade evaluation.

use thiserror::Error;

/// Error during position sizing.
///
/// Every failure is detected before any arithmetic is performed; the engine
/// never reports NaN or infinite values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizingError {
    /// Input is missing, non-numeric, or outside its allowed range.
    #[error("Invalid input for {field}: {message}")]
    InvalidInput {
        /// Form field (camelCase) the failure is attributed to.
        field: &'static str,
        /// Human-readable reason.
        message: String,
    },
}

impl SizingError {
    /// Build an `InvalidInput` error.
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Field the error is attributed to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } => field,
        }
    }

    /// Reason without the field prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_field() {
        let err = SizingError::invalid("entryPrice", "must be positive");
        assert_eq!(err.to_string(), "Invalid input for entryPrice: must be positive");
        assert_eq!(err.field(), "entryPrice");
        assert_eq!(err.message(), "must be positive");
    }
}
