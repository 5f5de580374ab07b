//! Checkout Error Types

use thiserror::Error;

use atelier_core::BackendError;

/// Result type alias for checkout operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Identifier absent at confirmation time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingContext {
    /// No `session_id` in the return URL (Stripe path)
    StripeSessionId,
    /// No stored PayPal session reference
    PaypalSessionId,
    /// No stored pending course id
    CourseId,
}

impl MissingContext {
    fn describe(&self) -> &'static str {
        match self {
            MissingContext::StripeSessionId => "payment session id",
            MissingContext::PaypalSessionId => "PayPal session id",
            MissingContext::CourseId => "pending course id",
        }
    }
}

/// Checkout flow errors
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// A required identifier was absent from storage or the return URL.
    /// Never reaches the backend; surfaced immediately.
    #[error("missing {}", .0.describe())]
    Missing(MissingContext),

    /// The backend refused the call or the call never completed
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Checkout-session payload parsed but lacked required fields
    #[error("malformed checkout session payload: {0}")]
    MalformedPayload(String),

    /// Checkout-session payload was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CheckoutError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Missing(MissingContext::StripeSessionId) => {
                "Payment session ID is missing. Please contact support if you were charged.".into()
            }
            CheckoutError::Missing(MissingContext::PaypalSessionId) => {
                "PayPal session ID is missing. Please contact support if you were charged.".into()
            }
            CheckoutError::Missing(MissingContext::CourseId) => {
                "Course information is missing. Please contact support to verify your purchase."
                    .into()
            }
            CheckoutError::Backend(err) => err.user_message(),
            CheckoutError::MalformedPayload(_) | CheckoutError::Json(_) => {
                "Invalid checkout session response".into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_context_messages() {
        let err = CheckoutError::Missing(MissingContext::PaypalSessionId);
        assert!(err.user_message().contains("PayPal session ID is missing"));

        let err = CheckoutError::Missing(MissingContext::CourseId);
        assert!(err.user_message().contains("Course information is missing"));
    }

    #[test]
    fn test_backend_message_passes_through() {
        let err = CheckoutError::Backend(BackendError::Rejected("Session expired".into()));
        assert_eq!(err.user_message(), "Session expired");
    }

    #[test]
    fn test_malformed_payload_message() {
        let err = CheckoutError::MalformedPayload("missing url".into());
        assert_eq!(err.user_message(), "Invalid checkout session response");
    }
}
