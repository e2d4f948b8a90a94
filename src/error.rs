//! Provider-level failures raised by STS, Organizations and IAM calls

use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use thiserror::Error;

/// Error codes AWS uses when the caller may not perform the call
const AUTHORIZATION_ERROR_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "UnauthorizedOperation",
    "InvalidClientTokenId",
];

/// Failure of a single provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The caller's identity may not assume the role or call the API
    #[error("Not authorized for {target}: {message}")]
    Authorization { target: String, message: String },

    /// Any other error reported by the service or the SDK
    #[error("{operation} failed for {target}: {message}")]
    Service {
        operation: String,
        target: String,
        message: String,
    },

    /// The service answered, but not with what the call promises
    #[error("Unexpected {operation} response: {message}")]
    MalformedResponse { operation: String, message: String },
}

impl ProviderError {
    /// Classify an SDK error by its AWS error code
    pub fn from_sdk<E>(operation: &str, target: &str, err: &E) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error,
    {
        let message = match (err.code(), err.message()) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (Some(code), None) => code.to_string(),
            _ => DisplayErrorContext(err).to_string(),
        };

        if err.code().is_some_and(is_authorization_code) {
            Self::Authorization {
                target: target.to_string(),
                message,
            }
        } else {
            Self::Service {
                operation: operation.to_string(),
                target: target.to_string(),
                message,
            }
        }
    }

    pub fn malformed(operation: &str, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization { .. })
    }
}

fn is_authorization_code(code: &str) -> bool {
    AUTHORIZATION_ERROR_CODES.contains(&code)
}
