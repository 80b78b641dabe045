// Client-side error types for the Showreel API
use thiserror::Error;

/// Errors surfaced by the HTTP client layer.
///
/// The server responds with a JSON envelope on both success and failure;
/// `Api` carries the decoded failure envelope. Unauthorized responses are
/// split out because they drive the session-clearing guard.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status} {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not logged in - run 'showreel auth login' first")]
    NotLoggedIn,

    #[error("invalid server response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// True when the server rejected our credentials (401/403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized(_) | ClientError::Api { status: 401 | 403, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_detection_covers_both_shapes() {
        assert!(ClientError::Unauthorized("token expired".to_string()).is_unauthorized());
        assert!(ClientError::Api {
            status: 403,
            code: "FORBIDDEN".to_string(),
            message: "no access".to_string(),
        }
        .is_unauthorized());
        assert!(!ClientError::NotLoggedIn.is_unauthorized());
        assert!(!ClientError::Api {
            status: 500,
            code: "INTERNAL_SERVER_ERROR".to_string(),
            message: "boom".to_string(),
        }
        .is_unauthorized());
    }

    #[test]
    fn api_error_display_includes_status_and_code() {
        let err = ClientError::Api {
            status: 409,
            code: "CONFLICT".to_string(),
            message: "job already cancelled".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (409 CONFLICT): job already cancelled"
        );
    }
}
