use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("server error: {status} -> {body}")]
    Status { status: u16, body: String },
    #[error("login required")]
    LoginRequired,
    #[error("permission denied")]
    PermissionDenied,
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("other: {0}")]
    Other(String),
}

impl ClientError {
    /// Maps an `error` code from a JSON envelope to a variant.
    pub fn from_code(code: &str) -> Self {
        match code {
            "login_required" => ClientError::LoginRequired,
            "permission_denied" => ClientError::PermissionDenied,
            other => ClientError::Rejected(other.to_string()),
        }
    }

    /// Network, status and decode failures, as opposed to a refusal the
    /// server reported inside a well-formed response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_) | ClientError::Serde(_) | ClientError::Status { .. }
        )
    }
}
