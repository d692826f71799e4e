use serde_json::Value;

/// Error type returned by the API client and the login flow.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response was received: connection failure, DNS, timeout.
    #[error("network error: {0}")]
    Network(String),
    /// Non-success HTTP status code with the best-effort decoded JSON body.
    ///
    /// An absent or malformed body is represented as an empty JSON object.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: Value },
    /// A success response whose body is not the expected JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// Client-side pre-flight validation failed; no request was sent.
    #[error("validation error: {0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status of an [`ApiError::Http`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied `error` detail, when present and non-empty.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } => body
                .get("error")
                .and_then(Value::as_str)
                .filter(|detail| !detail.is_empty()),
            _ => None,
        }
    }
}
