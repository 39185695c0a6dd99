//! Error types for the rendering client.

/// Failure reported by the rendering service itself.
///
/// Carries the messages from the response's `errors` field, e.g.
/// `"Line 2: Syntax error"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("diagram service reported errors: {}", .messages.join("; "))]
pub struct RenderError {
    /// Messages returned by the service, in order.
    pub messages: Vec<String>,
}

/// Error from a render round-trip.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Diagram text was empty or whitespace-only.
    #[error("diagram source is empty")]
    EmptySource,

    /// The service rejected the diagram.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// HTTP request failed (network error, unreachable host, timeout).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Response could not be decoded into an image location or error list.
    #[error("unexpected response from diagram service: {0}")]
    Protocol(String),
}
