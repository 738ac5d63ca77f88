use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure, including deadline expiry. Never retried
    /// by this crate.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The token endpoint rejected the refresh exchange. Terminal for the
    /// in-flight call.
    #[error("refresh token invalid or expired: {0}")]
    RefreshTokenInvalid(String),
    /// The server rejected a freshly issued token as stale again. Only one
    /// recovery retry is allowed per logical call.
    #[error("stale token retry exhausted: server rejected the refreshed token")]
    StaleTokenRetryExhausted,
    /// Any other non-success HTTP status, with the context needed to
    /// reproduce the exchange.
    #[error("api error: status={status} reason='{reason}' body='{body}'")]
    Api {
        status: StatusCode,
        reason: String,
        body: String,
    },
    #[error("config error: {0}")]
    Config(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
