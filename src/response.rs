use reqwest::StatusCode;
use reqwest::header::HeaderMap;

use crate::errors::Error;

/// Response header carrying the advisory remaining-call quota.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "X-RateLimit-Remaining";

/// Marker the server embeds in a 401 body when the bearer token it was
/// given has gone stale, as opposed to an ordinary authorization failure.
pub const STALE_TOKEN_SIGNAL: &str = "The access token has expired";

/// Successful outcome of a logical API call. The body stays an opaque JSON
/// string; callers deserialize into whatever domain shape they expect.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub body: String,
    pub rate_limit_remaining: Option<u32>,
}

/// Turns a completed exchange into the caller-facing outcome. Success keeps
/// the raw body (empty bodies stay empty strings); anything else becomes an
/// [`Error::Api`] carrying status, reason phrase, and body.
pub(crate) fn translate(
    status: StatusCode,
    rate_limit_remaining: Option<u32>,
    body: String,
) -> Result<ApiResponse, Error> {
    if status.is_success() {
        return Ok(ApiResponse {
            body,
            rate_limit_remaining,
        });
    }
    Err(Error::Api {
        status,
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    })
}

/// Reads the advisory rate-limit counter. Absence or an unparsable value is
/// not an error; the counter is telemetry, not enforcement.
pub(crate) fn rate_limit_remaining(headers: &HeaderMap) -> Option<u32> {
    headers
        .get(RATE_LIMIT_REMAINING_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.trim().parse().ok())
}

/// Predicate over a 401 body deciding whether the server flagged the token
/// as stale. Evaluated against the raw body text.
pub(crate) fn is_stale_token(body: &str) -> bool {
    body.contains(STALE_TOKEN_SIGNAL)
}
