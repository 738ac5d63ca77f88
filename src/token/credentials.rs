use jiff::{SignedDuration, Timestamp};

use crate::config::Config;
use crate::oauth::TokenGrant;

/// Credential state shared by every logical call: the OAuth2 client pair,
/// the current bearer token, the refresh token, and the bearer's expiry.
#[derive(Clone, Debug)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    access_token: String,
    refresh_token: String,
    expires_at: Timestamp,
}

impl Credentials {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            access_token: config.access_token.clone(),
            refresh_token: config.refresh_token.clone(),
            // Unknown expiry reads as already expired; the first call
            // refreshes before anything goes out.
            expires_at: config.token_expires_at.unwrap_or(Timestamp::UNIX_EPOCH),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Raw bearer token suitable for Authorization headers.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Strict expiry check: a token expiring exactly at `now` is still
    /// usable. Pure, no side effects.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at < now
    }

    /// Installs a successful exchange. Access token and expiry move
    /// together; callers never observe one without the other. The refresh
    /// token rotates only when the grant carries a replacement.
    pub(crate) fn apply_grant(&mut self, grant: &TokenGrant, now: Timestamp) {
        self.access_token = grant.access_token.clone();
        self.expires_at = now + SignedDuration::from_secs(i64::from(grant.expires_in));
        if let Some(rotated) = grant.refresh_token.as_deref()
            && !rotated.is_empty()
        {
            self.refresh_token = rotated.to_string();
        }
    }
}
