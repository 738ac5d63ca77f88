use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::Error;

/// Payload the token endpoint returns for a refresh-token grant. A provider
/// that rotates refresh tokens includes the replacement; one that does not
/// omits the field.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: u32,
}

/// Drives the `grant_type=refresh_token` exchange. The protocol stays opaque
/// to the rest of the crate: an exchange yields a new grant or a terminal
/// refresh failure.
#[derive(Clone)]
pub(crate) struct TokenExchanger {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    timeout: Duration,
}

impl TokenExchanger {
    pub(crate) fn new(
        http: Client,
        token_url: String,
        client_id: String,
        client_secret: String,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            token_url,
            client_id,
            client_secret,
            timeout,
        }
    }

    pub(crate) async fn refresh_grant(&self, refresh_token: &str) -> Result<TokenGrant, Error> {
        debug!(token_url = %self.token_url, "refresh.exchange");
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::RefreshTokenInvalid(format!(
                "token endpoint returned {status}: {body}"
            )));
        }
        let grant: TokenGrant = serde_json::from_str(&body)?;
        Ok(grant)
    }
}
