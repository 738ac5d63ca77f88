use std::future::Future;
use std::sync::Arc;

use jiff::Timestamp;
use tokio::sync::{Mutex, RwLock};

use crate::errors::Error;
use crate::oauth::TokenGrant;
use crate::store::CredentialStore;
use crate::telemetry::refresh::RefreshTelemetry;

use super::Credentials;

/// Serializes refresh decisions over the shared credential state. Concurrent
/// callers that observe an expired or stale token converge on one exchange
/// and all see its result.
pub struct TokenGuard {
    credentials: Arc<RwLock<Credentials>>,
    refresh_lock: Mutex<()>,
    store: Arc<dyn CredentialStore>,
}

impl TokenGuard {
    pub fn new(credentials: Credentials, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            credentials: Arc::new(RwLock::new(credentials)),
            refresh_lock: Mutex::new(()),
            store,
        }
    }

    /// Snapshot of the current credential state.
    pub async fn current(&self) -> Credentials {
        self.credentials.read().await.clone()
    }

    /// Proactive lifecycle check: a usable token is returned as-is; an
    /// expired one is exchanged through `refresh` before anything goes out.
    /// On exchange failure the stored credentials are left untouched and the
    /// error is terminal for the in-flight call.
    pub async fn ensure_fresh<F, Fut>(
        &self,
        refresh: F,
        telemetry: &RefreshTelemetry,
    ) -> Result<Credentials, Error>
    where
        F: FnMut(String) -> Fut + Send,
        Fut: Future<Output = Result<TokenGrant, Error>> + Send,
    {
        {
            let credentials = self.credentials.read().await;
            if !credentials.is_expired(Timestamp::now()) {
                return Ok(credentials.clone());
            }
        }

        let mut refresh = refresh;
        // Only one refresh attempt may run at a time.
        let _lock = self.refresh_lock.lock().await;
        {
            let credentials = self.credentials.read().await;
            if !credentials.is_expired(Timestamp::now()) {
                // A concurrent call refreshed while we waited for the lock.
                telemetry.emit_reused();
                return Ok(credentials.clone());
            }
        }
        self.exchange_and_apply(&mut refresh, telemetry).await
    }

    /// Reactive recovery for a token the server rejected as stale. Skips the
    /// expiry check; if the rejected token was already rotated by a
    /// concurrent call, that rotation is reused instead of exchanging again.
    pub async fn force_refresh<F, Fut>(
        &self,
        stale_token: &str,
        refresh: F,
        telemetry: &RefreshTelemetry,
    ) -> Result<Credentials, Error>
    where
        F: FnMut(String) -> Fut + Send,
        Fut: Future<Output = Result<TokenGrant, Error>> + Send,
    {
        let mut refresh = refresh;
        let _lock = self.refresh_lock.lock().await;
        {
            let credentials = self.credentials.read().await;
            if credentials.access_token() != stale_token {
                telemetry.emit_reused();
                return Ok(credentials.clone());
            }
        }
        self.exchange_and_apply(&mut refresh, telemetry).await
    }

    // Caller must hold `refresh_lock`.
    async fn exchange_and_apply<F, Fut>(
        &self,
        refresh: &mut F,
        telemetry: &RefreshTelemetry,
    ) -> Result<Credentials, Error>
    where
        F: FnMut(String) -> Fut + Send,
        Fut: Future<Output = Result<TokenGrant, Error>> + Send,
    {
        let refresh_token = { self.credentials.read().await.refresh_token().to_string() };
        telemetry.emit_start(Timestamp::now());
        match refresh(refresh_token).await {
            Ok(grant) => {
                let updated = {
                    let mut writer = self.credentials.write().await;
                    writer.apply_grant(&grant, Timestamp::now());
                    writer.clone()
                };
                telemetry.emit_success(updated.expires_at(), Timestamp::now());
                if let Err(err) = self.store.persist(&updated) {
                    telemetry.emit_persist_failed(&err);
                }
                Ok(updated)
            }
            Err(err) => {
                telemetry.emit_failure(&err, Timestamp::now());
                Err(err)
            }
        }
    }
}
