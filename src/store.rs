use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::errors::Error;
use crate::token::Credentials;

/// Write-back hook for rotated credentials. The token guard serializes all
/// calls, so implementations never see two persists at once.
pub trait CredentialStore: Send + Sync {
    fn persist(&self, credentials: &Credentials) -> Result<(), Error>;
}

/// Keeps rotated credentials in memory only.
pub struct NoopCredentialStore;

impl CredentialStore for NoopCredentialStore {
    fn persist(&self, _credentials: &Credentials) -> Result<(), Error> {
        Ok(())
    }
}

/// Writes rotated credentials back into the JSON config file they were read
/// from, so a restart resumes with the newest token pair. Fields outside the
/// token triple are preserved.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn persist(&self, credentials: &Credentials) -> Result<(), Error> {
        let mut config: Config = serde_json::from_str(&fs::read_to_string(&self.path)?)?;
        config.access_token = credentials.access_token().to_string();
        config.refresh_token = credentials.refresh_token().to_string();
        config.token_expires_at = Some(credentials.expires_at());

        let serialized = serde_json::to_string_pretty(&config)?;
        // Replace atomically via a sibling tmp file.
        let tmp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(serialized.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
