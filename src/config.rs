//! read configuration from a file or the environment

use jiff::Timestamp;

use crate::errors::Error;

pub enum ConfigLocation {
    File(String),
    Env,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    /// Token endpoint override; defaults to the search host's own endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_expires_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

pub(crate) async fn read_config(loc: ConfigLocation) -> Result<Config, Error> {
    let config = match loc {
        ConfigLocation::File(path) => {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        }
        ConfigLocation::Env => read_config_from_env()?,
    };
    Ok(config)
}

fn read_config_from_env() -> Result<Config, Error> {
    let token_expires_at: Option<Timestamp> = match std::env::var("PARTGRID_TOKEN_EXPIRES_AT") {
        Ok(raw) => Some(raw.parse().map_err(|_| {
            Error::Config("Invalid PARTGRID_TOKEN_EXPIRES_AT value".to_string())
        })?),
        Err(_) => None,
    };
    let request_timeout_secs: Option<u64> = match std::env::var("PARTGRID_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(raw.parse().map_err(|_| {
            Error::Config("Invalid PARTGRID_REQUEST_TIMEOUT_SECS value".to_string())
        })?),
        Err(_) => None,
    };
    Ok(Config {
        client_id: std::env::var("PARTGRID_CLIENT_ID")
            .map_err(|_| Error::Config("Missing PARTGRID_CLIENT_ID env var".to_string()))?,
        client_secret: std::env::var("PARTGRID_CLIENT_SECRET")
            .map_err(|_| Error::Config("Missing PARTGRID_CLIENT_SECRET env var".to_string()))?,
        api_url: std::env::var("PARTGRID_API_URL")
            .map_err(|_| Error::Config("Missing PARTGRID_API_URL env var".to_string()))?,
        token_url: std::env::var("PARTGRID_TOKEN_URL").ok(),
        access_token: std::env::var("PARTGRID_ACCESS_TOKEN").unwrap_or_default(),
        refresh_token: std::env::var("PARTGRID_REFRESH_TOKEN").unwrap_or_default(),
        token_expires_at,
        request_timeout_secs,
    })
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[tokio::test]
    async fn file_config_round_trips() {
        let path = format!("target/partgrid_config_{}.json", Uuid::new_v4());
        std::fs::write(
            &path,
            r#"{
                "client_id": "cid",
                "client_secret": "s3cret",
                "api_url": "https://api.partgrid.example",
                "access_token": "tok",
                "refresh_token": "ref",
                "token_expires_at": "2030-01-01T00:00:00Z",
                "request_timeout_secs": 5
            }"#,
        )
        .unwrap();

        let config = read_config(ConfigLocation::File(path.clone()))
            .await
            .expect("config file should parse");
        assert_eq!(config.client_id, "cid");
        assert_eq!(config.access_token, "tok");
        assert_eq!(
            config.token_expires_at,
            Some("2030-01-01T00:00:00Z".parse().unwrap())
        );
        assert_eq!(config.request_timeout_secs, Some(5));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn missing_required_field_is_a_parse_error() {
        let path = format!("target/partgrid_config_{}.json", Uuid::new_v4());
        std::fs::write(&path, r#"{"client_id": "cid"}"#).unwrap();

        let err = read_config(ConfigLocation::File(path.clone()))
            .await
            .expect_err("client_secret and api_url are required");
        assert!(matches!(err, Error::Json(_)));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn optional_fields_default_to_empty() {
        let path = format!("target/partgrid_config_{}.json", Uuid::new_v4());
        std::fs::write(
            &path,
            r#"{
                "client_id": "cid",
                "client_secret": "s3cret",
                "api_url": "https://api.partgrid.example"
            }"#,
        )
        .unwrap();

        let config = read_config(ConfigLocation::File(path.clone()))
            .await
            .expect("token fields are optional");
        assert_eq!(config.access_token, "");
        assert_eq!(config.refresh_token, "");
        assert!(config.token_url.is_none());
        assert!(config.token_expires_at.is_none());
        assert!(config.request_timeout_secs.is_none());

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn env_config_reports_missing_vars() {
        // Only meaningful in an environment without real credentials set.
        if std::env::var("PARTGRID_CLIENT_ID").is_ok() {
            return;
        }

        let err = read_config(ConfigLocation::Env)
            .await
            .expect_err("unset env vars cannot produce a config");
        match err {
            Error::Config(message) => assert!(message.contains("PARTGRID_CLIENT_ID")),
            other => panic!("expected a config error, got {other}"),
        }
    }
}
