mod client;
mod config;
mod errors;
mod oauth;
mod request;
mod response;
mod store;
pub mod telemetry;
mod token;

pub use client::{BatchLookupRequest, KeywordSearchRequest, PartSearchClient};
pub use config::{Config, ConfigLocation};
pub use errors::Error;
pub use oauth::TokenGrant;
pub use request::{HttpMethod, RequestContext};
pub use response::{ApiResponse, RATE_LIMIT_REMAINING_HEADER, STALE_TOKEN_SIGNAL};
pub use store::{CredentialStore, FileCredentialStore, NoopCredentialStore};
pub use token::{Credentials, TokenGuard};

#[cfg(test)]
mod tests;
