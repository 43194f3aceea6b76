//! OAuth 1.0a credentials for the v1.1 API.

use std::env::var;

use crate::error::{Result, TwitterError};

pub const CONSUMER_KEY_VAR: &str = "TWITTER_CONSUMER_KEY";
pub const CONSUMER_SECRET_VAR: &str = "TWITTER_CONSUMER_SECRET";
pub const ACCESS_TOKEN_VAR: &str = "TWITTER_ACCESS_TOKEN";
pub const ACCESS_TOKEN_SECRET_VAR: &str = "TWITTER_ACCESS_TOKEN_SECRET";

/// Optional override for the API host, mostly useful against a local mock.
pub const API_BASE_URL_VAR: &str = "TWITTER_API_BASE_URL";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

// Secrets stay out of logs and panics.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Build credentials from explicit values. Every value must be non-empty.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        };
        credentials.validate()?;

        Ok(credentials)
    }

    /// Read the four `TWITTER_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::new(
            required(CONSUMER_KEY_VAR)?,
            required(CONSUMER_SECRET_VAR)?,
            required(ACCESS_TOKEN_VAR)?,
            required(ACCESS_TOKEN_SECRET_VAR)?,
        )
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            (CONSUMER_KEY_VAR, &self.consumer_key),
            (CONSUMER_SECRET_VAR, &self.consumer_secret),
            (ACCESS_TOKEN_VAR, &self.access_token),
            (ACCESS_TOKEN_SECRET_VAR, &self.access_token_secret),
        ];

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(TwitterError::Config(format!("{name} is empty"))),
            None => Ok(()),
        }
    }
}

fn required(name: &str) -> Result<String> {
    var(name).map_err(|_| TwitterError::Config(format!("{name} is not set")))
}
