use std::env::consts;

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Method};
use reqwest_oauth1::{OAuthClientProvider, Secrets};
use serde_json::Value;

use crate::config::Credentials;
use crate::error::{snippet, Result, TwitterError};

/// Something that can send a signed request to the API and hand back the
/// decoded JSON body.
///
/// `POST` parameters travel form-encoded in the body, anything else puts them
/// in the query string. Non-2xx responses must come back as
/// [`TwitterError::Api`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, method: Method, url: &str, params: &[(&str, String)]) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn request(&self, method: Method, url: &str, params: &[(&str, String)]) -> Result<Value> {
        (**self).request(method, url, params).await
    }
}

/// OAuth 1.0a user-context transport backed by `reqwest`.
#[derive(Clone)]
pub struct OAuthTransport {
    client: reqwest::Client,
    secrets: Secrets<'static>,
}

impl OAuthTransport {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        credentials.validate()?;

        let secrets = Secrets::new_with_token(
            credentials.consumer_key.clone(),
            credentials.consumer_secret.clone(),
            credentials.access_token.clone(),
            credentials.access_token_secret.clone(),
        );

        let mut headers = HeaderMap::new();

        headers.insert("accept", "application/json".parse().map_err(build_err)?);
        headers.insert(
            "user-agent",
            format!(
                "{}/{} on {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                consts::OS
            )
            .parse()
            .map_err(build_err)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(build_err)?;

        Ok(Self { client, secrets })
    }
}

fn build_err(e: impl std::fmt::Display) -> TwitterError {
    TwitterError::Config(format!("failed to build HTTP client: {e}"))
}

#[async_trait]
impl Transport for OAuthTransport {
    async fn request(&self, method: Method, url: &str, params: &[(&str, String)]) -> Result<Value> {
        let pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let request = self
            .client
            .clone()
            .oauth1(self.secrets.clone())
            .request(method.clone(), url);

        let request = if method == Method::POST {
            request.form(&pairs)
        } else {
            request.query(&pairs)
        };

        let network_err = |e: &dyn std::fmt::Display| TwitterError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = match request.send().await.map_err(|e| network_err(&e))? {
            response if response.status().is_success() => response,
            response => {
                let status = response.status();
                let error = response.bytes().await.map_err(|e| network_err(&e))?;

                return Err(TwitterError::Api {
                    url: url.to_string(),
                    status,
                    message: snippet(&error),
                });
            }
        };

        let bytes = response.bytes().await.map_err(|e| network_err(&e))?;

        serde_json::from_slice(&bytes).map_err(|e| TwitterError::Decode {
            message: e.to_string(),
            body_snippet: snippet(&bytes),
        })
    }
}
