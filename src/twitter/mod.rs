pub mod transport;
pub mod types;
pub mod urls;

use std::fmt::Display;

use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::config::Credentials;
use crate::error::{snippet, Result, TwitterError};

use self::transport::{OAuthTransport, Transport};
use self::types::{Tweet, User};

pub use self::urls::extract_urls;

pub const TWITTER_API_BASE_URL: &str = "https://api.twitter.com";

/// Maximum number of identifiers the lookup endpoints accept per call.
pub const LOOKUP_LIMIT: usize = 100;

const USERS_LOOKUP_PATH: &str = "/1.1/users/lookup.json";
const STATUSES_LOOKUP_PATH: &str = "/1.1/statuses/lookup.json";

/// Split a batch into the fewest contiguous chunks of at most [`LOOKUP_LIMIT`].
pub fn lookup_chunks<T>(ids: &[T]) -> std::slice::Chunks<'_, T> {
    ids.chunks(LOOKUP_LIMIT)
}

/// Comma-join a chunk the way the lookup endpoints expect it.
pub fn join_ids<T: Display>(chunk: &[T]) -> String {
    chunk
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Clone)]
pub struct TwitterClient<T = OAuthTransport> {
    transport: T,
    base_url: String,
}

impl TwitterClient<OAuthTransport> {
    /// Client signing requests with the given user-context credentials.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Ok(Self::with_transport(OAuthTransport::new(credentials)?))
    }
}

impl<T: Transport> TwitterClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            base_url: TWITTER_API_BASE_URL.to_string(),
        }
    }

    /// Point the client at another API host (e.g. a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up users by screen name, 100 per `POST users/lookup` call.
    pub async fn fetch_users<S: AsRef<str>>(&self, screen_names: &[S]) -> Result<Vec<User>> {
        let names: Vec<&str> = screen_names.iter().map(AsRef::as_ref).collect();

        self.lookup(Method::POST, USERS_LOOKUP_PATH, "screen_name", &names)
            .await
    }

    /// Look up tweets by id, 100 per `GET statuses/lookup` call.
    ///
    /// Results come back in whatever order the API returns them; re-key by
    /// [`Tweet::id`] if alignment with the input matters.
    pub async fn fetch_tweets(&self, tweet_ids: &[u64]) -> Result<Vec<Tweet>> {
        self.lookup(Method::GET, STATUSES_LOOKUP_PATH, "id", tweet_ids)
            .await
    }

    async fn lookup<I, R>(&self, method: Method, path: &str, param: &str, ids: &[I]) -> Result<Vec<R>>
    where
        I: Display,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut records = Vec::new();

        for (index, chunk) in lookup_chunks(ids).enumerate() {
            tracing::debug!(%url, index, size = chunk.len(), "lookup chunk");

            let fetched = self
                .lookup_chunk::<I, R>(method.clone(), &url, param, chunk)
                .await
                .map_err(|e| {
                    tracing::warn!(%url, index, size = chunk.len(), error = %e, "lookup chunk failed");

                    TwitterError::Chunk {
                        index,
                        size: chunk.len(),
                        source: Box::new(e),
                    }
                })?;

            tracing::debug!(%url, index, records = fetched.len(), "lookup chunk done");
            records.extend(fetched);
        }

        Ok(records)
    }

    async fn lookup_chunk<I, R>(
        &self,
        method: Method,
        url: &str,
        param: &str,
        chunk: &[I],
    ) -> Result<Vec<R>>
    where
        I: Display,
        R: DeserializeOwned,
    {
        let body = self
            .transport
            .request(method, url, &[(param, join_ids(chunk))])
            .await?;

        decode_records(body)
    }
}

fn decode_records<R: DeserializeOwned>(body: Value) -> Result<Vec<R>> {
    let decode_err = |message: String| TwitterError::Decode {
        message,
        body_snippet: snippet(body.to_string().as_bytes()),
    };

    if !body.is_array() {
        return Err(decode_err("expected a JSON array of records".to_string()));
    }

    Vec::<R>::deserialize(&body).map_err(|e| decode_err(e.to_string()))
}
