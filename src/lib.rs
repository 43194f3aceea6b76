//! Batch lookups of Twitter users and tweets over the v1.1 API, plus
//! extraction of the expanded URLs a tweet links to.

pub mod config;
pub mod error;
pub mod twitter;

pub use config::Credentials;
pub use error::{Result, TwitterError};
pub use twitter::{
    extract_urls,
    transport::{OAuthTransport, Transport},
    types::{Tweet, User},
    TwitterClient, LOOKUP_LIMIT,
};
