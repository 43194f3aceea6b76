use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TwitterError>;

#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("network error calling {url}: {message}")]
    Network { url: String, message: String },
    #[error("Twitter API error {status} from {url}: {message}")]
    Api {
        url: String,
        status: StatusCode,
        message: String,
    },
    #[error("decode error: {message}, body_snippet: {body_snippet}")]
    Decode {
        message: String,
        body_snippet: String,
    },
    #[error("lookup chunk {index} ({size} ids) failed: {source}")]
    Chunk {
        index: usize,
        size: usize,
        #[source]
        source: Box<TwitterError>,
    },
}

impl TwitterError {
    /// Strip any chunk wrappers and return the underlying failure.
    pub fn root(&self) -> &TwitterError {
        match self {
            TwitterError::Chunk { source, .. } => source.root(),
            other => other,
        }
    }
}

const SNIPPET_MAX: usize = 512;

pub(crate) fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= SNIPPET_MAX {
        return text.into_owned();
    }

    let mut end = SNIPPET_MAX;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_unwraps_nested_chunks() {
        let err = TwitterError::Chunk {
            index: 2,
            size: 100,
            source: Box::new(TwitterError::Config("inner".into())),
        };

        assert!(matches!(err.root(), TwitterError::Config(msg) if msg == "inner"));
        assert!(err.to_string().starts_with("lookup chunk 2 (100 ids) failed"));
    }

    #[test]
    fn snippet_truncates_long_bodies() {
        let body = "x".repeat(2000);
        let s = snippet(body.as_bytes());
        assert!(s.ends_with('…'));
        assert_eq!(s.chars().count(), SNIPPET_MAX + 1);

        assert_eq!(snippet(b"short"), "short");
    }
}
