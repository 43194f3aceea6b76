use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Timestamp layout used by the v1.1 API, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// A user object as returned by `users/lookup`.
///
/// The payload is kept as-is; fields are only interpreted by the accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Map<String, Value>);

/// A tweet object as returned by `statuses/lookup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tweet(Map<String, Value>);

macro_rules! json_record {
    ($name:ident) => {
        impl $name {
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }
        }

        impl From<$name> for Value {
            fn from(record: $name) -> Self {
                Value::Object(record.0)
            }
        }
    };
}

json_record!(User);
json_record!(Tweet);

impl User {
    /// String form of the user id, whichever way the API sent it.
    pub fn id_str(&self) -> Option<String> {
        match (self.0.get("id_str"), self.0.get("id")) {
            (Some(Value::String(s)), _) => Some(s.clone()),
            (_, Some(Value::String(s))) => Some(s.clone()),
            (_, Some(Value::Number(n))) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<u64> {
        numeric_id(&self.0)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn screen_name(&self) -> Option<&str> {
        self.0.get("screen_name").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(Value::as_str)
    }
}

impl Tweet {
    pub fn id(&self) -> Option<u64> {
        numeric_id(&self.0)
    }

    pub fn text(&self) -> Option<&str> {
        self.0
            .get("text")
            .or_else(|| self.0.get("full_text"))
            .and_then(Value::as_str)
    }

    pub fn entities(&self) -> Option<&Map<String, Value>> {
        self.0.get("entities").and_then(Value::as_object)
    }

    pub fn retweeted_status(&self) -> Option<&Map<String, Value>> {
        self.0.get("retweeted_status").and_then(Value::as_object)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.0.get("created_at")?.as_str()?;

        DateTime::parse_from_str(raw, CREATED_AT_FORMAT)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Expanded URLs of this tweet and of the tweet it retweets.
    pub fn urls(&self) -> Vec<String> {
        super::urls::extract_urls(self)
    }
}

fn numeric_id(map: &Map<String, Value>) -> Option<u64> {
    match map.get("id") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => map
            .get("id_str")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok()),
    }
}
