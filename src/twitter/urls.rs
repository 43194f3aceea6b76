use serde_json::{Map, Value};

use super::types::Tweet;

/// Collect the expanded URLs a tweet links to.
///
/// URLs from the tweet's own `entities.urls` come first, followed by those of
/// `retweeted_status.entities.urls`. Duplicates are kept. Missing or oddly
/// shaped entity blocks simply contribute nothing.
pub fn extract_urls(tweet: &Tweet) -> Vec<String> {
    let mut urls = entity_urls(tweet.entities());

    if let Some(retweeted) = tweet.retweeted_status() {
        urls.extend(entity_urls(
            retweeted.get("entities").and_then(Value::as_object),
        ));
    }

    urls
}

fn entity_urls(entities: Option<&Map<String, Value>>) -> Vec<String> {
    entities
        .and_then(|e| e.get("urls"))
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|u| u.get("expanded_url"))
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
