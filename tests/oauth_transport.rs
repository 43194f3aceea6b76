use reqwest::StatusCode;
use serde_json::json;
use twitter_lookup::{Credentials, TwitterClient, TwitterError};
use wiremock::matchers::{body_string_contains, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials::new("consumer key", "consumer secret", "access token", "token secret")
        .expect("credentials")
}

fn client_for(server: &MockServer) -> TwitterClient {
    TwitterClient::new(&credentials())
        .expect("client")
        .with_base_url(server.uri())
}

#[tokio::test]
async fn users_lookup_posts_signed_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1.1/users/lookup.json"))
        .and(header_exists("authorization"))
        .and(body_string_contains("screen_name=foo%2Cbar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Foo", "screen_name": "foo", "description": ""},
            {"id": 2, "name": "Bar", "screen_name": "bar", "description": ""}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let users = client_for(&server)
        .fetch_users(&["foo", "bar"])
        .await
        .expect("users");

    let names: Vec<_> = users.iter().filter_map(|u| u.screen_name()).collect();
    assert_eq!(names, vec!["foo", "bar"]);
}

#[tokio::test]
async fn statuses_lookup_gets_with_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/lookup.json"))
        .and(query_param("id", "1,2"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "text": "content 2"},
            {"id": 1, "text": "content 1"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let tweets = client_for(&server)
        .fetch_tweets(&[1, 2])
        .await
        .expect("tweets");

    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets[0].text(), Some("content 2"));
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/statuses/lookup.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"errors":[{"code":32}]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_tweets(&[1])
        .await
        .unwrap_err();

    match err.root() {
        TwitterError::Api { status, message, url } => {
            assert_eq!(*status, StatusCode::UNAUTHORIZED);
            assert!(message.contains("\"code\":32"));
            assert!(url.ends_with("/1.1/statuses/lookup.json"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1.1/users/lookup.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_users(&["foo"])
        .await
        .unwrap_err();

    assert!(matches!(
        err.root(),
        TwitterError::Decode { body_snippet, .. } if body_snippet.contains("oops")
    ));
}

#[tokio::test]
async fn long_error_pages_are_truncated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1.1/users/lookup.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<p>over capacity</p>".repeat(500)))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_users(&["foo"])
        .await
        .unwrap_err();

    match err.root() {
        TwitterError::Api { status, message, .. } => {
            assert_eq!(*status, StatusCode::SERVICE_UNAVAILABLE);
            assert!(message.starts_with("<p>over capacity</p>"));
            assert!(message.ends_with('…'));
            assert!(message.len() < 1024);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let err = TwitterClient::new(&credentials())
        .expect("client")
        .with_base_url("http://127.0.0.1:9")
        .fetch_tweets(&[1])
        .await
        .unwrap_err();

    assert!(matches!(err, TwitterError::Chunk { index: 0, size: 1, .. }), "{err}");
    match err.root() {
        TwitterError::Network { url, .. } => {
            assert_eq!(url, "http://127.0.0.1:9/1.1/statuses/lookup.json");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_credentials_fail_before_any_request() {
    let creds = Credentials {
        consumer_key: "key".into(),
        consumer_secret: "secret".into(),
        access_token: String::new(),
        access_token_secret: "token secret".into(),
    };

    let err = TwitterClient::new(&creds).err().expect("config error");
    assert!(matches!(err, TwitterError::Config(_)));
}
