//! Integration tests for the Twitter client against a mock API server.

use leadscout_core::pipeline::search_recent_query;
use leadscout_core::{LeadError, TwitterClient, TwitterCredentials};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connect(server: &MockServer) -> TwitterClient {
    let credentials = TwitterCredentials {
        bearer_token: "test-token".to_string(),
    };
    TwitterClient::with_base_url(&credentials, &server.uri())
        .expect("expected client construction to succeed")
}

fn search_body() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {
                "id": "111",
                "text": "anyone know a good workout app?",
                "author_id": "u1",
                "created_at": "2025-08-14T09:30:00.000Z",
                "public_metrics": {
                    "like_count": 4,
                    "retweet_count": 1,
                    "reply_count": 2,
                    "quote_count": 0
                }
            },
            {
                "id": "222",
                "text": "starting the gym next week, need an app",
                "author_id": "u9",
                "created_at": "2025-08-15T18:00:00.000Z",
                "public_metrics": {
                    "like_count": 0,
                    "retweet_count": 0,
                    "reply_count": 0,
                    "quote_count": 0
                }
            }
        ],
        "includes": {
            "users": [
                {"id": "u1", "name": "Gym Curious", "username": "gymcurious"}
            ]
        },
        "meta": {"result_count": 2}
    })
}

#[tokio::test]
async fn search_sends_the_filtered_query_and_resolves_authors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(header("Authorization", "Bearer test-token"))
        .and(query_param("query", "need workout app -is:retweet lang:en"))
        .and(query_param("max_results", "15"))
        .and(query_param("expansions", "author_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&server)
        .await;

    let client = connect(&server);
    let leads = search_recent_query(&client, "need workout app", 15).await;

    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].username, "gymcurious");
    assert_eq!(leads[0].url, "https://twitter.com/gymcurious/status/111");
    assert_eq!(leads[0].likes, 4);
    assert_eq!(leads[1].username, "unknown");
}

#[tokio::test]
async fn search_with_no_matches_yields_no_leads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"meta": {"result_count": 0}})),
        )
        .mount(&server)
        .await;

    let client = connect(&server);
    let leads = search_recent_query(&client, "custom workout program", 15).await;

    assert!(leads.is_empty());
}

#[tokio::test]
async fn non_success_search_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = connect(&server);
    let result = client.search_recent("free fitness app", 15).await;

    match result {
        Err(LeadError::Twitter(message)) => assert!(message.contains("429")),
        other => panic!("expected a Twitter error, got {other:?}"),
    }
}

#[tokio::test]
async fn a_failed_query_contributes_no_leads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = connect(&server);
    let leads = search_recent_query(&client, "free fitness app", 15).await;

    assert!(leads.is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>service unavailable</html>"))
        .mount(&server)
        .await;

    let client = connect(&server);
    let result = client.search_recent("workout plan app", 15).await;

    assert!(matches!(result, Err(LeadError::Deserialize { .. })));
}

#[tokio::test]
async fn page_size_is_capped_at_the_endpoint_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(query_param("max_results", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"meta": {"result_count": 0}})),
        )
        .mount(&server)
        .await;

    let client = connect(&server);
    let response = client
        .search_recent("best workout app", 500)
        .await
        .expect("expected the capped request to match the mock");

    assert!(response.data.is_empty());
}
