//! Integration tests for continuation-link pagination.

use std::collections::HashMap;

use harbor_api::models::UserResp;
use harbor_api::{ClientConfig, HttpError, RestClient, RetryPolicy, StatusErrorKind};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(uri: &str, max_pages: Option<usize>) -> RestClient {
    let mut builder = ClientConfig::builder()
        .url(uri)
        .username("username")
        .secret("secret")
        .retry(RetryPolicy::no_retry());
    if let Some(max_pages) = max_pages {
        builder = builder.max_pages(max_pages);
    }
    RestClient::new(&builder.build().unwrap()).unwrap()
}

fn page_query(page: u32) -> Option<HashMap<String, String>> {
    Some(HashMap::from([("page".to_string(), page.to_string())]))
}

fn next_link(page: u32) -> String {
    format!("</api/v2.0/users?page={page}>; rel=\"next\"")
}

/// Mounts `pages` linked pages of one user each.
async fn mount_user_pages(server: &MockServer, pages: u32) {
    for page in 1..=pages {
        let mut response =
            ResponseTemplate::new(200).set_body_json(json!([{"username": format!("user{page}")}]));
        if page < pages {
            response = response.insert_header("link", next_link(page + 1).as_str());
        }
        Mock::given(method("GET"))
            .and(path("/api/v2.0/users"))
            .and(query_param("page", page.to_string()))
            .respond_with(response)
            .expect(1)
            .mount(server)
            .await;
    }
}

fn usernames(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Following Links
// ============================================================================

#[tokio::test]
async fn test_two_pages_are_concatenated_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/users"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"username": "user1"}, {"username": "user2"}]))
                .insert_header("link", next_link(2).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/users"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"username": "user3"}, {"username": "user4"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri(), None);
    let body = client.get("/users", page_query(1)).await.unwrap().unwrap();

    assert_eq!(usernames(&body), ["user1", "user2", "user3", "user4"]);
}

#[tokio::test]
async fn test_hundred_page_chain() {
    let server = MockServer::start().await;
    mount_user_pages(&server, 100).await;

    let client = create_test_client(&server.uri(), None);
    let users: Vec<UserResp> = client.get_all("/users", page_query(1), true).await.unwrap();

    assert_eq!(users.len(), 100);
    assert_eq!(users[0].username.as_deref(), Some("user1"));
    assert_eq!(users[99].username.as_deref(), Some("user100"));
}

#[tokio::test]
async fn test_non_list_page_stops_with_partial_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/users"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"username": "user1"}]))
                .insert_header("link", next_link(2).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/users"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"username": "user2"}))
                .insert_header("link", next_link(3).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/users"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri(), None);
    let body = client.get("/users", page_query(1)).await.unwrap().unwrap();

    assert_eq!(usernames(&body), ["user1"]);
}

#[tokio::test]
async fn test_follow_links_false_returns_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/users"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"username": "user1"}]))
                .insert_header("link", next_link(2).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/users"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"username": "user2"}])))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri(), None);
    let body = client
        .get_with_links("/users", page_query(1), false)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(usernames(&body), ["user1"]);
}

#[tokio::test]
async fn test_link_without_next_relation_is_not_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"username": "user1"}]))
                .insert_header("link", "</api/v2.0/users?page=2>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri(), None);
    let body = client.get("/users", None).await.unwrap().unwrap();
    assert_eq!(usernames(&body), ["user1"]);
}

#[tokio::test]
async fn test_non_list_first_page_is_returned_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/users/current"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"username": "admin"}))
                .insert_header("link", next_link(2).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri(), None);
    let body = client.get("/users/current", None).await.unwrap();
    assert_eq!(body, Some(json!({"username": "admin"})));
}

// ============================================================================
// Page Cap and Failures
// ============================================================================

#[tokio::test]
async fn test_max_pages_caps_collection() {
    let server = MockServer::start().await;
    for page in 1..=3u32 {
        Mock::given(method("GET"))
            .and(path("/api/v2.0/users"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"username": format!("user{page}")}]))
                    .insert_header("link", next_link(page + 1).as_str()),
            )
            .expect(if page <= 2 { 1 } else { 0 })
            .mount(&server)
            .await;
    }

    let client = create_test_client(&server.uri(), Some(2));
    let body = client.get("/users", page_query(1)).await.unwrap().unwrap();
    assert_eq!(usernames(&body), ["user1", "user2"]);
}

#[tokio::test]
async fn test_error_on_continuation_page_fails_the_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/users"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"username": "user1"}]))
                .insert_header("link", next_link(2).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/users"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"errors": [{"code": "UNAUTHORIZED", "message": "unauthorized"}]}),
        ))
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri(), None);
    let error = client.get("/users", page_query(1)).await.unwrap_err();

    match error {
        HttpError::Status(e) => {
            assert_eq!(e.kind, StatusErrorKind::Unauthorized);
            assert!(e.url.contains("page=2"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_continuation_request_keeps_authorization() {
    let server = MockServer::start().await;
    mount_user_pages(&server, 2).await;

    let client = create_test_client(&server.uri(), None);
    client.get("/users", page_query(1)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert_eq!(
            request.headers.get("authorization").unwrap(),
            "Basic dXNlcm5hbWU6c2VjcmV0"
        );
    }
}
