#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use backoffice_api::{ApiClient, Category, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Facade contract ─────────────────────────────────────────────────

#[tokio::test]
async fn test_get_forwards_query_pairs() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products/"))
        .and(query_param("search", "lamp"))
        .and(query_param("in_stock", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let products = client
        .list_products(&[
            ("search".to_owned(), "lamp".to_owned()),
            ("in_stock".to_owned(), "true".to_owned()),
        ])
        .await
        .unwrap();

    assert!(products.is_empty());
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/categories/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Electronics"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7,
            "name": "Electronics",
            "prefix": "",
            "product_count": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_category("Electronics").await.unwrap();

    assert_eq!(
        created,
        Category {
            id: 7,
            name: "Electronics".into(),
            prefix: String::new(),
            product_count: 0,
        }
    );
}

#[tokio::test]
async fn test_empty_success_body_is_not_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/categories/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_category(4).await.unwrap();
}

#[tokio::test]
async fn test_non_success_status_maps_to_request_failed() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/categories/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Category already exists"})),
        )
        .mount(&server)
        .await;

    let result = client.create_category("Books").await;

    match result {
        Err(Error::RequestFailed {
            status,
            ref status_text,
            ref detail,
        }) => {
            assert_eq!(status, 400);
            assert_eq!(status_text, "Bad Request");
            assert_eq!(detail.as_deref(), Some("Category already exists"));
        }
        other => panic!("expected RequestFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_request_failed_without_detail_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.list_category_summaries().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "Internal Server Error");
}

#[tokio::test]
async fn test_malformed_payload_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/categories/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let result = client.list_category_summaries().await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Endpoints ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_category_summaries() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/categories/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Books", "prefix": "BK", "product_count": 12},
            {"id": 2, "name": "Toys", "prefix": "TY", "product_count": 0}
        ])))
        .mount(&server)
        .await;

    let categories = client.list_category_summaries().await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Books");
    assert_eq!(categories[0].product_count, 12);
    assert_eq!(categories[1].prefix, "TY");
}

#[tokio::test]
async fn test_update_conversation_user_uses_patch() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/conversations/users/9"))
        .and(body_json(json!({"status": "archived"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "name": "Reza",
            "status": "archived"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client
        .update_conversation_user(9, &json!({"status": "archived"}))
        .await
        .unwrap();

    assert_eq!(user.status.as_deref(), Some("archived"));
}

#[tokio::test]
async fn test_import_products_sends_multipart() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/products/import"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"created": 3, "updated": 1})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let report = client
        .import_products("data.csv", Bytes::from_static(b"name,price\nLamp,10\n"))
        .await
        .unwrap();

    assert_eq!(report.created, 3);
    assert_eq!(report.updated, 1);
    assert!(report.errors.is_empty());

    let received = server.received_requests().await.unwrap();
    let content_type = received[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
}

// ── Chat proxy ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_chat_forwards_reply_verbatim() {
    let (server, client) = setup().await;

    let reply = json!({"reply": "سلام", "conversation_id": "c-1", "tokens": 17});

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"message": "hello", "conversation_id": "c-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&reply))
        .expect(1)
        .mount(&server)
        .await;

    let got = client.chat(Some("hello"), Some("c-1")).await.unwrap();

    assert_eq!(got, reply);
}

#[tokio::test]
async fn test_chat_without_message_never_hits_network() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let missing = client.chat(None, None).await.unwrap_err();
    let blank = client.chat(Some("   "), Some("c-1")).await.unwrap_err();

    assert!(matches!(missing, Error::BadRequest { .. }));
    assert_eq!(blank.status(), Some(400));
}
