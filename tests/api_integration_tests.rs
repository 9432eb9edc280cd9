//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use typed_cache::{api::create_router, AppState};

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::default())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_len(body: Body) -> usize {
    axum::body::to_bytes(body, usize::MAX).await.unwrap().len()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn post(app: &Router, key: Value, value: Value) -> axum::response::Response {
    send(app, "POST", "/cache/", Some(json!({"key": key, "value": value}))).await
}

async fn list(app: &Router) -> Vec<Value> {
    let response = send(app, "GET", "/cache/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    json["cache"].as_array().unwrap().clone()
}

// == POST Tests ==

#[tokio::test]
async fn test_post_returns_created_with_location() {
    let app = create_test_app();

    let response = post(&app, json!("foo"), json!("bar")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/cache/foo");
    assert_eq!(body_len(response.into_body()).await, 0);
}

#[tokio::test]
async fn test_post_numeric_key_location() {
    let app = create_test_app();

    let response = post(&app, json!(100.001), json!(true)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/cache/100.001");
}

#[tokio::test]
async fn test_post_duplicate_conflicts() {
    let app = create_test_app();
    let key = json!("ayyyyyeeeeeeeeeeeeeeee!!!");

    post(&app, key.clone(), json!("look at that long key")).await;
    let response = post(&app, key, json!("other")).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(list(&app).await[0]["value"], "look at that long key");
}

#[tokio::test]
async fn test_post_invalid_json() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_post_without_content_type() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/")
                .body(Body::from(r#"{"key":"plain","value":1}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_location_resolves_for_reserved_characters() {
    let app = create_test_app();

    for key in ["a/b", "what?", "50%", "tag#1", "two words"] {
        let response = post(&app, json!(key), json!(1)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let location = response.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .to_string();

        let response = send(&app, "GET", &location, None).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {} for {:?}", location, key);
        assert_eq!(
            body_to_json(response.into_body()).await,
            json!({"key": key, "value": 1})
        );
    }
}

#[tokio::test]
async fn test_slash_key_reachable_by_raw_path() {
    let app = create_test_app();
    post(&app, json!("dir/file"), json!("x")).await;

    let response = send(&app, "GET", "/cache/dir/file", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        "PUT",
        "/cache/dir/file",
        Some(json!({"key": "dir/file", "value": "y"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "DELETE", "/cache/dir/file", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_cache_without_slash_redirects() {
    let app = create_test_app();

    let response = send(&app, "GET", "/cache", None).await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/cache/");
}

// == GET Tests ==

#[tokio::test]
async fn test_get_all_returns_every_pair() {
    let app = create_test_app();

    post(&app, json!("alpha"), json!("beta")).await;
    post(&app, json!(100), json!("dolla billz")).await;
    post(&app, json!(100.001), json!(true)).await;

    let mut pairs = list(&app).await;
    pairs.sort_by_key(|pair| pair["key"].to_string());
    assert_eq!(
        pairs,
        vec![
            json!({"key": "alpha", "value": "beta"}),
            json!({"key": 100, "value": "dolla billz"}),
            json!({"key": 100.001, "value": true}),
        ]
    );
}

#[tokio::test]
async fn test_get_single_match_is_object() {
    let app = create_test_app();
    post(&app, json!("bazooty"), json!("tootyfruity")).await;

    let response = send(&app, "GET", "/cache/bazooty", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_to_json(response.into_body()).await,
        json!({"key": "bazooty", "value": "tootyfruity"})
    );
}

#[tokio::test]
async fn test_get_cross_type_match_is_array() {
    let app = create_test_app();
    post(&app, json!(123), json!(123)).await;
    post(&app, json!("123"), json!("one twenty three")).await;

    let response = send(&app, "GET", "/cache/123", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_to_json(response.into_body()).await,
        json!([
            {"key": "123", "value": "one twenty three"},
            {"key": 123, "value": 123}
        ])
    );
}

#[tokio::test]
async fn test_get_unicode_key() {
    let app = create_test_app();
    post(&app, json!("дёЖ"), json!("з")).await;

    // "дёЖ" percent-encoded
    let response = send(&app, "GET", "/cache/%D0%B4%D1%91%D0%96", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["value"], "з");
}

#[tokio::test]
async fn test_get_not_found() {
    let app = create_test_app();

    let response = send(&app, "GET", "/cache/Rando", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hot_key_evicted_after_hundred_reads() {
    let app = create_test_app();
    post(&app, json!("hot"), json!("potato")).await;

    for _ in 0..100 {
        let response = send(&app, "GET", "/cache/hot", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert!(list(&app).await.is_empty());
    let response = send(&app, "GET", "/cache/hot", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_reads_evict_exactly_once() {
    let app = create_test_app();
    post(&app, json!("async"), json!("value")).await;

    let mut handles = Vec::new();
    for _ in 0..100 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            send(&app, "GET", "/cache/async", None).await.status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    assert!(list(&app).await.is_empty());
}

// == PUT Tests ==

#[tokio::test]
async fn test_put_updates_value() {
    let app = create_test_app();
    post(&app, json!(99), json!(100)).await;

    let response = send(&app, "PUT", "/cache/99", Some(json!({"key": 99, "value": 101}))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(body_len(response.into_body()).await, 0);

    let response = send(&app, "GET", "/cache/99", None).await;
    assert_eq!(
        body_to_json(response.into_body()).await,
        json!({"key": 99, "value": 101})
    );
}

#[tokio::test]
async fn test_put_unknown_key_not_found() {
    let app = create_test_app();

    let response = send(
        &app,
        "PUT",
        "/cache/false",
        Some(json!({"key": "false", "value": "barf"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_put_key_mismatch_not_acceptable() {
    let app = create_test_app();
    post(&app, json!("a"), json!(1)).await;

    let response = send(&app, "PUT", "/cache/b", Some(json!({"key": "a", "value": 2}))).await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn test_put_invalid_body() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/cache/a")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

// == DELETE Tests ==

#[tokio::test]
async fn test_delete_key_leaves_others() {
    let app = create_test_app();
    post(&app, json!(true), json!("rainier")).await;
    post(&app, json!("haggis"), json!(9999999.999)).await;

    let response = send(&app, "DELETE", "/cache/true", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(
        list(&app).await,
        vec![json!({"key": "haggis", "value": 9999999.999})]
    );
}

#[tokio::test]
async fn test_delete_unknown_key() {
    let app = create_test_app();

    let response = send(&app, "DELETE", "/cache/%3F", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_all_is_idempotent() {
    let app = create_test_app();
    post(&app, json!("arugula"), json!(false)).await;
    post(&app, json!(-1), json!(-0.0005)).await;

    let response = send(&app, "DELETE", "/cache/", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(list(&app).await.is_empty());

    let response = send(&app, "DELETE", "/cache/", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// == Stats Tests ==

#[tokio::test]
async fn test_stats_after_operations() {
    let app = create_test_app();
    post(&app, json!("k"), json!("v")).await;
    send(&app, "GET", "/cache/k", None).await;
    send(&app, "GET", "/cache/missing", None).await;

    let response = send(&app, "GET", "/stats", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["reads"], 2);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["entries_served"], 1);
    assert_eq!(json["total_entries"], 1);
}
