mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test]
async fn test_shorten_then_redirect(pool: PgPool) {
    let server = common::test_server(common::create_test_state(pool));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let code = response.json::<serde_json::Value>()["short_code"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/a");
}

#[sqlx::test]
async fn test_redirect_existing_link(pool: PgPool) {
    common::create_test_link(&pool, "Redir1", "https://example.com/target").await;
    let server = common::test_server(common::create_test_state(pool));

    let response = server.get("/Redir1").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_is_case_sensitive(pool: PgPool) {
    common::create_test_link(&pool, "AbCdEf", "https://example.com/upper").await;
    let server = common::test_server(common::create_test_state(pool));

    server.get("/abcdef").await.assert_status_not_found();
    assert_eq!(server.get("/AbCdEf").await.status_code(), 302);
}

#[sqlx::test]
async fn test_redirect_repeated_lookups_are_stable(pool: PgPool) {
    common::create_test_link(&pool, "stable", "https://example.com/same").await;
    let server = common::test_server(common::create_test_state(pool));

    for _ in 0..3 {
        let response = server.get("/stable").await;
        assert_eq!(response.status_code(), 302);
        assert_eq!(response.header("location"), "https://example.com/same");
    }
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server = common::test_server(common::create_test_state(pool));

    let response = server.get("/zzzzzz").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "Short code not found");
}

#[tokio::test]
async fn test_redirect_storage_failure() {
    let state = common::create_state_with(
        common::FailingLinkRepository,
        common::FixedCodeGenerator("abc123"),
    );
    let server = common::test_server(state);

    let response = server.get("/abc123").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_redirect_rejects_malformed_codes_before_storage() {
    // Failing storage would turn a dispatched request into a 500.
    let state = common::create_state_with(
        common::FailingLinkRepository,
        common::FixedCodeGenerator("abc123"),
    );
    let server = common::test_server(state);

    for path in ["/abc12", "/abc1234", "/abc-12", "/abc_12", "/abc%2012"] {
        let response = server.get(path).await;
        assert_eq!(
            response.status_code(),
            StatusCode::NOT_FOUND,
            "{path} should not reach the redirect handler"
        );
    }
}

#[tokio::test]
async fn test_redirect_route_is_get_only() {
    let state = common::create_state_with(
        common::FailingLinkRepository,
        common::FixedCodeGenerator("abc123"),
    );
    let server = common::test_server(state);

    let response = server.post("/abc123").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
