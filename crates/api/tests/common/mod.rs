#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use scout_api::airtable::{AirtableClient, AirtableConfig};
use scout_api::auth::jwt::{Claims, JwtConfig};
use scout_api::config::ServerConfig;
use scout_api::router::build_app_router;
use scout_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// The Airtable client points at a closed local port, so passthrough calls
/// fail as upstream errors instead of reaching the real service.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        },
        airtable: AirtableConfig {
            api_url: "http://127.0.0.1:9/v0".to_string(),
            api_key: "test-key".to_string(),
            base_id: "appTest".to_string(),
        },
    }
}

/// Build the full application router, with the production middleware stack,
/// on top of the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        airtable: Arc::new(AirtableClient::new(config.airtable.clone())),
    };
    build_app_router(state, &config)
}

/// Sign a token for `subject` the way the identity provider does, expiring
/// `exp_offset_secs` from now.
pub fn sign_token(subject: &str, secret: &str, exp_offset_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        exp: now + exp_offset_secs,
        iat: now,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token signing should succeed")
}

/// A valid bearer token for the test JWT secret.
pub fn test_token() -> String {
    sign_token("test-user", &test_config().jwt.secret, 900)
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not valid JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request failed")
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create an interview through the API and return its id.
pub async fn create_interview(pool: &PgPool, name: &str) -> String {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/interviews", serde_json::json!({ "name": name })).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"]
        .as_str()
        .expect("interview id should be a string")
        .to_string()
}

/// Create a screen through the API and return the response JSON.
pub async fn create_screen(
    pool: &PgPool,
    interview_id: &str,
    title: &str,
    order: Option<i32>,
) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/interview_screens",
        serde_json::json!({ "interview_id": interview_id, "title": title, "order": order }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}

/// Fetch an interview and return `(title, order)` for each screen in the
/// order the API lists them.
pub async fn screen_orders(pool: &PgPool, interview_id: &str) -> Vec<(String, i64)> {
    let app = build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/interviews/{interview_id}")).await).await;
    json["screens"]
        .as_array()
        .expect("screens should be an array")
        .iter()
        .map(|s| {
            (
                s["title"].as_str().unwrap().to_string(),
                s["order"].as_i64().unwrap(),
            )
        })
        .collect()
}
