use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use movie_tracker::db;
use movie_tracker::infrastructure::AppState;
use movie_tracker::infrastructure::tmdb_client::TmdbClient;
use movie_tracker::server;
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Helper to create a test app with one user and one tracked movie
async fn setup_test_app() -> (Router, String, i64, MockServer) {
    let catalog = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/550"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 550,
            "title": "Fight Club"
        })))
        .mount(&catalog)
        .await;

    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let client = TmdbClient::new(&catalog.uri(), "test-key", Duration::from_secs(5)).unwrap();
    let app = server::build_router(AppState::new(db, Arc::new(client), "error-secret", false));

    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/register",
            "username=tester&email=tester%40example.com&password=password123",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let (status, body) = call(
        &app,
        form_request("POST", "/api/favorites", "tmdb_id=550", Some(&cookie)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    (app, cookie, id, catalog)
}

fn form_request(method: &str, uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

fn get_request(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_non_numeric_ids_are_bad_requests() {
    let (app, cookie, _, _catalog) = setup_test_app().await;

    let (status, body) = call(&app, get_request("/api/favorites/abc", &cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid ID");

    let (status, _) = call(
        &app,
        form_request("PATCH", "/api/favorites/1.5/status", "status=vista", Some(&cookie)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, get_request("/api/movies/fight-club", &cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_favorite_is_not_found() {
    let (app, cookie, _, _catalog) = setup_test_app().await;

    let (status, body) = call(&app, get_request("/api/favorites/9999", &cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = call(
        &app,
        form_request("PATCH", "/api/favorites/9999/rating", "rating=5", Some(&cookie)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/favorites/9999")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_status_is_rejected() {
    let (app, cookie, id, _catalog) = setup_test_app().await;

    for status_value in ["seen", "", "VISTA"] {
        let (status, body) = call(
            &app,
            form_request(
                "PATCH",
                &format!("/api/favorites/{}/status", id),
                &format!("status={}", status_value),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{:?}", status_value);
        assert_eq!(body["error"], "Invalid status");
    }

    let (status, _) = call(&app, get_request("/api/favorites?status=later", &cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_rating_is_rejected() {
    let (app, cookie, id, _catalog) = setup_test_app().await;
    let uri = format!("/api/favorites/{}/rating", id);

    for rating in ["0", "11", "nine", ""] {
        let (status, body) = call(
            &app,
            form_request("PATCH", &uri, &format!("rating={}", rating), Some(&cookie)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{:?}", rating);
        assert_eq!(body["error"], "Rating must be between 1 and 10");
    }

    for rating in ["1", "10"] {
        let (status, body) = call(
            &app,
            form_request("PATCH", &uri, &format!("rating={}", rating), Some(&cookie)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rating"].to_string(), rating);
    }
}

#[tokio::test]
async fn test_bad_list_paging_is_rejected() {
    let (app, cookie, _, _catalog) = setup_test_app().await;

    let (status, _) = call(&app, get_request("/api/favorites?limit=-5", &cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, get_request("/api/favorites?limit=1&offset=0", &cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
}
