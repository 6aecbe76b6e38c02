use crate::test_app;
use axum::{
    Router,
    body::{Body, Bytes, HttpBody},
    http::{Request, Response, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use sqlx::{Pool, Sqlite};
use tower::Service;


/// Collect a response body into a string
async fn body_string<B>(body: B) -> String
where
    B: HttpBody<Data = Bytes>,
    B::Error: std::fmt::Debug,
{
    let bytes = body
        .collect()
        .await
        .expect("failed to collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is not utf8")
}

async fn get(app: &mut Router, uri: &str) -> Response<Body> {
    let req = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .expect("Failed to build request");
    app.as_service()
        .call(req)
        .await
        .expect("Failed to execute request")
}

async fn post_form(app: &mut Router, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
    let form = serde_urlencoded::to_string(fields).expect("failed to serialize form");
    let req = Request::builder()
        .uri(uri)
        .method("POST")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .expect("Failed to build request");
    app.as_service()
        .call(req)
        .await
        .expect("Failed to execute request")
}

fn assert_redirects_to_list(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get("location")
            .expect("no location header")
            .to_str()
            .expect("invalid location header"),
        "/"
    );
}

#[test_log::test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_favicon_and_static(pool: Pool<Sqlite>) {
    let (mut app, _state) = test_app(pool);
    let response = get(&mut app, "/favicon.ico").await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);

    let response = get(&mut app, "/static/style.css").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[test_log::test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_unsupported_content_type(pool: Pool<Sqlite>) {
    let (mut app, _state) = test_app(pool);
    let req = Request::builder()
        .uri("/add")
        .method("POST")
        .body(Body::from("name=foo"))
        .expect("Failed to build request");
    let response = app
        .as_service()
        .call(req)
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
