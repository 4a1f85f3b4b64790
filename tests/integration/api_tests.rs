//! API integration tests

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{create_router, AppConfig, AppState};

fn app() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn add_book(app: &Router, book: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["bookId"].as_str().unwrap().to_string()
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

fn full_book(name: &str, page_count: i64, read_page: i64, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_store_size() {
    let app = app();
    add_book(&app, full_book("Dunia", 10, 1, true)).await;

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"], 1);
    assert_eq!(body["log_format"], "pretty");
}

#[tokio::test]
async fn test_add_book() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(full_book("Dunia", 100, 25, true))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");
    assert_eq!(body["data"]["bookId"].as_str().unwrap().len(), 16);
}

#[tokio::test]
async fn test_add_book_without_name() {
    let app = app();
    let mut book = full_book("x", 100, 25, true);
    book.as_object_mut().unwrap().remove("name");

    let (status, body) = send(&app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Gagal menambahkan buku. Mohon isi nama buku");

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn test_add_book_read_page_exceeds_page_count() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(full_book("Dunia", 5, 10, true))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_malformed_body_uses_fail_envelope() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(json!({ "name": 42 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_list_books_projection() {
    let app = app();
    let id = add_book(&app, full_book("Dunia", 100, 25, true)).await;

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].as_object().unwrap().len(), 3);
    assert_eq!(books[0]["id"], id.as_str());
    assert_eq!(books[0]["name"], "Dunia");
    assert_eq!(books[0]["publisher"], "Dicoding Indonesia");
}

#[tokio::test]
async fn test_list_books_filters() {
    let app = app();
    add_book(&app, full_book("Aku Bisa", 100, 100, false)).await;
    add_book(&app, full_book("Laskar Pelangi", 300, 20, true)).await;
    add_book(&app, full_book("Kau dan AKU", 50, 10, true)).await;

    let names = |body: &Value| -> Vec<String> {
        body["data"]["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, body) = send(&app, Method::GET, "/books?name=aku", None).await;
    assert_eq!(names(&body), vec!["Aku Bisa", "Kau dan AKU"]);

    let (_, body) = send(&app, Method::GET, "/books?reading=1", None).await;
    assert_eq!(names(&body), vec!["Laskar Pelangi", "Kau dan AKU"]);

    let (_, body) = send(&app, Method::GET, "/books?reading=0", None).await;
    assert_eq!(names(&body), vec!["Aku Bisa"]);

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(names(&body), vec!["Aku Bisa"]);

    let (_, body) = send(&app, Method::GET, "/books?name=AKU&reading=1&finished=0", None).await;
    assert_eq!(names(&body), vec!["Kau dan AKU"]);

    let (status, body) = send(&app, Method::GET, "/books?name=zzz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(names(&body).is_empty());
}

#[tokio::test]
async fn test_list_books_repeated_query_key() {
    let app = app();
    add_book(&app, full_book("Dunia", 10, 1, true)).await;
    add_book(&app, full_book("Sophie", 10, 1, false)).await;

    let (status, body) = send(&app, Method::GET, "/books?reading=1&reading=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "Dunia");

    let (status, body) = send(&app, Method::GET, "/books?name=so&name=du&unknown=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["books"][0]["name"], "Sophie");
}

#[tokio::test]
async fn test_large_page_count_accepted() {
    let app = app();
    let id = add_book(
        &app,
        json!({ "name": "Big", "pageCount": 3_000_000_000i64, "readPage": 10 }),
    )
    .await;

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["data"]["book"]["pageCount"], 3_000_000_000i64);
}

#[tokio::test]
async fn test_timestamps_have_millisecond_precision() {
    let app = app();
    let id = add_book(&app, full_book("Dunia", 10, 1, true)).await;

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    let inserted = body["data"]["book"]["insertedAt"].as_str().unwrap();
    let (_, fraction) = inserted.split_once('.').unwrap();
    assert_eq!(fraction.len(), 4, "{}", inserted);
    assert!(fraction.ends_with('Z'));
}

#[tokio::test]
async fn test_get_book_not_found() {
    let (status, body) = send(&app(), Method::GET, "/books/xxxxxxxxxxxxxxxx", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Buku tidak ditemukan");
}

#[tokio::test]
async fn test_update_book_not_found() {
    let (status, body) = send(
        &app(),
        Method::PUT,
        "/books/xxxxxxxxxxxxxxxx",
        Some(full_book("Dunia", 10, 1, true)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Gagal memperbarui buku. Id tidak ditemukan");
}

#[tokio::test]
async fn test_update_book_validation() {
    let app = app();
    let id = add_book(&app, full_book("Dunia", 10, 1, true)).await;
    let uri = format!("/books/{}", id);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "name": "", "pageCount": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Gagal memperbarui buku. Mohon isi nama buku");

    let (status, body) = send(&app, Method::PUT, &uri, Some(full_book("Dunia", 10, 11, true))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["book"]["readPage"], 1);
}

#[tokio::test]
async fn test_delete_book_not_found() {
    let app = app();
    add_book(&app, full_book("Dunia", 10, 1, true)).await;

    let (status, body) = send(&app, Method::DELETE, "/books/xxxxxxxxxxxxxxxx", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_keeps_order_of_others() {
    let app = app();
    let first = add_book(&app, full_book("One", 1, 1, true)).await;
    let second = add_book(&app, full_book("Two", 1, 1, true)).await;
    let third = add_book(&app, full_book("Three", 1, 1, true)).await;

    let (status, _) = send(&app, Method::DELETE, &format!("/books/{}", second), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    let ids: Vec<&str> = body["data"]["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![first.as_str(), third.as_str()]);
}

#[tokio::test]
async fn test_book_lifecycle() {
    let app = app();
    let id = add_book(
        &app,
        json!({ "name": "Dunia", "pageCount": 100, "readPage": 100 }),
    )
    .await;
    let uri = format!("/books/{}", id);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let book = body["data"]["book"].clone();
    assert_eq!(book["id"], id.as_str());
    assert_eq!(book["name"], "Dunia");
    assert_eq!(book["pageCount"], 100);
    assert_eq!(book["readPage"], 100);
    assert_eq!(book["finished"], true);
    assert_eq!(book["insertedAt"], book["updatedAt"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Dunia2", "pageCount": 200, "readPage": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil diperbarui");

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    let updated = &body["data"]["book"];
    assert_eq!(updated["name"], "Dunia2");
    assert_eq!(updated["finished"], false);
    assert_eq!(updated["insertedAt"], book["insertedAt"]);
    assert!(timestamp(&updated["updatedAt"]) > timestamp(&book["updatedAt"]));

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Buku berhasil dihapus");

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_finished_cannot_be_set_by_client() {
    let app = app();
    let mut book = full_book("Dunia", 100, 10, true);
    book["finished"] = json!(true);
    let id = add_book(&app, book).await;

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["data"]["book"]["finished"], false);
}

/// Live-server smoke test. Run with: cargo test -- --ignored
#[tokio::test]
#[ignore]
async fn test_live_server_round_trip() {
    let base_url =
        std::env::var("BOOKSHELF_TEST_URL").unwrap_or_else(|_| "http://localhost:9000".to_string());
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/books", base_url))
        .json(&full_book("Live", 10, 5, true))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["data"]["bookId"].as_str().expect("No book ID").to_string();

    let response = client
        .delete(format!("{}/books/{}", base_url, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
}
