//! HTTP contract of `/api/books`.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{body_bytes, body_json, spawn_app};
use serde_json::json;

fn dune() -> serde_json::Value {
    json!({ "title": "Dune", "year": 1965, "authorId": 1 })
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_on_empty_store_returns_empty_array() {
    let app = spawn_app();
    let response = app.get("/api/books").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn list_returns_every_book_in_id_order() {
    let app = spawn_app();
    app.create("/api/books", dune()).await;
    app.create(
        "/api/books",
        json!({ "title": "Hyperion", "year": 1989, "authorId": 2 }),
    )
    .await;

    let books = body_json(app.get("/api/books").await).await;
    let titles: Vec<_> = books
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Dune", "Hyperion"]);
}

#[tokio::test]
async fn list_without_token_is_unauthorized() {
    let app = spawn_app();
    let response = app.request(Method::GET, "/api/books", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Create + get
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_book_is_readable_by_id() {
    let app = spawn_app();
    let response = app.post("/api/books", dune()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert!(id >= 1);
    assert_eq!(location, format!("/api/books/{id}"));

    let response = app.get(&location).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "id": id, "title": "Dune", "year": 1965, "authorId": 1 })
    );
}

#[tokio::test]
async fn get_missing_book_is_404_without_body() {
    let app = spawn_app();
    let response = app.get("/api/books/42").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn create_requires_admin_role() {
    let app = spawn_app();
    let reader = app.reader.clone();
    let response = app
        .request(Method::POST, "/api/books", Some(&reader), Some(dune()))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    assert_eq!(body_json(app.get("/api/books").await).await, json!([]));
}

#[tokio::test]
async fn create_without_body_is_400() {
    let app = spawn_app();
    let admin = app.admin.clone();
    let response = app
        .request(Method::POST, "/api/books", Some(&admin), None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_missing_field_is_400() {
    let app = spawn_app();
    let response = app
        .post("/api/books", json!({ "title": "Dune", "authorId": 1 }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "validation_error");
}

#[tokio::test]
async fn create_carrying_an_id_is_400() {
    let app = spawn_app();
    let response = app
        .post(
            "/api/books",
            json!({ "id": 9, "title": "Dune", "year": 1965, "authorId": 1 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_blank_title_reports_field() {
    let app = spawn_app();
    let response = app
        .post("/api/books", json!({ "title": "", "year": 1965, "authorId": 1 }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["details"][0]["field"], "title");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_replaces_mutable_fields() {
    let app = spawn_app();
    let id = app.create("/api/books", dune()).await;

    let response = app
        .put(
            &format!("/api/books/{id}"),
            json!({ "id": id, "title": "Dune Messiah", "year": 1969, "authorId": 1 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let book = body_json(app.get(&format!("/api/books/{id}")).await).await;
    assert_eq!(book["title"], "Dune Messiah");
    assert_eq!(book["year"], 1969);
    assert_eq!(book["id"], id);
}

#[tokio::test]
async fn update_with_mismatched_id_is_400() {
    let app = spawn_app();
    for _ in 0..7 {
        app.create("/api/books", dune()).await;
    }

    let response = app
        .put(
            "/api/books/5",
            json!({ "id": 7, "title": "Dune", "year": 1965, "authorId": 1 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let untouched = body_json(app.get("/api/books/5").await).await;
    assert_eq!(untouched["title"], "Dune");
}

#[tokio::test]
async fn update_with_non_positive_id_is_400() {
    let app = spawn_app();
    let response = app
        .put(
            "/api/books/0",
            json!({ "id": 0, "title": "Dune", "year": 1965, "authorId": 1 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_without_body_is_400() {
    let app = spawn_app();
    let id = app.create("/api/books", dune()).await;
    let admin = app.admin.clone();

    let response = app
        .request(Method::PUT, &format!("/api/books/{id}"), Some(&admin), None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_of_missing_book_is_404() {
    let app = spawn_app();
    let response = app
        .put(
            "/api/books/3",
            json!({ "id": 3, "title": "Dune", "year": 1965, "authorId": 1 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_invalid_year_is_400() {
    let app = spawn_app();
    let id = app.create("/api/books", dune()).await;

    let response = app
        .put(
            &format!("/api/books/{id}"),
            json!({ "id": id, "title": "Dune", "year": 0, "authorId": 1 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = spawn_app();
    let id = app.create("/api/books", dune()).await;
    let uri = format!("/api/books/{id}");

    let response = app.delete(&uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(app.get(&uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.delete(&uri).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_with_non_positive_id_is_400() {
    let app = spawn_app();
    assert_eq!(
        app.delete("/api/books/0").await.status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        app.delete("/api/books/-4").await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn delete_requires_admin_role() {
    let app = spawn_app();
    let id = app.create("/api/books", dune()).await;
    let reader = app.reader.clone();

    let response = app
        .request(Method::DELETE, &format!("/api/books/{id}"), Some(&reader), None)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        app.get(&format!("/api/books/{id}")).await.status(),
        StatusCode::OK
    );
}
