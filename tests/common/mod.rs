#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use bookstore_app::Repositories;
use bookstore_authz::{TokenVerifier, ROLE_ADMIN};
use bookstore_kernel::settings::Settings;
use http_body_util::BodyExt;
use tower::ServiceExt;

const TEST_SECRET: &str = "integration-test-secret";

/// Full application router plus tokens for both roles.
pub struct TestApp {
    pub router: Router,
    pub admin: String,
    pub reader: String,
}

/// App backed by fresh in-memory stores.
pub fn spawn_app() -> TestApp {
    app_with(Repositories::in_memory())
}

/// App backed by the given stores, mirroring the production router.
pub fn app_with(repositories: Repositories) -> TestApp {
    let registry = bookstore_app::build_registry(&repositories).unwrap();
    let verifier = Arc::new(TokenVerifier::new(TEST_SECRET));
    let router = bookstore_http::build_router(&registry, &Settings::default(), verifier.clone());

    let hour = Duration::from_secs(3600);
    TestApp {
        router,
        admin: verifier.issue("admin-user", ROLE_ADMIN, hour).unwrap(),
        reader: verifier.issue("reader-user", "reader", hour).unwrap(),
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, Some(&self.reader), None).await
    }

    pub async fn post(&self, uri: &str, body: serde_json::Value) -> Response {
        self.request(Method::POST, uri, Some(&self.admin), Some(body))
            .await
    }

    pub async fn put(&self, uri: &str, body: serde_json::Value) -> Response {
        self.request(Method::PUT, uri, Some(&self.admin), Some(body))
            .await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.request(Method::DELETE, uri, Some(&self.admin), None)
            .await
    }

    /// POST and return the id assigned to the new record.
    pub async fn create(&self, uri: &str, body: serde_json::Value) -> i64 {
        let response = self.post(uri, body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().unwrap()
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
