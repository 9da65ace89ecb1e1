use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use libris_app::{modules, LibraryService};
use libris_kernel::settings::Settings;
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let library = LibraryService::in_memory();
        let registry = modules::registry(&library);
        Self {
            router: libris_http::build_router(&registry, &Settings::default()),
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, json)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// One borrower (id 1) and one book (id 1) with `copies` available.
    async fn seeded(copies: u32) -> Self {
        let app = Self::new();
        let (status, _) = app.post("/api/borrowers", json!({"name": "Ada"})).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = app
            .post(
                "/api/books",
                json!({"title": "Don Quixote", "author": "Miguel de Cervantes", "quantity": copies}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        app
    }

    async fn available_copies(&self, book_id: u64) -> u64 {
        let (_, book) = self.get(&format!("/api/books/{book_id}")).await;
        book["available_copies"].as_u64().unwrap()
    }

    async fn checkout(&self, book_id: u64) -> (StatusCode, Value) {
        self.post(
            "/api/loans",
            json!({"book_id": book_id, "borrower_id": 1, "due_date": "2030-01-31"}),
        )
        .await
    }
}

#[tokio::test]
async fn create_and_list_books() {
    let app = TestApp::new();

    let (status, book) = app
        .post(
            "/api/books",
            json!({
                "title": "The Little Prince",
                "author": "Antoine de Saint-Exupéry",
                "isbn": "67890",
                "year": 1943,
                "categories": "Children",
                "quantity": "5"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["id"], 1);
    assert_eq!(book["available_copies"], 5);
    assert_eq!(book["year"], 1943);

    let (status, books) = app.get("/api/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books.as_array().unwrap().len(), 1);
    assert_eq!(books[0]["title"], "The Little Prince");
}

#[tokio::test]
async fn book_without_title_or_author_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/books", json!({"title": "Orphan"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["details"][0]["field"], "author");

    let (_, books) = app.get("/api/books").await;
    assert!(books.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn borrower_requires_a_name() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/borrowers", json!({"email": "x@example.org"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["field"], "name");

    let (status, borrower) = app
        .post("/api/borrowers", json!({"name": "Grace", "phone": "555-0100"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(borrower["email"], "");

    let (status, fetched) = app.get("/api/borrowers/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, borrower);

    let (status, _) = app.get("/api/borrowers/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn checkout_and_return_round_trip() {
    let app = TestApp::seeded(2).await;

    let (status, loan) = app.checkout(1).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["returned"], false);
    assert_eq!(loan["return_date"], Value::Null);
    assert_eq!(loan["due_date"], "2030-01-31");
    assert_eq!(app.available_copies(1).await, 1);

    let (status, returned) = app.post("/api/loans/1/return", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned["returned"], true);
    assert!(returned["return_date"].is_string());
    assert_eq!(app.available_copies(1).await, 2);

    let (status, body) = app.post("/api/loans/1/return", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "already_returned");
    assert_eq!(app.available_copies(1).await, 2);
}

#[tokio::test]
async fn checkout_failures_leave_state_unchanged() {
    let app = TestApp::seeded(0).await;

    let (status, body) = app.checkout(1).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "out_of_stock");

    let (status, body) = app.checkout(42).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "book_not_found");

    let (status, body) = app
        .post("/api/loans", json!({"book_id": 1, "borrower_id": 9}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "borrower_not_found");

    let (status, body) = app
        .post("/api/loans", json!({"book_id": "one", "borrower_id": 1}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_payload");

    let (_, loans) = app.get("/api/loans").await;
    assert!(loans.as_array().unwrap().is_empty());
    assert_eq!(app.available_copies(1).await, 0);
}

#[tokio::test]
async fn unknown_loan_cannot_be_returned() {
    let app = TestApp::new();
    let (status, body) = app.post("/api/loans/7/return", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "loan_not_found");
}

#[tokio::test]
async fn three_copies_scenario() {
    let app = TestApp::seeded(3).await;

    for _ in 0..3 {
        let (status, _) = app.checkout(1).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    assert_eq!(app.available_copies(1).await, 0);

    let (status, _) = app.checkout(1).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.post("/api/loans/2/return", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.available_copies(1).await, 1);

    let (status, _) = app.checkout(1).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.checkout(1).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, loans) = app.get("/api/loans").await;
    let ids: Vec<u64> = loans
        .as_array()
        .unwrap()
        .iter()
        .map(|loan| loan["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let (_, stats) = app.get("/api/storage/stats").await;
    assert_eq!(stats["outstanding_loans"], 3);
}

#[tokio::test]
async fn openapi_lists_module_paths() {
    let app = TestApp::new();
    let (status, document) = app.get("/docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);

    for path in [
        "/api/books",
        "/api/books/{id}",
        "/api/borrowers",
        "/api/loans",
        "/api/loans/{id}/return",
        "/api/books/health",
        "/api/borrowers/health",
        "/api/loans/health",
        "/api/storage/health",
    ] {
        assert!(document["paths"][path].is_object(), "missing {path}");
    }
    assert!(document["components"]["schemas"]["Loan"].is_object());
}

#[tokio::test]
async fn every_module_reports_health() {
    let app = TestApp::seeded(1).await;

    for module in ["books", "borrowers", "loans", "storage"] {
        let (status, body) = app.get(&format!("/api/{module}/health")).await;
        assert_eq!(status, StatusCode::OK, "{module}");
        assert_eq!(body, format!("{module} module is healthy"));
    }
}

#[tokio::test]
async fn malformed_path_ids_use_error_envelope() {
    let app = TestApp::seeded(1).await;

    for (method, uri) in [
        (Method::GET, "/api/books/x"),
        (Method::GET, "/api/borrowers/-1"),
        (Method::GET, "/api/loans/abc"),
        (Method::POST, "/api/loans/abc/return"),
    ] {
        let (status, body) = app.send(method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"]["code"], "invalid_payload", "{uri}");
    }
}

#[tokio::test]
async fn numeric_strings_are_accepted_for_year_and_ids() {
    let app = TestApp::seeded(1).await;

    let (status, book) = app
        .post(
            "/api/books",
            json!({"title": "Emma", "author": "Jane Austen", "year": "1815"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["year"], 1815);

    let (status, loan) = app
        .post("/api/loans", json!({"book_id": "2", "borrower_id": "1"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["book_id"], 2);
    assert_eq!(app.available_copies(2).await, 0);
}
