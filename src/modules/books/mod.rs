pub mod models;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::Router;
use libris_http::openapi::{error_response, health_path, json_response, schema_of, schema_ref};
use libris_kernel::{InitCtx, Module};
use serde_json::json;
use std::sync::Arc;

use crate::library::LibraryService;
use models::{Book, CreateBook};

/// Catalog endpoints: list, add and look up books.
pub struct BooksModule {
    library: LibraryService,
}

impl BooksModule {
    pub fn new(library: LibraryService) -> Self {
        Self { library }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.library.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let book_id = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64", "minimum": 0 }
        }]);

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": json_response(
                                "Books in insertion order",
                                json!({ "type": "array", "items": schema_ref("Book") })
                            )
                        }
                    },
                    "post": {
                        "summary": "Add a book to the catalog",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": { "schema": schema_ref("CreateBook") }
                            }
                        },
                        "responses": {
                            "201": json_response("Created book", schema_ref("Book")),
                            "400": error_response("Title or author missing")
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": book_id,
                        "responses": {
                            "200": json_response("Book", schema_ref("Book")),
                            "404": error_response("Book not found")
                        }
                    }
                },
                "/health": health_path("Books")
            },
            "components": {
                "schemas": {
                    "Book": schema_of::<Book>(),
                    "CreateBook": schema_of::<CreateBook>()
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(library: LibraryService) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(library))
}
