pub mod models;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::Router;
use libris_http::openapi::{error_response, health_path, json_response, schema_of, schema_ref};
use libris_kernel::Module;
use serde_json::json;
use std::sync::Arc;

use crate::library::LibraryService;
use models::{Borrower, CreateBorrower};

/// Borrower registry endpoints.
pub struct BorrowersModule {
    library: LibraryService,
}

impl BorrowersModule {
    pub fn new(library: LibraryService) -> Self {
        Self { library }
    }
}

#[async_trait]
impl Module for BorrowersModule {
    fn name(&self) -> &'static str {
        "borrowers"
    }

    fn routes(&self) -> Router {
        routes::router(self.library.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List borrowers",
                        "tags": ["Borrowers"],
                        "responses": {
                            "200": json_response(
                                "Registered borrowers",
                                json!({ "type": "array", "items": schema_ref("Borrower") })
                            )
                        }
                    },
                    "post": {
                        "summary": "Register a borrower",
                        "tags": ["Borrowers"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": { "schema": schema_ref("CreateBorrower") }
                            }
                        },
                        "responses": {
                            "201": json_response("Registered borrower", schema_ref("Borrower")),
                            "400": error_response("Name missing")
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a borrower",
                        "tags": ["Borrowers"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer", "format": "int64", "minimum": 0 }
                        }],
                        "responses": {
                            "200": json_response("Borrower", schema_ref("Borrower")),
                            "404": error_response("Borrower not found")
                        }
                    }
                },
                "/health": health_path("Borrowers")
            },
            "components": {
                "schemas": {
                    "Borrower": schema_of::<Borrower>(),
                    "CreateBorrower": schema_of::<CreateBorrower>()
                }
            }
        }))
    }

    async fn start(&self, _ctx: &libris_kernel::InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "borrowers module started");
        Ok(())
    }
}

/// Create a new instance of the borrowers module
pub fn create_module(library: LibraryService) -> Arc<dyn Module> {
    Arc::new(BorrowersModule::new(library))
}
