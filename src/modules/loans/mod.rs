pub mod ledger;
pub mod models;
pub mod routes;
pub mod workflow;

use async_trait::async_trait;
use axum::Router;
use libris_http::openapi::{error_response, health_path, json_response, schema_of, schema_ref};
use libris_kernel::{InitCtx, Module};
use serde_json::json;
use std::sync::Arc;

use crate::library::LibraryService;
use models::{CheckoutRequest, Loan};

/// Lending endpoints: checkout, return and the loan ledger.
pub struct LoansModule {
    library: LibraryService,
}

impl LoansModule {
    pub fn new(library: LibraryService) -> Self {
        Self { library }
    }
}

#[async_trait]
impl Module for LoansModule {
    fn name(&self) -> &'static str {
        "loans"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let stats = self.library.stats().await;
        tracing::info!(
            module = self.name(),
            outstanding = stats.outstanding_loans,
            "loans module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.library.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let loan_id = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64", "minimum": 0 }
        }]);

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List loans",
                        "tags": ["Loans"],
                        "responses": {
                            "200": json_response(
                                "Loans in the order they were opened",
                                json!({ "type": "array", "items": schema_ref("Loan") })
                            )
                        }
                    },
                    "post": {
                        "summary": "Check out a book",
                        "tags": ["Loans"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": { "schema": schema_ref("CheckoutRequest") }
                            }
                        },
                        "responses": {
                            "201": json_response("Opened loan", schema_ref("Loan")),
                            "400": error_response("Invalid ids or book out of stock"),
                            "404": error_response("Book or borrower not found")
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a loan",
                        "tags": ["Loans"],
                        "parameters": loan_id.clone(),
                        "responses": {
                            "200": json_response("Loan", schema_ref("Loan")),
                            "404": error_response("Loan not found")
                        }
                    }
                },
                "/{id}/return": {
                    "post": {
                        "summary": "Return a loan",
                        "tags": ["Loans"],
                        "parameters": loan_id,
                        "responses": {
                            "200": json_response("Closed loan", schema_ref("Loan")),
                            "400": error_response("Loan already returned"),
                            "404": error_response("Loan not found")
                        }
                    }
                },
                "/health": health_path("Loans")
            },
            "components": {
                "schemas": {
                    "Loan": schema_of::<Loan>(),
                    "CheckoutRequest": schema_of::<CheckoutRequest>()
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "loans module stopped");
        Ok(())
    }
}

/// Create a new instance of the loans module
pub fn create_module(library: LibraryService) -> Arc<dyn Module> {
    Arc::new(LoansModule::new(library))
}
