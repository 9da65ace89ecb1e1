//! Owns the library state lifecycle: restore on init, flush on stop.

use async_trait::async_trait;
use axum::{extract::State, routing::get, Json, Router};
use libris_http::openapi::{health_path, json_response, schema_of, schema_ref};
use libris_kernel::{InitCtx, Module};
use serde_json::json;
use std::sync::Arc;

use crate::library::{LibraryService, LibraryStats};

pub struct StorageModule {
    library: LibraryService,
}

impl StorageModule {
    pub fn new(library: LibraryService) -> Self {
        Self { library }
    }
}

#[async_trait]
impl Module for StorageModule {
    fn name(&self) -> &'static str {
        "storage"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let restored = self.library.restore().await?;

        if ctx.settings.library.seed_sample_catalog {
            let added = self.library.seed_sample_catalog().await?;
            if added > 0 {
                tracing::info!(module = self.name(), added, "sample catalog seeded");
            }
        }

        let stats = self.library.stats().await;
        tracing::info!(
            module = self.name(),
            snapshot = ?self.library.snapshot_path(),
            restored,
            books = stats.books,
            borrowers = stats.borrowers,
            loans = stats.loans,
            "storage module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/stats", get(stats))
            .with_state(self.library.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/stats": {
                    "get": {
                        "summary": "Record counts",
                        "tags": ["Storage"],
                        "responses": {
                            "200": json_response("Current counts", schema_ref("LibraryStats"))
                        }
                    }
                },
                "/health": health_path("Storage")
            },
            "components": {
                "schemas": {
                    "LibraryStats": schema_of::<LibraryStats>()
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.library.flush().await?;
        tracing::info!(module = self.name(), "storage module stopped");
        Ok(())
    }
}

async fn health_check() -> &'static str {
    "storage module is healthy"
}

async fn stats(State(library): State<LibraryService>) -> Json<LibraryStats> {
    Json(library.stats().await)
}

pub fn create_module(library: LibraryService) -> Arc<dyn Module> {
    Arc::new(StorageModule::new(library))
}
