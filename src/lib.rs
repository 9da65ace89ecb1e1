//! libris application library
//!
//! Catalog, borrower and loan modules plus the lending workflow that keeps
//! available copies and outstanding loans consistent.

pub mod library;
pub mod modules;
pub mod utils;

use anyhow::Context;
use libris_kernel::{settings::Settings, InitCtx};

pub use library::{Library, LibraryError, LibraryService};

/// Boot every module, serve HTTP until shutdown, then stop modules in reverse.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let library = LibraryService::from_settings(&settings.storage);
    let registry = modules::registry(&library);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .boot(&ctx)
        .await
        .context("failed to boot modules")?;

    tracing::info!(
        env = ?settings.environment,
        modules = registry.modules().len(),
        "libris bootstrap complete"
    );

    let served = libris_http::start_server(&registry, &settings).await;

    // Flush state even when the server failed
    registry
        .shutdown()
        .await
        .context("failed to stop modules")?;

    served
}
