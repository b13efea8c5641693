//! Bookstore catalogue service.
//!
//! Books and authors are exposed as CRUD resources under `/api/books` and
//! `/api/authors`; reads need any valid bearer token, writes need the admin role.

pub mod crud;
pub mod modules;
pub mod utils;

use std::sync::Arc;

use anyhow::Context;
use bookstore_authz::TokenVerifier;
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub use modules::Repositories;

/// Registry holding every catalogue module wired to `repositories`.
pub fn build_registry(repositories: &Repositories) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, repositories)?;
    Ok(registry)
}

/// Initialize modules, serve HTTP until shutdown, then stop modules.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&Repositories::in_memory())?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .init_modules(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_modules(&ctx)
        .await
        .context("module start failed")?;

    let verifier = Arc::new(TokenVerifier::new(&settings.auth.jwt_secret));
    let served = bookstore_http::start_server(&registry, &settings, verifier).await;

    registry
        .stop_modules()
        .await
        .context("module shutdown failed")?;
    served
}
