//! Bearer-token authentication extractors.
//!
//! The [`TokenVerifier`] reaches handlers as a request extension installed by
//! [`RouterBuilder::with_authentication`](crate::router::RouterBuilder::with_authentication),
//! so these extractors work with any router state.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use bookstore_authz::{Claims, TokenVerifier};

use crate::error::AppError;

/// Any caller holding a valid token.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub Claims);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let verifier = parts
            .extensions
            .get::<Arc<TokenVerifier>>()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("token verifier is not installed on this router"))?;

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = verifier.verify(token).map_err(|err| {
            tracing::warn!(error = %err, "rejected bearer token");
            AppError::unauthorized("Invalid or expired token")
        })?;

        Ok(RequireAuth(claims))
    }
}

/// Caller holding a valid token with the admin role.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Claims);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(claims) = RequireAuth::from_request_parts(parts, state).await?;
        if !claims.is_admin() {
            tracing::warn!(sub = %claims.sub, role = %claims.role, "admin role required");
            return Err(AppError::forbidden("Admin role required"));
        }
        Ok(RequireAdmin(claims))
    }
}
