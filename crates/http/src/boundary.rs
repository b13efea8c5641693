//! Per-operation failure boundary.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;

use crate::error::AppError;

/// Run one handler operation, turning internal errors and panics into a logged 500.
///
/// `label` identifies the operation in logs; `message` says what was being
/// attempted. Client-facing errors (400/401/403/404) pass through untouched.
pub async fn fault_boundary<T, F>(label: &str, message: &str, operation: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match AssertUnwindSafe(operation).catch_unwind().await {
        Ok(Err(AppError::Internal(err))) => {
            tracing::error!(
                operation = %label,
                error = %err,
                cause = %err.root_cause(),
                "{message}"
            );
            Err(AppError::Internal(err))
        }
        Ok(result) => result,
        Err(payload) => {
            let panic = panic_message(payload.as_ref());
            tracing::error!(operation = %label, panic = %panic, "{message}");
            Err(AppError::Internal(anyhow::anyhow!(
                "{label} panicked: {panic}"
            )))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
