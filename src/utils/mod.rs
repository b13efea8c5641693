//! Project-specific utilities live here.

/// Correlation tag for log lines: `"{component}-{operation}"`, e.g. `books-update`.
pub fn operation_label(component: &str, operation: &str) -> String {
    format!("{component}-{operation}")
}
