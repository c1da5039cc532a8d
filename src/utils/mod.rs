//! Utility modules for the batch manager
//!
//! - **error**: error type, constructors and HTTP mapping
//! - **logging**: tracing subscriber setup

pub mod error; // Error handling
pub mod logging; // Logging

pub use error::{ManagerError, Result};

/// Truncate string to specified length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3);
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Read an environment variable, treating empty values as unset
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
