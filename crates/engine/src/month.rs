//! Month key resolution.
//!
//! A month key is a `YYYY-MM` string used both as display label and as the
//! prefix filter against stored dates. No format validation happens here; a
//! malformed key simply matches no rows downstream.

use chrono::{DateTime, Utc};

/// Resolve the reporting month: the caller's parameter when present and
/// non-empty, the current UTC month otherwise.
pub fn resolve(param: Option<&str>) -> String {
    resolve_at(param, Utc::now())
}

pub fn resolve_at(param: Option<&str>, now: DateTime<Utc>) -> String {
    match param {
        Some(month) if !month.is_empty() => month.to_string(),
        _ => now.format("%Y-%m").to_string(),
    }
}
