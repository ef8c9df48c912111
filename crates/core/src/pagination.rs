//! Page/limit clamping shared by every paginated listing.

/// Default page size when the caller does not send `limit`.
pub const DEFAULT_LIMIT: i64 = 10;
/// Hard upper bound on page size.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a user-provided page size to `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a user-provided 1-based page number.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}
