pub mod health;
pub mod tasks;
pub mod weekly;

/// Treat a blank `q` parameter as no query, matching the search box which
/// trims its input before sending.
pub(crate) fn normalize_query(q: Option<String>) -> Option<String> {
    q.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
