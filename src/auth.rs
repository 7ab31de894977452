use axum::http::{header, HeaderMap};

/// Header the upstream gateway sets after authenticating the parent account.
pub const PARENT_ID_HEADER: &str = "x-parent-id";
const PARENT_AUTH_SCHEME: &str = "Parent ";

/// Caller identity as asserted upstream. Authentication itself happens before
/// requests reach this service.
pub fn extract_parent_id(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers
        .get(PARENT_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return Some(value.to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?
        .strip_prefix(PARENT_AUTH_SCHEME)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
