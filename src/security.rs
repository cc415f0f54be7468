use subtle::ConstantTimeEq;

/// Constant-time string comparison for secrets such as the admin API key.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Whether a request may read admin endpoints.
///
/// With no key configured the endpoints are open. Otherwise the provided
/// key must match exactly; a missing key never matches.
pub fn admin_authorized(configured: Option<&str>, provided: Option<&str>) -> bool {
    match configured {
        None => true,
        Some(expected) => provided.is_some_and(|key| constant_time_compare(key, expected)),
    }
}
