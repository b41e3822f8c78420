//! URL helpers for site resolution
//!
//! These functions avoid allocations and work directly on string slices.

// =============================================================================
// Scheme Extraction
// =============================================================================

/// Get the position after "://" of an HTTP(S) URL.
///
/// Matching is exact: `HTTPS://` is not accepted, the same way registry keys
/// are matched case-sensitively.
#[inline]
pub fn get_scheme_end(url: &str) -> Option<usize> {
    if url.starts_with("https://") {
        Some("https://".len())
    } else if url.starts_with("http://") {
        Some("http://".len())
    } else {
        None
    }
}

// =============================================================================
// Host Extraction
// =============================================================================

/// Check if a byte ends the host component.
#[inline]
pub fn is_host_delimiter(b: u8) -> bool {
    matches!(b, b'/' | b':' | b'?' | b'#')
}

/// Extract the host of an HTTP(S) URL as a slice of the input.
///
/// The host is the longest non-empty run after the scheme that contains none
/// of `/`, `:`, `?`, `#`. Userinfo is not stripped, so `user@host` is returned
/// whole and will not match a registry key.
#[inline]
pub fn extract_host(url: &str) -> Option<&str> {
    let start = get_scheme_end(url)?;
    let rest = &url[start..];
    let end = rest
        .bytes()
        .position(is_host_delimiter)
        .unwrap_or(rest.len());

    if end == 0 {
        return None;
    }
    Some(&rest[..end])
}
