//! API utility functions
//!
//! Pure, stateless helpers for interpreting the request headers.

use crate::api::error::DispatchError;

/// The two `/`-separated halves of a `Content-Type` header, taken literally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentType<'a> {
    pub major: &'a str,
    pub minor: &'a str,
}

/// Splits a Content-Type header into its major and minor parts
///
/// Accepts exactly one `/` with something on both sides. No trimming and no
/// parameter handling: `text/ok` yields the label `ok`, `image/png` the
/// format `png`.
///
/// Rejects:
/// - `imagejpeg` (no separator)
/// - `image/svg/xml` (more than one separator)
/// - `/png`, `image/` (empty part)
pub fn parse_content_type(content_type: &str) -> Result<ContentType<'_>, DispatchError> {
    let mut parts = content_type.split('/');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(major), Some(minor), None) if !major.is_empty() && !minor.is_empty() => {
            Ok(ContentType { major, minor })
        }
        _ => Err(DispatchError::BadRequest),
    }
}
