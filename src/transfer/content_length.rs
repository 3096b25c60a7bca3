//! Content length extraction.

use reqwest::header::CONTENT_LENGTH;
use reqwest::Response;

/// Read the total size announced by a response.
///
/// Returns `None` if the `Content-Length` header is missing or is not a
/// valid `u64`; an absent length is not an error.
pub fn content_length(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_content_length)
}

/// Parse the value of a `Content-Length` header.
///
/// ```rust
/// use mcprov::transfer::content_length::parse_content_length;
///
/// assert_eq!(parse_content_length(" 2048 "), Some(2048));
/// assert_eq!(parse_content_length("chunked"), None);
/// ```
pub fn parse_content_length(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}
