//! Response metadata for XHR handler methods.
//!
//! When an AJAX request is served by a `<verb>_xhr` method the response is
//! marked as uncached JSON.

use chrono::{DateTime, Utc};
use toro_core::ResponseHeaders;

/// `Expires` value: a date far in the past.
pub const EXPIRED: &str = "Mon, 26 Jul 1997 05:00:00 GMT";

/// Value of the `X-Requested-With` header sent by script-initiated requests.
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Format `time` as an RFC 7231 HTTP date.
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// The JSON content type plus the cache-busting header set, in emission order.
///
/// `Cache-Control` appears twice; the second line adds to the first.
pub fn no_cache_json(now: DateTime<Utc>) -> ResponseHeaders {
    let mut headers = ResponseHeaders::new();
    headers.append("Content-type", "application/json");
    headers.append("Expires", EXPIRED);
    headers.append("Last-Modified", http_date(now));
    headers.append("Cache-Control", "no-store, no-cache, must-revalidate");
    headers.append("Cache-Control", "post-check=0, pre-check=0");
    headers.append("Pragma", "no-cache");
    headers
}

/// Returns true if an `X-Requested-With` header value marks an XHR request.
pub fn is_xhr_header(value: &str) -> bool {
    value == XML_HTTP_REQUEST
}
