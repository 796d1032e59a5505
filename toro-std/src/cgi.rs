//! Request derivation from CGI-style server variables.
//!
//! Front controllers behind CGI/FastCGI see the request as a set of
//! variables. The path is taken from the first usable source:
//!
//! 1. `PATH_INFO`, if non-empty;
//! 2. `ORIG_PATH_INFO`, if non-empty and not `/index.php`;
//! 3. `REQUEST_URI` with its `?query` suffix removed;
//! 4. `/`.

use crate::xhr::is_xhr_header;
use std::collections::HashMap;
use toro_core::Request;

/// Build a [`Request`] from server variables.
pub fn request_from_vars<I, K, V>(vars: I) -> Request
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: HashMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    let var = |name: &str| vars.get(name).map(String::as_str).filter(|v| !v.is_empty());

    let method = var("REQUEST_METHOD").unwrap_or("GET");
    let path = if let Some(path) = var("PATH_INFO") {
        path
    } else if let Some(path) = var("ORIG_PATH_INFO").filter(|p| *p != "/index.php") {
        path
    } else if let Some(uri) = var("REQUEST_URI") {
        strip_query(uri)
    } else {
        "/"
    };
    let is_ajax = var("HTTP_X_REQUESTED_WITH").is_some_and(is_xhr_header);

    Request::new(method, path).with_ajax(is_ajax)
}

/// Build a [`Request`] from the process environment.
pub fn request_from_env() -> Request {
    request_from_vars(std::env::vars())
}

// A `?` in first position is kept as part of the path.
fn strip_query(uri: &str) -> &str {
    match uri.find('?') {
        Some(i) if i > 0 => &uri[..i],
        _ => uri,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_info_first() {
        let req = request_from_vars([
            ("REQUEST_METHOD", "POST"),
            ("PATH_INFO", "/users/7"),
            ("ORIG_PATH_INFO", "/other"),
            ("REQUEST_URI", "/index.php/users/7?x=1"),
        ]);
        assert_eq!(req.method(), "POST");
        assert_eq!(req.path(), "/users/7");
        assert!(!req.is_ajax());
    }

    #[test]
    fn test_orig_path_info_skips_front_controller() {
        let req = request_from_vars([("ORIG_PATH_INFO", "/a/b")]);
        assert_eq!(req.path(), "/a/b");

        let req = request_from_vars([
            ("ORIG_PATH_INFO", "/index.php"),
            ("REQUEST_URI", "/c?d=e"),
        ]);
        assert_eq!(req.path(), "/c");
    }

    #[test]
    fn test_request_uri_query_stripped() {
        let req = request_from_vars([("REQUEST_URI", "/search?q=toro")]);
        assert_eq!(req.path(), "/search");

        let req = request_from_vars([("REQUEST_URI", "?only=query")]);
        assert_eq!(req.path(), "?only=query");
    }

    #[test]
    fn test_defaults() {
        let req = request_from_vars(Vec::<(String, String)>::new());
        assert_eq!(req.method(), "GET");
        assert_eq!(req.path(), "/");

        let req = request_from_vars([("PATH_INFO", "")]);
        assert_eq!(req.path(), "/");
    }

    #[test]
    fn test_xhr_detection() {
        let req = request_from_vars([("HTTP_X_REQUESTED_WITH", "XMLHttpRequest")]);
        assert!(req.is_ajax());

        let req = request_from_vars([("HTTP_X_REQUESTED_WITH", "fetch")]);
        assert!(!req.is_ajax());
    }
}
