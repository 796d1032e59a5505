//! The request descriptor consumed by the dispatcher.

/// What the dispatcher needs to know about an incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    path: String,
    is_ajax: bool,
}

impl Request {
    /// Create a non-AJAX request. `method` is case-insensitive.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            is_ajax: false,
        }
    }

    /// Shorthand for `Request::new("GET", path)`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", path)
    }

    /// Shorthand for `Request::new("POST", path)`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new("POST", path)
    }

    /// Mark the request as originating from an in-page script.
    pub fn with_ajax(mut self, is_ajax: bool) -> Self {
        self.is_ajax = is_ajax;
        self
    }

    /// The method as received.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The lower-cased verb used to pick a handler method.
    pub fn verb(&self) -> String {
        self.method.to_ascii_lowercase()
    }

    /// The request path as received (may be empty).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true for AJAX/XHR requests.
    pub fn is_ajax(&self) -> bool {
        self.is_ajax
    }
}
