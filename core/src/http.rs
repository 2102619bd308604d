//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. Routes build `HttpRequest` values and
//! the dispatch layer parses `HttpResponse` values; only a `Transport`
//! implementation ever touches the network. Path parameters are already
//! percent-encoded in `url`; query pairs are kept apart and encoded by the
//! transport.

/// HTTP method for a request. The gateway only exposes reads and creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `Route::request`. `url` is absolute and already has path
/// parameters substituted and encoded; `query` holds unencoded key/value pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Returned by the `*_api` client methods untouched; the status code is not
/// interpreted until a convenience method parses it.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
