//! HTTP client abstraction.
//!
//! The actual HTTP library is hidden behind [`HttpClient`] so the facade can
//! be driven by reqwest in production and by a scripted client in tests.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::future::Future;

/// Request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Returns the method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file attached to a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Form field name.
    pub field: String,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, if known.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Creates an upload for the `file` form field.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: "file".to_string(),
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Sets the MIME type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// JSON document.
    Json(Value),
    /// Multipart form with one file part.
    Multipart(FileUpload),
}

/// An outbound request, relative to the configured server origin.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Method.
    pub method: HttpMethod,
    /// Absolute path including the deployment prefix.
    pub path: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
    /// Body.
    pub body: RequestBody,
    /// Whether the session cookie must be left off.
    pub skip_auth: bool,
}

impl HttpRequest {
    /// Creates a request without body, query or headers.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            skip_auth: false,
        }
    }

    /// Shorthand for a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Shorthand for a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Shorthand for a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Shorthand for a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Sets a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Sets a multipart body.
    pub fn multipart(mut self, upload: FileUpload) -> Self {
        self.body = RequestBody::Multipart(upload);
        self
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Marks the request as not carrying the session cookie.
    pub fn skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    /// Returns the first header with the given name, ignoring case.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first query value for `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A response as seen by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Content type, if reported.
    pub content_type: Option<String>,
    /// Raw body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response with an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    /// Creates a response with a JSON body.
    pub fn with_json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string().into_bytes(),
        }
    }

    /// Creates a response with a raw body.
    pub fn with_bytes(status: u16, content_type: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: Some(content_type.into()),
            body,
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_value(Value::Null);
        }
        serde_json::from_slice(&self.body)
    }

    /// Returns the server-supplied `result` detail, if any.
    ///
    /// A `null` value counts as absent; non-string values are rendered as
    /// JSON text.
    pub fn result_detail(&self) -> Option<String> {
        let body: Value = serde_json::from_slice(&self.body).ok()?;
        match body.get("result")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// A transport-level failure: no response was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// Description from the HTTP library.
    pub message: String,
    /// Whether the transport gave up on its timeout.
    pub timed_out: bool,
}

impl TransportError {
    /// Creates a transport error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.timed_out {
            write!(f, "timed out: {}", self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl std::error::Error for TransportError {}

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual HTTP transport. The facade
/// resolves paths and attaches the session cookie before calling `send`;
/// implementations only prepend the server origin.
pub trait HttpClient: Send + Sync {
    /// Sends a request. Any received response, whatever its status, is `Ok`.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_builder() {
        let request = HttpRequest::get("/wodss3/api/users/1/cards")
            .query("page", "2")
            .header("Cookie", "token=a.b.c");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.query_value("page"), Some("2"));
        assert_eq!(request.query_value("search"), None);
        assert_eq!(request.header_value("cookie"), Some("token=a.b.c"));
        assert!(!request.skip_auth);
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[test]
    fn result_detail_variants() {
        let text =
            HttpResponse::with_json(409, &json!({"result": "Username/email does already exist"}));
        assert_eq!(
            text.result_detail().as_deref(),
            Some("Username/email does already exist")
        );

        let null = HttpResponse::with_json(409, &json!({"result": null}));
        assert_eq!(null.result_detail(), None);

        let number = HttpResponse::with_json(400, &json!({"result": 42}));
        assert_eq!(number.result_detail().as_deref(), Some("42"));

        let missing = HttpResponse::with_json(409, &json!({"error": "x"}));
        assert_eq!(missing.result_detail(), None);

        let not_json = HttpResponse::with_bytes(500, "text/html", b"<html>".to_vec());
        assert_eq!(not_json.result_detail(), None);

        assert_eq!(HttpResponse::new(404).result_detail(), None);
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let response = HttpResponse::new(200);
        let value: Option<String> = response.json().unwrap();
        assert_eq!(value, None);
        let value: Value = response.json().unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse::new(200).is_success());
        assert!(HttpResponse::new(204).is_success());
        assert!(!HttpResponse::new(301).is_success());
        assert!(!HttpResponse::new(409).is_success());
    }

    #[test]
    fn transport_error_display() {
        assert_eq!(TransportError::new("connection refused").to_string(), "connection refused");
        assert_eq!(TransportError::timeout("30s").to_string(), "timed out: 30s");
    }
}
