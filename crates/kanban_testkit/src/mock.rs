//! Scripted HTTP client.

use kanban_client::{HttpClient, HttpMethod, HttpRequest, HttpResponse, TransportError};
use parking_lot::Mutex;
use serde_json::Value;
use std::future::{ready, Future};
use std::sync::Arc;

#[derive(Debug, Default)]
struct MockState {
    routes: Vec<Route>,
    requests: Vec<HttpRequest>,
}

#[derive(Debug)]
struct Route {
    method: HttpMethod,
    path: String,
    reply: Result<HttpResponse, TransportError>,
}

/// An [`HttpClient`] answering from a script.
///
/// Routes match on method and exact path; the most recently added route
/// wins. Unmatched requests get an empty 404. Clones share the script and
/// the request log.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    /// Creates a client with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `method path` with `response`.
    pub fn on(&self, method: HttpMethod, path: &str, response: HttpResponse) -> &Self {
        self.route(method, path, Ok(response))
    }

    /// Answers `method path` with a JSON body.
    pub fn on_json(&self, method: HttpMethod, path: &str, status: u16, body: Value) -> &Self {
        self.on(method, path, HttpResponse::with_json(status, &body))
    }

    /// Answers `method path` with an empty body.
    pub fn on_status(&self, method: HttpMethod, path: &str, status: u16) -> &Self {
        self.on(method, path, HttpResponse::new(status))
    }

    /// Fails `method path` without a response.
    pub fn on_transport_error(&self, method: HttpMethod, path: &str, message: &str) -> &Self {
        self.route(method, path, Err(TransportError::new(message)))
    }

    fn route(
        &self,
        method: HttpMethod,
        path: &str,
        reply: Result<HttpResponse, TransportError>,
    ) -> &Self {
        self.state.lock().routes.push(Route {
            method,
            path: path.to_string(),
            reply,
        });
        self
    }

    /// Returns every request received, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().requests.clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.state.lock().requests.last().cloned()
    }

    /// Returns the number of requests received.
    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    fn answer(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock();
        let reply = state
            .routes
            .iter()
            .rev()
            .find(|r| r.method == request.method && r.path == request.path)
            .map(|r| r.reply.clone())
            .unwrap_or_else(|| Ok(HttpResponse::new(404)));
        state.requests.push(request);
        reply
    }
}

impl HttpClient for MockHttpClient {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        ready(self.answer(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn scripted_replies() {
        let client = MockHttpClient::new();
        client
            .on_status(HttpMethod::Get, "/a", 200)
            .on_json(HttpMethod::Get, "/a", 201, json!({"id": "x"}))
            .on_transport_error(HttpMethod::Post, "/b", "refused");

        let reply = client.send(HttpRequest::get("/a")).await.unwrap();
        assert_eq!(reply.status, 201);
        assert!(client.send(HttpRequest::post("/b")).await.is_err());
        assert_eq!(client.send(HttpRequest::delete("/a")).await.unwrap().status, 404);

        let shared = client.clone();
        assert_eq!(shared.request_count(), 3);
        assert_eq!(shared.last_request().unwrap().method, HttpMethod::Delete);
    }
}
