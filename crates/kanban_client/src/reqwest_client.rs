//! [`HttpClient`] backed by reqwest.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RequestBody, TransportError};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use std::future::Future;

/// HTTP client using reqwest with rustls.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestClient {
    /// Builds a client with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Setup`] if the TLS backend cannot be initialized.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the server origin.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl HttpClient for ReqwestClient {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let client = self.client.clone();
        let url = format!("{}{}", self.base_url, request.path);
        execute(client, url, request)
    }
}

async fn execute(
    client: reqwest::Client,
    url: String,
    request: HttpRequest,
) -> Result<HttpResponse, TransportError> {
    let method = match request.method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    };

    let mut builder = client.request(method, &url);
    if !request.query.is_empty() {
        builder = builder.query(&request.query);
    }
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder = match request.body {
        RequestBody::Empty => builder,
        RequestBody::Json(value) => {
            let bytes =
                serde_json::to_vec(&value).map_err(|e| TransportError::new(e.to_string()))?;
            builder.header(CONTENT_TYPE, "application/json").body(bytes)
        }
        RequestBody::Multipart(upload) => {
            let mut part = Part::bytes(upload.bytes).file_name(upload.file_name.clone());
            if let Some(content_type) = upload.content_type.as_deref() {
                part = part.mime_str(content_type).map_err(transport_error)?;
            }
            let form = Form::new()
                .text("name", upload.file_name)
                .part(upload.field, part);
            builder.multipart(form)
        }
    };

    tracing::trace!(method = %request.method, %url, "sending request");
    let response = builder.send().await.map_err(transport_error)?;
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await.map_err(transport_error)?.to_vec();

    Ok(HttpResponse {
        status,
        content_type,
        body,
    })
}

fn transport_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::timeout(e.to_string())
    } else {
        TransportError::new(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let client = ReqwestClient::new(&ClientConfig::new("http://localhost:8080/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let config = ClientConfig::new("http://127.0.0.1:9")
            .with_timeout(std::time::Duration::from_secs(2));
        let client = ReqwestClient::new(&config).unwrap();
        let result = client.send(HttpRequest::get("/wodss3/api/login")).await;
        assert!(result.is_err());
    }
}
