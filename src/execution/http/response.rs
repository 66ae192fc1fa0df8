//! HTTP error handling and normalization utilities
//!
//! Every non-success response, from the token endpoint or a domain endpoint,
//! goes through [`classify_error_response`] so callers see one error shape.

use super::interceptor::{HttpInterceptor, HttpRequestContext, notify_error};
use crate::error::MarketplaceError;
use std::sync::Arc;

/// Reason phrase from the response status line.
///
/// Servers that send a non-canonical phrase (e.g. `INTERNAL SERVER ERROR`)
/// have it preserved verbatim; otherwise the canonical phrase is used.
pub fn reason_phrase(response: &reqwest::Response) -> String {
    if let Some(reason) = response.extensions().get::<hyper::ext::ReasonPhrase>() {
        if let Ok(reason) = std::str::from_utf8(reason.as_bytes()) {
            return reason.to_string();
        }
    }
    response
        .status()
        .canonical_reason()
        .unwrap_or_default()
        .to_string()
}

/// Raw body as JSON when it parses, otherwise as a JSON string.
pub fn body_to_value(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::String(String::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

/// Read the body, build the API error, and notify interceptors.
pub async fn classify_error_response(
    response: reqwest::Response,
    ctx: &HttpRequestContext,
    interceptors: &[Arc<dyn HttpInterceptor>],
) -> MarketplaceError {
    let status = response.status().as_u16();
    let status_text = reason_phrase(&response);
    let text = response.text().await.unwrap_or_default();
    let error = MarketplaceError::api_error(status, status_text, body_to_value(&text));
    tracing::debug!(
        target: "walmart_marketplace::http",
        operation = %ctx.operation,
        status = status,
        correlation_id = %ctx.correlation_id,
        "non-success response"
    );
    notify_error(interceptors, ctx, &error);
    error
}

/// Map a send failure and notify interceptors.
pub fn classify_send_error(
    error: reqwest::Error,
    ctx: &HttpRequestContext,
    interceptors: &[Arc<dyn HttpInterceptor>],
) -> MarketplaceError {
    let error = MarketplaceError::from(error);
    notify_error(interceptors, ctx, &error);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn ctx(url: &str) -> HttpRequestContext {
        HttpRequestContext {
            correlation_id: "test".into(),
            operation: "test".into(),
            method: reqwest::Method::GET,
            url: url.into(),
        }
    }

    struct FlagInterceptor(Arc<Mutex<bool>>);
    impl HttpInterceptor for FlagInterceptor {
        fn on_error(&self, _ctx: &HttpRequestContext, _error: &MarketplaceError) {
            *self.0.lock().unwrap() = true;
        }
    }

    #[test]
    fn body_to_value_keeps_raw_text() {
        assert_eq!(body_to_value(r#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(body_to_value("plain text"), json!("plain text"));
        assert_eq!(body_to_value(""), json!(""));
    }

    #[tokio::test]
    async fn classify_uses_canonical_reason_and_triggers_interceptor() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errors":[{"code":"CONTENT_NOT_FOUND.GMP_ITEM_QUERY_API"}]}"#)
            .create_async()
            .await;

        let url = format!("{}/missing", server.url());
        let resp = reqwest::Client::new().get(&url).send().await.expect("send");

        let flag = Arc::new(Mutex::new(false));
        let it: Arc<dyn HttpInterceptor> = Arc::new(FlagInterceptor(flag.clone()));
        let err = classify_error_response(resp, &ctx(&url), &[it]).await;

        assert_eq!(err.to_string(), "404 Not Found");
        let cause = err.api_cause().expect("api error");
        assert_eq!(cause.status, 404);
        assert_eq!(
            cause.body["errors"][0]["code"],
            "CONTENT_NOT_FOUND.GMP_ITEM_QUERY_API"
        );
        assert!(*flag.lock().unwrap(), "interceptor not triggered");
    }

    #[tokio::test]
    async fn classify_preserves_server_reason_phrase() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let body = "500 Internal Server Error";
            let response = format!(
                "HTTP/1.1 500 INTERNAL SERVER ERROR\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        let url = format!("http://{addr}/500");
        let resp = reqwest::Client::new().get(&url).send().await.expect("send");
        let err = classify_error_response(resp, &ctx(&url), &[]).await;

        assert_eq!(err.to_string(), "500 INTERNAL SERVER ERROR");
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.api_cause().unwrap().body, json!("500 Internal Server Error"));
    }
}
