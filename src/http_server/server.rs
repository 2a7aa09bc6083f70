//! # HTTP Server
//!
//! Axum adapter in front of [`RecordHandler`].
//!
//! Routes: `ANY /` and `ANY /vehicles`. CORS preflight requests are
//! answered here with the handler's permissive header set; every other
//! request, whatever its method, is passed to the handler.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::handler::{ProxyResponse, RecordHandler, RequestEvent, CORS_HEADERS};

use super::config::HttpServerConfig;

/// HTTP server for the record handler
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, handler: Arc<RecordHandler>) -> Self {
        let router = Self::build_router(handler);
        Self { config, router }
    }

    fn build_router(handler: Arc<RecordHandler>) -> Router {
        Router::new()
            .route("/", any(invoke))
            .route("/vehicles", any(invoke))
            .with_state(handler)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "vehicle registry listening");
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

/// Build the request event for one HTTP request
pub fn event_from_parts(method: &Method, uri: &Uri, headers: &HeaderMap, body: &[u8]) -> RequestEvent {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let body = (!body.is_empty()).then(|| String::from_utf8_lossy(body).into_owned());

    RequestEvent {
        http_method: method.as_str().to_string(),
        path: Some(uri.path().to_string()),
        headers: Some(headers),
        body,
    }
}

fn is_preflight(method: &Method, headers: &HeaderMap) -> bool {
    *method == Method::OPTIONS && headers.contains_key(ACCESS_CONTROL_REQUEST_METHOD)
}

async fn invoke(
    State(handler): State<Arc<RecordHandler>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if is_preflight(&method, &headers) {
        return preflight_response();
    }

    let event = event_from_parts(&method, &uri, &headers, &body);
    handler.handle(event).await.into_response()
}

fn preflight_response() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    insert_headers(
        response.headers_mut(),
        CORS_HEADERS
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string())),
    );
    response
}

fn insert_headers<I>(target: &mut HeaderMap, headers: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (name, value) in headers {
        if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            target.insert(name, value);
        }
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, self.body).into_response();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        insert_headers(response.headers_mut(), self.headers);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CollectionSchema;
    use crate::store::InMemoryStore;

    fn test_server() -> HttpServer {
        let handler = RecordHandler::new(
            CollectionSchema::default(),
            Arc::new(InMemoryStore::new("vehicleName")),
        );
        HttpServer::new(HttpServerConfig::default(), Arc::new(handler))
    }

    #[test]
    fn test_server_creation() {
        let server = test_server();
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
        let _router = server.router();
    }

    #[test]
    fn test_event_from_parts() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let uri: Uri = "/vehicles?x=1".parse().unwrap();

        let event = event_from_parts(&Method::PUT, &uri, &headers, br#"{"vehicleName":"a"}"#);
        assert_eq!(event.http_method, "PUT");
        assert_eq!(event.path.as_deref(), Some("/vehicles"));
        assert_eq!(event.body.as_deref(), Some(r#"{"vehicleName":"a"}"#));
        assert_eq!(
            event.headers.unwrap().get("content-type").map(String::as_str),
            Some("application/json")
        );

        let event = event_from_parts(&Method::GET, &uri, &HeaderMap::new(), b"");
        assert_eq!(event.body, None);
    }

    #[test]
    fn test_preflight_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_preflight(&Method::OPTIONS, &headers));
        headers.insert(ACCESS_CONTROL_REQUEST_METHOD, HeaderValue::from_static("PUT"));
        assert!(is_preflight(&Method::OPTIONS, &headers));
        assert!(!is_preflight(&Method::PUT, &headers));
    }

    #[test]
    fn test_proxy_response_conversion() {
        let response = ProxyResponse::message(400, "no fields to update").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }
}
