//! REST API server for meetscribe.
//!
//! Provides HTTP endpoints for:
//! - Meeting block formatting
//! - Q&A list formatting
//! - Service info and version

pub mod envelope;
pub mod error;
pub mod fields;
pub mod routes;

use crate::config::{Config, CorsConfig};
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Local};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Process-wide context built once at startup and shared with handlers.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub started_at: DateTime<Local>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            started_at: Local::now(),
        }
    }
}

pub struct ApiServer {
    context: AppContext,
}

impl ApiServer {
    pub fn new(config: Config) -> Self {
        Self {
            context: AppContext::new(config),
        }
    }

    pub async fn start(self) -> Result<()> {
        let address = self.context.config.server.bind_address();
        let app = build_router(self.context);

        let listener = tokio::net::TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {}", address))?;

        info!("API server listening on http://{}", address);
        info!("Endpoints:");
        info!("  GET  /                 - Service info");
        info!("  GET  /version          - Get version info");
        info!("  GET|POST /process-meeting - Format a meeting string");
        info!("  GET|POST /process-qa   - Format a Q&A list");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Assemble the full application router.
pub fn build_router(context: AppContext) -> Router {
    let cors = cors_layer(&context.config.cors);

    Router::new()
        .route("/", get(status))
        .route("/version", get(version))
        .merge(routes::meeting::router())
        .merge(routes::qa::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(context)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

async fn status(State(context): State<AppContext>) -> Json<Value> {
    Json(json!({
        "service": "meetscribe",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": envelope::API_VERSION,
        "status": "running",
        "started_at": context.started_at.to_rfc3339(),
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "meetscribe"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    const MEETING: &str = concat!(
        "Weekly Sync\n\n",
        "Organizer: X\n\n",
        r#"Host: {"user_name":"A","user_email":"b@c.com","user":"u1"}"#,
        "\n\n",
        r#"Guests: {"email":"g1@x.com"},{"email":"g2@x.com"}"#
    );

    fn app() -> Router {
        build_router(AppContext::new(Config::default()))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_process_meeting_json_body() {
        let (status, body) = send(post_json(
            "/process-meeting",
            json!({ "meeting_string": MEETING }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["status"], "success");
        assert_eq!(body["metadata"]["format"], "docstring");
        assert_eq!(body["metadata"]["version"], "1.0");

        let message = body["data"]["message"].as_str().unwrap();
        assert!(message.contains("Weekly Sync"));
        assert!(message.contains("• Organizer    : X"));
        assert!(message.contains("• Guest 1: g1@x.com"));
        assert!(message.contains("• Guest 2: g2@x.com"));
        assert!(message.contains("• Total Participants : 3"));
        assert!(message.contains("• Guests Present     : Yes"));
    }

    #[tokio::test]
    async fn test_process_meeting_query_string_with_escaped_delimiters() {
        let uri = "/process-meeting?meeting_string=Standup%5Cn%5CnAda%5Cn%5Cn%7B%22user%22%3A%22u1%22%7D";
        let (status, body) = send(get_request(uri)).await;

        assert_eq!(status, StatusCode::OK);
        let message = body["data"]["message"].as_str().unwrap();
        assert!(message.contains("Standup"));
        assert!(message.contains("• Organizer    : Ada"));
        assert!(message.contains("• Host User ID : u1"));
        assert!(message.contains("• Host Name    : Unknown"));
        assert!(message.contains("• No guests attending"));
    }

    #[tokio::test]
    async fn test_process_meeting_form_body() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/process-meeting")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "meeting_string=Title%0A%0AOrganizer%3A+Ada%0A%0A%7B%22user%22%3A%22u1%22%7D",
            ))
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        let message = body["data"]["message"].as_str().unwrap();
        assert!(message.contains("• Organizer    : Ada"));
        assert!(message.contains("• Total Guests       : 0"));
    }

    #[tokio::test]
    async fn test_malformed_guests_still_succeed() {
        let raw = "Title\n\nOrganizer: Ada\n\n{\"user\":\"u1\"}\n\nGuests: {\"email\":";
        let (status, body) = send(post_json(
            "/process-meeting",
            json!({ "meeting_string": raw }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let message = body["data"]["message"].as_str().unwrap();
        assert!(message.contains("• Total Guests       : 0"));
    }

    #[tokio::test]
    async fn test_missing_meeting_string_is_400() {
        let (status, body) = send(post_json("/process-meeting", json!({ "other": 1 }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], routes::meeting::NO_MEETING_STRING);
        assert_eq!(body["metadata"]["error_type"], "MissingField");

        let (status, _) = send(get_request("/process-meeting")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_host_json_is_500() {
        let raw = "Title\n\nOrganizer: Ada\n\nHost: nobody\n\n{\"email\":\"g@x.com\"}";
        let (status, body) = send(post_json(
            "/process-meeting",
            json!({ "meeting_string": raw }),
        ))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["metadata"]["error_type"], "InvalidHostJson");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_non_string_meeting_string_is_500() {
        let (status, body) =
            send(post_json("/process-meeting", json!({ "meeting_string": 12 }))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["metadata"]["error_type"], "InvalidFieldType");
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_500() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/process-meeting")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["metadata"]["error_type"], "InvalidBody");
    }

    #[tokio::test]
    async fn test_process_qa_multipart_form() {
        let body = concat!(
            "--XX\r\n",
            "Content-Disposition: form-data; name=\"qa_list\"\r\n",
            "\r\n",
            r#"[{"question":"Q?","answer":"A."}]"#,
            "\r\n",
            "--XX\r\n",
            "Content-Disposition: form-data; name=\"attachment\"; filename=\"notes.txt\"\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "ignored\r\n",
            "--XX--\r\n"
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/process-qa")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XX")
            .body(Body::from(body))
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["formatted_qa"], "Q1: Q?\nA1: A.");
    }

    #[tokio::test]
    async fn test_process_meeting_multipart_without_field_is_400() {
        let body = concat!(
            "--XX\r\n",
            "Content-Disposition: form-data; name=\"other\"\r\n",
            "\r\n",
            "value\r\n",
            "--XX--\r\n"
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/process-meeting")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XX")
            .body(Body::from(body))
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["metadata"]["error_type"], "MissingField");
    }

    #[tokio::test]
    async fn test_process_qa_json_array() {
        let (status, body) = send(post_json(
            "/process-qa",
            json!({ "qa_list": [{"question": "Q?", "answer": "A.", "position": 0}] }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["formatted_qa"], "Q1: Q?\nA1: A.");
        assert_eq!(body["metadata"]["format"], "plain-text");
    }

    #[tokio::test]
    async fn test_process_qa_string_in_query() {
        let uri = "/process-qa?qa_list=%5B%7B%22question%22%3A%22Q%3F%22%7D%5D";
        let (status, body) = send(get_request(uri)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["formatted_qa"],
            "Q1: Q?\nA1: No answer provided"
        );
    }

    #[tokio::test]
    async fn test_process_qa_errors() {
        let (status, body) = send(post_json("/process-qa", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], routes::qa::NO_QA_LIST);

        let (status, body) =
            send(post_json("/process-qa", json!({ "qa_list": "not json" }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["metadata"]["error_type"], "InvalidQaList");

        let (status, body) =
            send(post_json("/process-qa", json!({ "qa_list": ["loose"] }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["metadata"]["error_type"], "InvalidEntry");
    }

    #[tokio::test]
    async fn test_status_and_version() {
        let (status, body) = send(get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "meetscribe");
        assert_eq!(body["status"], "running");

        let (_, body) = send(get_request("/version")).await;
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["http://localhost:3000".into(), "bad\norigin".into()],
        };
        // Building must not panic on the invalid entry.
        let _ = cors_layer(&config);
    }
}
