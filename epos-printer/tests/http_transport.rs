// epos-printer/tests/http_transport.rs
// reqwest transport against a loopback ePOS-Print service

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use epos_printer::{EposBuilder, HttpTransport, PrintResponse, PrinterConfig, Transport};

const DEVICE_REPLY: &str = r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body><response success="true" code="" status="251658262" battery="0" xmlns="http://www.epson-pos.com/schemas/2011/03/epos-print"/></s:Body></s:Envelope>"#;

#[derive(Debug, Default, Clone)]
struct Captured {
    query: Option<String>,
    headers: Vec<(String, String)>,
    body: String,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

type Shared = Arc<Mutex<Option<Captured>>>;

async fn service(
    State(captured): State<Shared>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let headers = headers
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();
    *captured.lock().unwrap() = Some(Captured {
        query,
        headers,
        body,
    });

    ([(header::CONTENT_TYPE, "text/xml; charset=utf-8")], DEVICE_REPLY)
}

async fn unavailable() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, "busy")
}

/// Start a loopback server and return its base URL
async fn spawn_device(captured: Shared) -> String {
    let app = Router::new()
        .route("/cgi-bin/epos/service.cgi", post(service))
        .route("/busy", post(unavailable))
        .with_state(captured);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_post_sets_soap_headers() {
    let captured: Shared = Arc::new(Mutex::new(None));
    let base = spawn_device(Arc::clone(&captured)).await;

    let mut builder = EposBuilder::new();
    builder.text("Hello").cut();
    let document = builder.to_envelope();

    let transport = HttpTransport::new(&PrinterConfig::new("unused")).unwrap();
    let reply = transport
        .post(
            &format!("{}/cgi-bin/epos/service.cgi?devid=local_printer&timeout=60000", base),
            document.clone(),
        )
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert!(PrintResponse::parse(&reply.body).unwrap().is_success());

    let seen = captured.lock().unwrap().clone().expect("request reached device");
    assert_eq!(seen.query.as_deref(), Some("devid=local_printer&timeout=60000"));
    assert_eq!(seen.header("content-type"), Some("text/xml; charset=utf-8"));
    assert_eq!(
        seen.header("if-modified-since"),
        Some("Thu, 01 Jan 1970 00:00:00 GMT")
    );
    assert_eq!(seen.header("soapaction"), Some(r#""""#));
    assert_eq!(seen.body, document);
}

#[tokio::test]
async fn test_non_200_is_returned_as_is() {
    let captured: Shared = Arc::new(Mutex::new(None));
    let base = spawn_device(captured).await;

    let transport = HttpTransport::new(&PrinterConfig::new("unused")).unwrap();
    let reply = transport
        .post(&format!("{}/busy", base), String::new())
        .await
        .unwrap();

    assert_eq!(reply.status, 503);
    assert_eq!(reply.body, "busy");
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let transport = HttpTransport::new(&PrinterConfig::new("unused")).unwrap();
    let err = transport
        .post("http://127.0.0.1:1/cgi-bin/epos/service.cgi", String::new())
        .await
        .unwrap_err();

    assert!(matches!(err, epos_printer::PrintError::Transport(_)));
}
