//! Tests for the fetch adapter
//!
//! Gate ordering is checked against the scripted transport; the reqwest
//! transport is exercised end to end against a throwaway HTTP responder bound
//! to a local port.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::mock::MockTransport;
use super::{ClientConfig, PortfolioClient, RawResponse};
use crate::app::models::{CollectionSummary, CoverPhoto, Directory, FetchResult};

fn sample_directory() -> Directory {
    Directory {
        collections: vec![
            CollectionSummary {
                id: "joshua-tree".to_string(),
                title: "Joshua Tree".to_string(),
                cover: CoverPhoto {
                    src: "/images/joshua-tree/cover.jpg".to_string(),
                },
            },
            CollectionSummary {
                id: "seattle".to_string(),
                title: "Seattle".to_string(),
                cover: CoverPhoto {
                    src: "/images/seattle/cover.jpg".to_string(),
                },
            },
        ],
    }
}

fn client_over(transport: MockTransport) -> PortfolioClient {
    PortfolioClient::with_transport(Arc::new(transport))
}

#[tokio::test]
async fn test_successful_fetch_round_trips_fixture() {
    let transport = MockTransport::new();
    transport.json("directory.json", &sample_directory());
    let client = client_over(transport);

    let result: FetchResult<Directory> = client.fetch_json("directory.json").await;

    assert!(result.error().is_none());
    assert_eq!(result.data().unwrap().as_ref(), &sample_directory());
}

#[tokio::test]
async fn test_transport_failure_message() {
    let transport = MockTransport::new();
    transport.unreachable("directory.json", "connection refused");
    let client = client_over(transport);

    let result: FetchResult<Directory> = client.fetch_json("directory.json").await;

    assert_eq!(
        result.error(),
        Some(r#"Fetch for "directory.json" failed: "connection refused""#)
    );
    assert!(result.data().is_none());
}

#[tokio::test]
async fn test_non_success_status_reports_code() {
    let transport = MockTransport::new();
    transport.respond(
        "collections/missing.json",
        RawResponse {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            content_type: Some("application/json".to_string()),
            body: Ok(b"{}".to_vec()),
        },
    );
    let client = client_over(transport);

    let result: FetchResult<Directory> = client.fetch_json("collections/missing.json").await;

    assert_eq!(
        result.error(),
        Some(r#"Fetch for "collections/missing.json" returned 503:Service Unavailable"#)
    );
    assert!(result.data().is_none());
}

#[tokio::test]
async fn test_wrong_content_type_is_rejected_before_parsing() {
    let transport = MockTransport::new();
    let mut response = RawResponse::json(serde_json::to_vec(&sample_directory()).unwrap());
    response.content_type = Some("text/html; charset=utf-8".to_string());
    transport.respond("directory.json", response);
    let client = client_over(transport);

    let result: FetchResult<Directory> = client.fetch_json("directory.json").await;

    let error = result.error().unwrap();
    assert!(error.contains("text/html; charset=utf-8"));
    assert!(result.data().is_none());
}

#[tokio::test]
async fn test_missing_content_type_reports_null() {
    let transport = MockTransport::new();
    let mut response = RawResponse::json("{}");
    response.content_type = None;
    transport.respond("directory.json", response);
    let client = client_over(transport);

    let result: FetchResult<Directory> = client.fetch_json("directory.json").await;

    assert_eq!(
        result.error(),
        Some(r#"Fetch for "directory.json" returned "null""#)
    );
}

#[tokio::test]
async fn test_json_content_type_with_parameters_is_accepted() {
    let transport = MockTransport::new();
    let mut response = RawResponse::json(serde_json::to_vec(&sample_directory()).unwrap());
    response.content_type = Some("application/json; charset=utf-8".to_string());
    transport.respond("directory.json", response);
    let client = client_over(transport);

    let result: FetchResult<Directory> = client.fetch_json("directory.json").await;
    assert!(result.is_loaded());
}

#[tokio::test]
async fn test_malformed_body_reports_parse_failure_without_data() {
    let transport = MockTransport::new();
    transport.respond("directory.json", RawResponse::json("{\"collections\": ["));
    let client = client_over(transport);

    let result: FetchResult<Directory> = client.fetch_json("directory.json").await;

    let error = result.error().unwrap();
    assert!(error.starts_with(r#"JSON parsing for "directory.json" failed: ""#));
    assert!(result.data().is_none());
}

#[tokio::test]
async fn test_unreadable_body_reports_parse_failure() {
    let transport = MockTransport::new();
    let mut response = RawResponse::json("");
    response.body = Err("connection reset".to_string());
    transport.respond("directory.json", response);
    let client = client_over(transport);

    let result: FetchResult<Directory> = client.fetch_json("directory.json").await;

    assert_eq!(
        result.error(),
        Some(r#"JSON parsing for "directory.json" failed: "connection reset""#)
    );
}

#[tokio::test]
async fn test_null_payload() {
    let transport = MockTransport::new();
    transport.respond("directory.json", RawResponse::json("null"));
    transport.respond("maybe.json", RawResponse::json("null"));
    let client = client_over(transport);

    // A directory cannot be null
    let directory: FetchResult<Directory> = client.fetch_json("directory.json").await;
    assert!(directory.error().unwrap().starts_with("JSON parsing"));

    // A nullable resource settles as present data holding `None`
    let nullable: FetchResult<Option<Directory>> = client.fetch_json("maybe.json").await;
    assert!(nullable.is_loaded());
    assert_eq!(nullable.data().unwrap().as_ref(), &None);
}

// ---------------------------------------------------------------------------
// reqwest transport against a local responder
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Canned {
    status_line: &'static str,
    content_type: Option<&'static str>,
    body: String,
}

impl Canned {
    fn json(body: String) -> Self {
        Self {
            status_line: "200 OK",
            content_type: Some("application/json"),
            body,
        }
    }
}

/// Serve canned responses keyed by request path until the test ends
async fn serve(routes: HashMap<&'static str, Canned>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                while read < buf.len() {
                    let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let request = String::from_utf8_lossy(&buf[..read]).to_string();
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let canned = routes.get(path.as_str()).cloned().unwrap_or(Canned {
                    status_line: "404 Not Found",
                    content_type: Some("text/html"),
                    body: "<h1>Not Found</h1>".to_string(),
                });

                let mut response = format!("HTTP/1.1 {}\r\n", canned.status_line);
                if let Some(content_type) = canned.content_type {
                    response.push_str(&format!("Content-Type: {}\r\n", content_type));
                }
                response.push_str(&format!(
                    "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    canned.body.len(),
                    canned.body
                ));

                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

fn http_client(origin: &str) -> PortfolioClient {
    let config = ClientConfig {
        system_proxy: false,
        ..ClientConfig::with_origin(origin)
    };
    PortfolioClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_http_fetch_success() {
    let body = serde_json::to_string(&sample_directory()).unwrap();
    let origin = serve(HashMap::from([("/data/directory.json", Canned::json(body))])).await;

    let result: FetchResult<Directory> = http_client(&origin).fetch_json("directory.json").await;

    assert_eq!(result.data().unwrap().as_ref(), &sample_directory());
}

#[tokio::test]
async fn test_http_fetch_not_found() {
    let origin = serve(HashMap::new()).await;

    let result: FetchResult<Directory> = http_client(&origin)
        .fetch_json("collections/nowhere.json")
        .await;

    assert_eq!(
        result.error(),
        Some(r#"Fetch for "collections/nowhere.json" returned 404:Not Found"#)
    );
}

#[tokio::test]
async fn test_http_fetch_missing_content_type() {
    let origin = serve(HashMap::from([(
        "/data/directory.json",
        Canned {
            status_line: "200 OK",
            content_type: None,
            body: "{}".to_string(),
        },
    )]))
    .await;

    let result: FetchResult<Directory> = http_client(&origin).fetch_json("directory.json").await;

    assert_eq!(
        result.error(),
        Some(r#"Fetch for "directory.json" returned "null""#)
    );
}

#[tokio::test]
async fn test_http_fetch_connection_refused() {
    // Reserve a port, then free it so nothing is listening there
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result: FetchResult<Directory> = http_client(&format!("http://{}", addr))
        .fetch_json("directory.json")
        .await;

    let error = result.error().unwrap();
    assert!(error.starts_with(r#"Fetch for "directory.json" failed: ""#));
    assert!(result.data().is_none());
}
