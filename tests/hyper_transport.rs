//! End-to-end tests of the hyper transport against a raw TCP backend.

use std::io::Read;
use std::time::Duration;

use bytes::Bytes;
use http::{Method, Request};
use http_body_util::{Empty, Full};

use http_adaptor::config::AdaptorConfig;
use http_adaptor::{Adaptor, TransportError};

mod common;

fn config_for(url: String, timeout_ms: u64) -> AdaptorConfig {
    let mut config = AdaptorConfig::default();
    config.target.full_url = url;
    config.target.timeout_ms = timeout_ms;
    config
}

#[tokio::test]
async fn test_gzip_response_decoded() {
    let body = common::gzip(b"hello from upstream");
    let response = common::raw_response(
        "HTTP/1.1 200 OK",
        &[("Content-Encoding", "gzip"), ("Vary", "Accept-Encoding")],
        &body,
    );
    let (addr, mut requests) = common::start_mock_backend(response, Duration::ZERO).await;

    let adaptor = Adaptor::hyper(&config_for(format!("http://{}/greeting", addr), 2_000));
    let request = Request::builder()
        .method(Method::POST)
        .header("Content-Type", "application/json")
        .header("User-Agent", "adaptor-test/1.0")
        .body(Full::new(Bytes::from_static(br#"{"q":1}"#)))
        .unwrap();

    let (response, error) = adaptor.execute(request).await;

    assert!(error.is_none(), "unexpected error: {:?}", error);
    assert_eq!(response.status, "200 OK");
    assert_eq!(response.proto, "HTTP/1.1");
    assert_eq!(response.headers["vary"], "Accept-Encoding");
    let mut text = String::new();
    response.body.unwrap().read_to_string(&mut text).unwrap();
    assert_eq!(text, "hello from upstream");

    let head = requests.recv().await.unwrap().to_ascii_lowercase();
    assert!(head.starts_with("post /greeting http/1.1"));
    assert!(head.contains("accept-encoding: gzip"));
    assert!(head.contains("content-type: application/json"));
    assert!(head.contains("user-agent: adaptor-test/1.0"));
}

#[tokio::test]
async fn test_http10_response() {
    let response = b"HTTP/1.0 404 Not Found\r\nContent-Length: 4\r\n\r\nnope".to_vec();
    let (addr, _requests) = common::start_mock_backend(response, Duration::ZERO).await;

    let adaptor = Adaptor::hyper(&config_for(format!("http://{}/missing", addr), 2_000));
    let (response, error) = adaptor.execute(Request::new(Empty::<Bytes>::new())).await;

    assert!(error.is_none(), "unexpected error: {:?}", error);
    assert_eq!(response.status, "404 Not Found");
    assert_eq!(response.proto, "HTTP/1.0");
    assert_eq!((response.proto_major, response.proto_minor), (1, 0));
}

#[tokio::test]
async fn test_timeout_surfaces_as_error() {
    let response = common::raw_response("HTTP/1.1 200 OK", &[], b"late");
    let (addr, _requests) = common::start_mock_backend(response, Duration::from_secs(2)).await;

    let adaptor = Adaptor::hyper(&config_for(format!("http://{}/slow", addr), 200));
    let (response, error) = adaptor.execute(Request::new(Empty::<Bytes>::new())).await;

    assert!(matches!(error, Some(TransportError::Timeout(_))));
    assert_eq!(response.status_code, 0);
    assert_eq!(adaptor.pool().responses().idle_count(), 1);
}

#[tokio::test]
async fn test_connection_refused_surfaces_as_error() {
    let addr = common::closed_port().await;

    let adaptor = Adaptor::hyper(&config_for(format!("http://{}/", addr), 2_000));
    let result = adaptor.send(Request::new(Empty::<Bytes>::new())).await;

    assert!(matches!(result, Err(TransportError::Upstream(_))));
}
