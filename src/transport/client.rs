//! hyper-based transport engine.
//!
//! # Responsibilities
//! - Turn a `FastRequest` into a wire request
//! - Run it on a pooled hyper-util client under a deadline
//! - Copy status, version, headers and the raw body into the `FastResponse`

use std::time::Duration;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE, HOST, USER_AGENT};
use http::uri::Authority;
use http::{Method, Request, Uri, Version};
use http_body_util::{BodyExt, Full};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::fast::{FastRequest, FastResponse};
use crate::transport::{FastTransport, TransportError};

/// Transport backed by `hyper_util`'s pooled legacy client.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Clone, Debug)]
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HyperTransport {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl FastTransport for HyperTransport {
    async fn do_timeout(
        &self,
        request: &FastRequest,
        response: &mut FastResponse,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        let wire = build_wire_request(request)?;

        let exchange = async {
            let upstream = self.client.request(wire).await?;
            let (parts, body) = upstream.into_parts();
            let body = body.collect().await?.to_bytes();
            Ok::<_, TransportError>((parts, body))
        };

        let (parts, body) = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| TransportError::Timeout(timeout))??;

        response.set_status_code(parts.status.as_u16());
        response.set_http11(parts.version == Version::HTTP_11);
        for (name, value) in parts.headers.iter() {
            response.add_header(name.as_str(), value.as_bytes());
        }
        response.set_body(&body);

        Ok(())
    }
}

fn build_wire_request(fast: &FastRequest) -> Result<Request<Full<Bytes>>, TransportError> {
    let method = Method::from_bytes(fast.method().as_bytes())
        .map_err(|e| TransportError::InvalidRequest(format!("method {:?}: {}", fast.method(), e)))?;
    let uri: Uri = fast.request_uri().parse().map_err(|e| {
        TransportError::InvalidRequest(format!("uri {:?}: {}", fast.request_uri(), e))
    })?;

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(headers) = builder.headers_mut() {
        for (name, value) in fast.headers() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::InvalidRequest(format!("header {:?}: {}", name, e)))?;
            let value = HeaderValue::from_bytes(value)
                .map_err(|e| TransportError::InvalidRequest(format!("header {}: {}", name, e)))?;
            headers.insert(name, value);
        }

        if let Some(content_type) = fast.content_type() {
            let value = HeaderValue::from_str(content_type)
                .map_err(|e| TransportError::InvalidRequest(format!("content-type: {}", e)))?;
            headers.insert(CONTENT_TYPE, value);
        }

        if !fast.user_agent().is_empty() {
            let value = HeaderValue::from_str(fast.user_agent())
                .map_err(|e| TransportError::InvalidRequest(format!("user-agent: {}", e)))?;
            headers.insert(USER_AGENT, value);
        }

        // A configured host that is a bare authority overrides the one derived
        // from the URI; anything else (e.g. "http://host") is left to hyper.
        if let Ok(authority) = fast.host().parse::<Authority>() {
            if let Ok(value) = HeaderValue::from_str(authority.as_str()) {
                headers.insert(HOST, value);
            }
        }
    }

    builder
        .body(Full::new(Bytes::copy_from_slice(fast.body())))
        .map_err(|e| TransportError::InvalidRequest(e.to_string()))
}
