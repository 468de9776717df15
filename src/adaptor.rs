//! Orchestration: standard request in, standard response out.
//!
//! # Responsibilities
//! - Translate the caller's request into a pooled fast request
//! - Run it through the transport with the configured timeout
//! - Translate whatever the fast response holds, error or not
//! - Release pooled objects on every exit path

use std::time::{Duration, Instant};

use http::Request;
use http_body::Body;

use crate::config::{AdaptorConfig, CorruptPayloadPolicy};
use crate::fast::FastPool;
use crate::observability::metrics;
use crate::response::Response;
use crate::target::Target;
use crate::transport::{FastTransport, HyperTransport, TransportError};
use crate::translate::request::BoxError;
use crate::translate::{translate_request, translate_response};

/// Sends standard-model requests through a fast-model transport.
#[derive(Debug)]
pub struct Adaptor<T> {
    target: Target,
    timeout: Duration,
    transport: T,
    pool: FastPool,
    corrupt_payload: CorruptPayloadPolicy,
    max_body_bytes: Option<usize>,
}

impl<T: FastTransport> Adaptor<T> {
    /// Create an adaptor with default pool, decoding and body settings.
    pub fn new(target: Target, timeout: Duration, transport: T) -> Self {
        let defaults = AdaptorConfig::default();
        Self {
            target,
            timeout,
            transport,
            pool: FastPool::new(defaults.pool.max_idle),
            corrupt_payload: defaults.decoding.corrupt_payload,
            max_body_bytes: defaults.request.max_body_bytes,
        }
    }

    /// Create an adaptor from a validated configuration.
    pub fn from_config(config: &AdaptorConfig, transport: T) -> Self {
        Self {
            target: Target::from(&config.target),
            timeout: config.target.timeout(),
            transport,
            pool: FastPool::new(config.pool.max_idle),
            corrupt_payload: config.decoding.corrupt_payload,
            max_body_bytes: config.request.max_body_bytes,
        }
    }

    pub fn with_corrupt_payload_policy(mut self, policy: CorruptPayloadPolicy) -> Self {
        self.corrupt_payload = policy;
        self
    }

    /// Cap buffered request bodies; larger bodies are sent empty.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = Some(max_body_bytes);
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn pool(&self) -> &FastPool {
        &self.pool
    }

    /// Execute `request` and return the translated response with the
    /// transport's error, if any.
    ///
    /// The response is always populated. After a transport error it reflects
    /// the zero-valued fast response and should not be trusted.
    pub async fn execute<B>(&self, request: Request<B>) -> (Response, Option<TransportError>)
    where
        B: Body + Send,
        B::Data: Send,
        B::Error: Into<BoxError>,
    {
        let mut fast_request = self.pool.acquire_request();
        translate_request(&self.target, request, &mut fast_request, self.max_body_bytes).await;

        let mut fast_response = self.pool.acquire_response();
        let start = Instant::now();
        let outcome = self
            .transport
            .do_timeout(&fast_request, &mut fast_response, self.timeout)
            .await;

        match &outcome {
            Ok(()) => {
                tracing::debug!(
                    method = %fast_request.method(),
                    uri = %fast_request.request_uri(),
                    status = fast_response.status_code(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Exchange completed"
                );
                metrics::record_request(fast_request.method(), fast_response.status_code(), start);
            }
            Err(e) => {
                tracing::debug!(
                    method = %fast_request.method(),
                    uri = %fast_request.request_uri(),
                    error = %e,
                    "Exchange failed"
                );
                metrics::record_transport_error(e.kind(), start);
            }
        }

        let response = translate_response(&fast_response, self.corrupt_payload);
        (response, outcome.err())
    }

    /// Like [`execute`](Self::execute), discarding the response on error.
    pub async fn send<B>(&self, request: Request<B>) -> Result<Response, TransportError>
    where
        B: Body + Send,
        B::Data: Send,
        B::Error: Into<BoxError>,
    {
        match self.execute(request).await {
            (_, Some(e)) => Err(e),
            (response, None) => Ok(response),
        }
    }
}

impl Adaptor<HyperTransport> {
    /// Adaptor backed by a fresh [`HyperTransport`].
    pub fn hyper(config: &AdaptorConfig) -> Self {
        Self::from_config(config, HyperTransport::new())
    }
}
