//! Transport collaborator boundary.
//!
//! # Data Flow
//! ```text
//! FastRequest (filled by translate::request)
//!     → FastTransport::do_timeout (network I/O, bounded by timeout)
//!     → FastResponse (filled only on success)
//! ```
//!
//! # Design Decisions
//! - The adaptor only sees the trait; `HyperTransport` is the shipped engine
//! - Transports never decode content; that belongs to translate::response
//! - Errors are returned as-is and never retried here

pub mod client;
pub mod error;

use std::future::Future;
use std::time::Duration;

use crate::fast::{FastRequest, FastResponse};

pub use client::HyperTransport;
pub use error::TransportError;

/// Executes a fast request and fills the supplied fast response.
pub trait FastTransport: Send + Sync {
    /// Perform one round-trip, giving up after `timeout`.
    fn do_timeout(
        &self,
        request: &FastRequest,
        response: &mut FastResponse,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}
