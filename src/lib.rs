//! Standard ⇄ fast HTTP model adaptor.
//!
//! Callers hand in an `http::Request`; the adaptor translates it into a
//! pooled [`FastRequest`], runs it through a [`FastTransport`], and
//! translates the [`FastResponse`] back into a standard [`Response`],
//! decoding gzip/deflate bodies along the way.
//!
//! ```text
//! http::Request → translate::request → FastRequest
//!     → FastTransport::do_timeout
//!     → FastResponse → translate::response → Response
//! ```

pub mod adaptor;
pub mod config;
pub mod fast;
pub mod observability;
pub mod response;
pub mod support;
pub mod target;
pub mod translate;
pub mod transport;

pub use adaptor::Adaptor;
pub use config::{AdaptorConfig, CorruptPayloadPolicy};
pub use fast::{FastPool, FastRequest, FastResponse};
pub use response::Response;
pub use support::{body_from_bytes, contains_ignore_case, status_text, ResponseBody};
pub use target::Target;
pub use transport::{FastTransport, HyperTransport, TransportError};
