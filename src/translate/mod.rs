//! Translation between the standard and fast models.
//!
//! # Data Flow
//! ```text
//! http::Request<B>
//!     → request.rs (target, headers, body buffering, Accept-Encoding: gzip)
//!     → FastRequest
//!
//! FastResponse
//!     → response.rs (protocol, header filter, gzip/deflate decoding, status)
//!     → Response
//! ```
//!
//! # Design Decisions
//! - Both directions are infallible; failures degrade to empty data
//! - Neither direction performs network I/O

pub mod request;
pub mod response;

pub use request::translate_request;
pub use response::translate_response;
