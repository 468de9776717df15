//! Transport-native request/response model.
//!
//! # Data Flow
//! ```text
//! FastPool
//!     → acquire_request() / acquire_response() (Pooled guards)
//!     → translate layer fills FastRequest
//!     → transport fills FastResponse
//!     → guards dropped: objects reset, buffers kept, returned to the pool
//! ```
//!
//! # Design Decisions
//! - Objects are reused across calls; `reset()` clears contents but keeps
//!   allocated capacity
//! - Header names compare case-insensitively, values are raw bytes
//! - Content-Type and User-Agent live in dedicated fields, never in the
//!   generic header list

pub mod pool;
pub mod request;
pub mod response;

pub use pool::{FastPool, Pool, Pooled, Recycle};
pub use request::FastRequest;
pub use response::FastResponse;
