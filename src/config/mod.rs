//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AdaptorConfig (validated, immutable)
//!     → Adaptor::from_config
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AdaptorConfig, CorruptPayloadPolicy, DecodingConfig, ObservabilityConfig, PoolConfig,
    RequestConfig, TargetConfig,
};
pub use validation::{validate_config, ValidationError};
