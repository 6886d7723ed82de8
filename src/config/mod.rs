//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, dotenvy)
//!     → loader.rs (optional TOML file, then environment overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → RouteTable + ApiKeyAuthenticator built once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no runtime reload
//! - Optional fields have defaults, upstream URLs and the API key do not
//! - Validation separates syntactic (serde) from semantic checks
//! - Any error here is fatal: the listener never binds

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{GatewayConfig, ObservabilityConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
