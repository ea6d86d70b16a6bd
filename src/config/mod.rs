//! Configuration management for signpack.
//!
//! TOML-based configuration loading, parsing, and validation with
//! environment variable substitution (`${VAR_NAME}`), `SIGNPACK_*`
//! overrides, and secret-safe credential fields.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [service]
//! base_url = "https://sandbox.d4sign.com.br/api/v1"
//! token_api = "${SIGNPACK_TOKEN_API}"
//! crypt_key = "${SIGNPACK_CRYPT_KEY}"
//! fetch_concurrency = 4
//!
//! [export]
//! bundle_max_bytes = 104857600
//! output_dir = "exports"
//! bundle_prefix = "signed_documents"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, Environment, ExportConfig, LoggingConfig, RetryConfig, ServiceConfig,
    SignPackConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
