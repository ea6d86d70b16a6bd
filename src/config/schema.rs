//! Configuration schema types
//!
//! This module defines the TOML configuration structure for signpack.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main signpack configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignPackConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Signing-service connection and credentials
    pub service: ServiceConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SignPackConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.service.validate(&self.environment)?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Retry configuration for catalog queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Signing-service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the signing-service REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Vendor implementation (currently only "d4sign")
    #[serde(default = "default_vendor")]
    pub vendor: String,

    /// API token credential
    pub token_api: SecretString,

    /// Crypt key credential paired with the token
    pub crypt_key: SecretString,

    /// TLS certificate verification enabled
    ///
    /// Disabling verification is only permitted outside production; the
    /// validator enforces this.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Bounded parallelism for per-document content fetches
    ///
    /// Fetch completion order never affects archive packing order.
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    /// Retry configuration for catalog queries (content fetches are not retried)
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ServiceConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("service.base_url cannot be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("service.base_url must start with http:// or https://".to_string());
        }
        if self.vendor != "d4sign" {
            return Err(format!(
                "Unsupported service vendor '{}'. Supported vendors: d4sign",
                self.vendor
            ));
        }
        if self.token_api.expose_secret().is_empty() {
            return Err("service.token_api cannot be empty".to_string());
        }
        if self.crypt_key.expose_secret().is_empty() {
            return Err("service.crypt_key cannot be empty".to_string());
        }
        if self.fetch_concurrency == 0 {
            return Err("service.fetch_concurrency must be at least 1".to_string());
        }
        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Set 'tls_verify = true', or use environment = \"development\" for local testing."
                    .to_string(),
            );
        }
        Ok(())
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Maximum size of one archive bundle in bytes
    #[serde(default = "default_bundle_max_bytes")]
    pub bundle_max_bytes: u64,

    /// Directory bundles are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Filename prefix for produced bundles
    #[serde(default = "default_bundle_prefix")]
    pub bundle_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            bundle_max_bytes: default_bundle_max_bytes(),
            output_dir: default_output_dir(),
            bundle_prefix: default_bundle_prefix(),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        // One stored ZIP entry needs headers plus at least one content byte.
        if self.bundle_max_bytes < 1024 {
            return Err("export.bundle_max_bytes must be at least 1024".to_string());
        }
        if self.bundle_prefix.trim().is_empty() {
            return Err("export.bundle_prefix cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging with rotation
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory log files are written to
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// File rotation policy ("daily" or "hourly")
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://sandbox.d4sign.com.br/api/v1".to_string()
}

fn default_vendor() -> String {
    "d4sign".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_fetch_concurrency() -> usize {
    4
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_bundle_max_bytes() -> u64 {
    100 * 1024 * 1024
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_bundle_prefix() -> String {
    "signed_documents".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
