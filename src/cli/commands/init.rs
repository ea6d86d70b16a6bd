//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "signpack.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing SignPack configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        // Generate configuration content
        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        // Write to file
        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set SIGNPACK_SERVICE_TOKEN_API and SIGNPACK_SERVICE_CRYPT_KEY");
                println!("  3. Validate configuration: signpack validate-config");
                println!("  4. Browse documents: signpack list");
                println!("  5. Run an export: signpack export --all");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# SignPack Configuration File
# Signed Document Export Tool

environment = "development"  # development | staging | production

[application]
log_level = "info"

[service]
base_url = "https://sandbox.d4sign.com.br/api/v1"
vendor = "d4sign"

# Credentials (use environment variables)
token_api = "${SIGNPACK_SERVICE_TOKEN_API}"
crypt_key = "${SIGNPACK_SERVICE_CRYPT_KEY}"

# TLS settings
tls_verify = true
timeout_seconds = 30
fetch_concurrency = 4

[export]
bundle_max_bytes = 104857600  # 100 MiB per archive part
output_dir = "."
bundle_prefix = "signed_documents"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# SignPack Configuration File
# Signed Document Export Tool
#
# This file contains all configuration options with examples and explanations.

# ============================================================================
# Runtime Environment
# ============================================================================
# In "production", TLS certificate verification cannot be disabled.
environment = "development"  # development | staging | production

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Signing-Service Configuration
# ============================================================================
[service]
# Base URL of the signing-service REST API
base_url = "https://sandbox.d4sign.com.br/api/v1"

# Vendor implementation (currently only "d4sign" is supported)
vendor = "d4sign"

# API token credential (use environment variable)
token_api = "${SIGNPACK_SERVICE_TOKEN_API}"

# Crypt key credential paired with the token (use environment variable)
crypt_key = "${SIGNPACK_SERVICE_CRYPT_KEY}"

# TLS/SSL verification
tls_verify = true

# Request timeout in seconds
timeout_seconds = 30

# Number of document contents fetched in parallel during an export.
# Completion order never changes which archive a document lands in.
fetch_concurrency = 4

# Retry policy for catalog queries. Per-document content fetches are
# never retried; a failed fetch skips that document and is reported.
[service.retry]
max_retries = 3
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 2.0

# ============================================================================
# Export Configuration
# ============================================================================
[export]
# Maximum size of one archive part in bytes. Documents are packed in view
# order; a document that alone exceeds this budget gets a part of its own.
bundle_max_bytes = 104857600  # 100 MiB

# Directory archive parts are written to
output_dir = "."

# Filename prefix. One part: <prefix>.zip
# Several parts: <prefix>.partNNofMM.zip
bundle_prefix = "signed_documents"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON file logging with rotation
local_enabled = false

# Local log file path
local_path = "logs"

# Log rotation (daily or hourly)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "signpack.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "signpack.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[service]"));
        assert!(config.contains("[export]"));
        assert!(config.contains("${SIGNPACK_SERVICE_TOKEN_API}"));
    }

    #[test]
    fn test_generate_config_with_examples() {
        let config = InitArgs::generate_config_with_examples();
        assert!(config.contains("# SignPack Configuration File"));
        assert!(config.contains("bundle_max_bytes"));
        assert!(config.contains("fetch_concurrency"));
    }
}
