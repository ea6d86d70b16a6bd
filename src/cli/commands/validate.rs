//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the SignPack configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also perform a connectivity check against the signing service
    #[arg(long)]
    pub check_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Validate configuration
        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            println!();
            return Ok(2); // Configuration error exit code
        }

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Environment: {:?}", config.environment);
        println!("  Service: {}", config.service.base_url);
        println!("  Vendor: {}", config.service.vendor);
        println!("  TLS Verify: {}", config.service.tls_verify);
        println!("  Fetch Concurrency: {}", config.service.fetch_concurrency);
        println!("  Bundle Budget: {} bytes", config.export.bundle_max_bytes);
        println!("  Bundle Prefix: {}", config.export.bundle_prefix);
        println!("  Output Directory: {}", config.export.output_dir);
        println!();

        if self.check_connection {
            use crate::adapters::signservice::SignServiceClient;

            println!("🔌 Checking service connectivity...");
            let client = match SignServiceClient::new(config.service.clone()) {
                Ok(c) => c,
                Err(e) => {
                    println!("❌ Failed to create service client");
                    println!("   Error: {e}");
                    return Ok(4); // Connection error exit code
                }
            };

            match client.health_check().await {
                Ok(_) => {
                    println!("✅ Service reachable and credentials accepted");
                    println!();
                }
                Err(e) => {
                    println!("❌ Service health check failed");
                    println!("   Error: {e}");
                    println!();
                    return Ok(4);
                }
            }
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_creation() {
        let args = ValidateArgs {
            check_connection: false,
        };
        // Just ensure it compiles and can be created
        let _ = format!("{args:?}");
    }
}
