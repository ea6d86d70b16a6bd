//! Signing-service client factory and utilities
//!
//! Creates the vendor implementation selected by configuration and provides
//! a connectivity health check on top of it.

use crate::config::ServiceConfig;
use crate::domain::{Result, SignPackError};
use std::sync::Arc;

use super::vendor::{D4SignVendor, SignServiceVendor};

/// Signing-service client that wraps a vendor implementation
pub struct SignServiceClient {
    vendor: Arc<dyn SignServiceVendor>,
}

impl SignServiceClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured vendor is not supported or the
    /// vendor cannot be initialized.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let vendor_type = config.vendor.to_lowercase();

        let vendor: Arc<dyn SignServiceVendor> = match vendor_type.as_str() {
            "d4sign" => Arc::new(D4SignVendor::new(config)?),
            _ => {
                return Err(SignPackError::Configuration(format!(
                    "Unsupported service vendor: {vendor_type}. Supported vendors: d4sign"
                )))
            }
        };

        Ok(Self { vendor })
    }

    /// Wrap an existing vendor (used by tests and embedders)
    pub fn from_vendor(vendor: Arc<dyn SignServiceVendor>) -> Self {
        Self { vendor }
    }

    /// Get a reference to the underlying vendor implementation
    pub fn vendor(&self) -> &Arc<dyn SignServiceVendor> {
        &self.vendor
    }

    /// Perform a health check against the service
    ///
    /// Lists vaults as a cheap round trip that verifies both connectivity
    /// and credentials.
    pub async fn health_check(&self) -> Result<()> {
        match self.vendor.list_vaults().await {
            Ok(_) => {
                tracing::info!(
                    base_url = self.vendor.base_url(),
                    "Signing service health check passed"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    base_url = self.vendor.base_url(),
                    error = %e,
                    "Signing service health check failed"
                );
                Err(e)
            }
        }
    }

    /// Base URL of the configured service
    pub fn base_url(&self) -> &str {
        self.vendor.base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{secret_string, RetryConfig};

    fn test_config(vendor: &str) -> ServiceConfig {
        ServiceConfig {
            base_url: "https://sandbox.d4sign.com.br/api/v1".to_string(),
            vendor: vendor.to_string(),
            token_api: secret_string("token".to_string()),
            crypt_key: secret_string("key".to_string()),
            tls_verify: true,
            timeout_seconds: 5,
            fetch_concurrency: 2,
            retry: RetryConfig::default(),
        }
    }

    #[test]
    fn test_client_creation_with_d4sign() {
        let client = SignServiceClient::new(test_config("d4sign")).unwrap();
        assert_eq!(client.base_url(), "https://sandbox.d4sign.com.br/api/v1");
    }

    #[test]
    fn test_client_creation_with_unsupported_vendor() {
        let result = SignServiceClient::new(test_config("othersign"));

        match result {
            Err(SignPackError::Configuration(msg)) => {
                assert!(msg.contains("Unsupported service vendor"));
            }
            _ => panic!("Expected Configuration error"),
        }
    }
}
