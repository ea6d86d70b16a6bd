//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SignPackConfig;
use crate::domain::errors::SignPackError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`SignPackConfig`]
/// 4. Applies environment variable overrides (`SIGNPACK_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use signpack::config::load_config;
///
/// let config = load_config("signpack.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SignPackConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SignPackError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SignPackError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: SignPackConfig = toml::from_str(&contents)
        .map_err(|e| SignPackError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        SignPackError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. All missing variables are collected and
/// reported together.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SignPackError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the SIGNPACK_* prefix
///
/// Follows the pattern SIGNPACK_<SECTION>_<KEY>, for example
/// SIGNPACK_SERVICE_BASE_URL or SIGNPACK_EXPORT_OUTPUT_DIR.
fn apply_env_overrides(config: &mut SignPackConfig) {
    use crate::config::secret_string;

    if let Ok(val) = std::env::var("SIGNPACK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("SIGNPACK_SERVICE_BASE_URL") {
        config.service.base_url = val;
    }
    if let Ok(val) = std::env::var("SIGNPACK_SERVICE_TOKEN_API") {
        config.service.token_api = secret_string(val);
    }
    if let Ok(val) = std::env::var("SIGNPACK_SERVICE_CRYPT_KEY") {
        config.service.crypt_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("SIGNPACK_SERVICE_TLS_VERIFY") {
        config.service.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("SIGNPACK_SERVICE_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            config.service.timeout_seconds = seconds;
        }
    }
    if let Ok(val) = std::env::var("SIGNPACK_SERVICE_FETCH_CONCURRENCY") {
        if let Ok(concurrency) = val.parse() {
            config.service.fetch_concurrency = concurrency;
        }
    }

    if let Ok(val) = std::env::var("SIGNPACK_EXPORT_BUNDLE_MAX_BYTES") {
        if let Ok(bytes) = val.parse() {
            config.export.bundle_max_bytes = bytes;
        }
    }
    if let Ok(val) = std::env::var("SIGNPACK_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("SIGNPACK_EXPORT_BUNDLE_PREFIX") {
        config.export.bundle_prefix = val;
    }

    if let Ok(val) = std::env::var("SIGNPACK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SIGNPACK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("SIGNPACK_TEST_VAR", "test_value");
        let input = "token_api = \"${SIGNPACK_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "token_api = \"test_value\"\n");
        std::env::remove_var("SIGNPACK_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("SIGNPACK_MISSING_VAR");
        let input = "token_api = \"${SIGNPACK_MISSING_VAR}\"";
        assert!(substitute_env_vars(input).is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("SIGNPACK_COMMENTED_VAR");
        let input = "# token_api = \"${SIGNPACK_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("nonexistent.toml").is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "info"

[service]
base_url = "https://sandbox.d4sign.com.br/api/v1"
token_api = "test-token"
crypt_key = "test-key"

[export]
bundle_max_bytes = 104857600
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.service.base_url, "https://sandbox.d4sign.com.br/api/v1");
        assert_eq!(config.export.bundle_max_bytes, 104_857_600);
        assert_eq!(config.service.fetch_concurrency, 4);
    }

    #[test]
    fn test_load_config_invalid_values_rejected() {
        let toml_content = r#"
[service]
base_url = "ftp://not-http"
token_api = "t"
crypt_key = "k"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }
}
