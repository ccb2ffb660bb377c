use std::env;
use std::fs;

use crate::error::GatewayError;

pub const DEFAULT_API_BASE: &str = "https://apis.data.go.kr/1051000/recruitment";

#[derive(Debug)]
pub struct Settings {
    /// Base URL of the recruitment data API.
    pub api_base_url: String,
    /// Service credential for the recruitment API. May be empty: its
    /// absence is reported per request, not at startup.
    pub service_key: String,
    /// Main HTTP server port (jobs endpoints + health).
    pub http_port: u16,
    /// Cache time-to-live in seconds.
    pub cache_ttl_secs: u64,
    /// Rows requested from the upstream per cache refresh.
    pub fetch_rows: u32,
    /// Total timeout for one upstream request, in seconds.
    pub upstream_timeout_secs: u64,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), GatewayError> {
        validate_base_url(&self.api_base_url)?;
        validate_port(self.http_port)?;
        if self.fetch_rows == 0 {
            return Err(GatewayError::Config("Fetch rows cannot be 0".into()));
        }
        Ok(())
    }
}

/// Validates that the base URL is not empty or whitespace-only.
fn validate_base_url(url: &str) -> Result<(), GatewayError> {
    if url.trim().is_empty() {
        return Err(GatewayError::Config("API base URL cannot be empty".into()));
    }
    Ok(())
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), GatewayError> {
    if port == 0 {
        return Err(GatewayError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

/// Read a secret from a file path, trimming the trailing newline most
/// secret stores append.
fn read_secret_file(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content.trim().to_string()),
        Err(e) => Err(format!("Failed to read secret file {path}: {e}").into()),
    }
}

/// Read the service key from the environment, with support for a _FILE
/// suffix (Docker Secrets). Absence yields an empty key rather than an
/// error; endpoints report the missing credential per request.
fn get_service_key() -> Result<String, Box<dyn std::error::Error>> {
    if let Ok(file_path) = env::var("APP_SERVICE_KEY_FILE") {
        return read_secret_file(&file_path);
    }
    Ok(env::var("APP_SERVICE_KEY").unwrap_or_default())
}

pub fn get_configuration() -> Result<Settings, Box<dyn std::error::Error>> {
    let api_base_url =
        env::var("APP_RECRUIT_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    let service_key = get_service_key()?;

    let http_port = env::var("HTTP_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()?;
    let cache_ttl_secs = env::var("APP_CACHE_TTL_SECS")
        .unwrap_or_else(|_| "300".to_string())
        .parse::<u64>()?;
    let fetch_rows = env::var("APP_FETCH_ROWS")
        .unwrap_or_else(|_| "1000".to_string())
        .parse::<u32>()?;
    let upstream_timeout_secs = env::var("APP_UPSTREAM_TIMEOUT_SECS")
        .unwrap_or_else(|_| "10".to_string())
        .parse::<u64>()?;

    let settings = Settings {
        api_base_url,
        service_key,
        http_port,
        cache_ttl_secs,
        fetch_rows,
        upstream_timeout_secs,
    };

    // Validate settings before returning
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base_settings() -> Settings {
        Settings {
            api_base_url: DEFAULT_API_BASE.into(),
            service_key: "key".into(),
            http_port: 8080,
            cache_ttl_secs: 300,
            fetch_rows: 1000,
            upstream_timeout_secs: 10,
        }
    }

    #[test]
    fn test_validate_port_valid() {
        assert!(validate_port(80).is_ok());
        assert!(validate_port(8080).is_ok());
        assert!(validate_port(65535).is_ok());
        assert!(validate_port(1).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let result = validate_port(0);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Port cannot be 0"));
    }

    #[test]
    fn test_validate_base_url_valid() {
        assert!(validate_base_url(DEFAULT_API_BASE).is_ok());
        assert!(validate_base_url("http://localhost:3000/api").is_ok());
    }

    #[test]
    fn test_validate_base_url_empty_fails() {
        let result = validate_base_url("   ");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("API base URL cannot be empty"));
    }

    #[test]
    fn test_settings_validate_success() {
        assert!(base_settings().validate().is_ok());
    }

    #[test]
    fn test_settings_empty_service_key_is_allowed() {
        let settings = Settings {
            service_key: String::new(),
            ..base_settings()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validate_zero_port_fails() {
        let settings = Settings {
            http_port: 0,
            ..base_settings()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_validate_zero_fetch_rows_fails() {
        let settings = Settings {
            fetch_rows: 0,
            ..base_settings()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_read_secret_file_trims_trailing_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "secret-key").unwrap();

        let key = read_secret_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(key, "secret-key");
    }

    #[test]
    fn test_read_secret_file_missing_path_fails() {
        let result = read_secret_file("/nonexistent/service-key");
        assert!(result.is_err());
    }
}
