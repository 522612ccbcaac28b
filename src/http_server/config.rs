//! HTTP Server Configuration
//!
//! Bind address, store file location and the status-code policy for
//! errors. Loaded from an optional JSON file; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::cli::{CliError, CliResult};

/// How error classes map onto HTTP status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatusPolicy {
    /// Every failure is a 500
    #[default]
    Collapsed,
    /// 400 for malformed requests, 409 for existing tables, 500 otherwise
    Classified,
}

impl ErrorStatusPolicy {
    pub fn bad_request(&self) -> StatusCode {
        match self {
            ErrorStatusPolicy::Collapsed => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorStatusPolicy::Classified => StatusCode::BAD_REQUEST,
        }
    }

    pub fn conflict(&self) -> StatusCode {
        match self {
            ErrorStatusPolicy::Collapsed => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorStatusPolicy::Classified => StatusCode::CONFLICT,
        }
    }

    pub fn store_failure(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite file backing every table (default: "data.sql")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Status code policy for failed requests (default: collapsed)
    #[serde(default)]
    pub error_status: ErrorStatusPolicy,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data.sql")
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_path: default_database_path(),
            error_status: ErrorStatusPolicy::default(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Create a new config backed by the given database file
    pub fn with_database(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: HttpServerConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
