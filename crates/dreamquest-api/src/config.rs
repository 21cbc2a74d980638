//! Server configuration loaded from environment variables.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin (`CORS_ORIGINS=*`).
    Any,
    /// Only the listed origins.
    List(Vec<String>),
}

/// Server configuration.
///
/// | Env Var                       | Default                 |
/// |-------------------------------|-------------------------|
/// | `HOST`                        | `0.0.0.0`               |
/// | `PORT`                        | `8000`                  |
/// | `REDIS_URL`                   | unset (in-memory store) |
/// | `CORS_ORIGINS`                | `http://localhost:3000` |
/// | `WEBGL_OUTPUT_DIR`            | `./public/webgl`        |
/// | `WEBGL_PUBLIC_PATH`           | `/webgl`                |
/// | `QUEUE_CAPACITY`              | `256`                   |
/// | `MAX_CONCURRENT_JOBS`         | `4`                     |
/// | `OTEL_EXPORTER_OTLP_ENDPOINT` | unset (no export)       |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Redis connection URL; `None` selects the in-memory store.
    pub redis_url: Option<String>,
    /// Allowed CORS origins.
    pub cors_origins: CorsOrigins,
    /// Directory world builds are written to.
    pub webgl_output_dir: PathBuf,
    /// URL prefix built worlds are served under.
    pub webgl_public_path: String,
    /// Capacity of the work queue.
    pub queue_capacity: usize,
    /// Most jobs the worker runs at once.
    pub max_concurrent_jobs: usize,
    /// OTLP collector endpoint; `None` disables span export.
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let queue_capacity = parse_or(var("QUEUE_CAPACITY"), "QUEUE_CAPACITY", 256_usize)?;
        let max_concurrent_jobs =
            parse_or(var("MAX_CONCURRENT_JOBS"), "MAX_CONCURRENT_JOBS", 4_usize)?;
        if queue_capacity == 0 {
            return Err(AppError::Config("QUEUE_CAPACITY must be at least 1".into()));
        }
        if max_concurrent_jobs == 0 {
            return Err(AppError::Config(
                "MAX_CONCURRENT_JOBS must be at least 1".into(),
            ));
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(var("PORT"), "PORT", 8000_u16)?,
            redis_url: var("REDIS_URL"),
            cors_origins: parse_cors_origins(
                &var("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:3000".into()),
            ),
            webgl_output_dir: var("WEBGL_OUTPUT_DIR")
                .map_or_else(|| PathBuf::from("./public/webgl"), PathBuf::from),
            webgl_public_path: var("WEBGL_PUBLIC_PATH").unwrap_or_else(|| "/webgl".into()),
            queue_capacity,
            max_concurrent_jobs,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<T>(value: Option<String>, name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    value.map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|e| AppError::Config(format!("{name} must be valid: {e}")))
    })
}

fn parse_cors_origins(raw: &str) -> CorsOrigins {
    if raw == "*" {
        return CorsOrigins::Any;
    }
    CorsOrigins::List(
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect(),
    )
}
