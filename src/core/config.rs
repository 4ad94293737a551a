use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::shared::constants::DEFAULT_ALLOWED_EXTENSIONS;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub upload: UploadConfig,
    pub cleanup: CleanupConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Filesystem location and acceptance rules for uploaded photos
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory photo files are written to
    pub dir: PathBuf,
    /// Lowercase extensions (no dot) a stored photo may keep
    pub allowed_extensions: Vec<String>,
}

/// Retention window and sweep cadence for the cleanup worker
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    pub retention_hours: i64,
    pub sweep_interval_hours: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            // Only error if it's not "file not found" - that's acceptable
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            upload: UploadConfig::from_env()?,
            cleanup: CleanupConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_URL: &'static str = "sqlite://shiftlog.db";
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_string());

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl UploadConfig {
    const DEFAULT_UPLOAD_DIR: &'static str = "static/uploads";

    pub fn from_env() -> Result<Self, String> {
        let dir = PathBuf::from(
            env::var("UPLOAD_DIR").unwrap_or_else(|_| Self::DEFAULT_UPLOAD_DIR.to_string()),
        );

        // Comma-separated list; entries are normalized to bare lowercase
        // extensions so "jpg", ".JPG" and " jpeg " all work
        let allowed_extensions: Vec<String> = env::var("ALLOWED_IMAGE_EXTENSIONS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let allowed_extensions = if allowed_extensions.is_empty() {
            DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            allowed_extensions
        };

        Ok(Self {
            dir,
            allowed_extensions,
        })
    }
}

impl CleanupConfig {
    const DEFAULT_RETENTION_HOURS: i64 = 24;
    const DEFAULT_SWEEP_INTERVAL_HOURS: u64 = 6;
    // Upper bound for both hour settings; keeps cutoff arithmetic inside
    // chrono's representable range
    const MAX_HOURS: i64 = 24 * 365 * 100; // 100 years

    pub fn from_env() -> Result<Self, String> {
        let retention_hours = env::var("RETENTION_HOURS")
            .unwrap_or_else(|_| Self::DEFAULT_RETENTION_HOURS.to_string())
            .parse::<i64>()
            .map_err(|_| "RETENTION_HOURS must be a valid number".to_string())?;

        if retention_hours <= 0 {
            return Err("RETENTION_HOURS must be greater than zero".to_string());
        }

        if retention_hours > Self::MAX_HOURS {
            return Err(format!("RETENTION_HOURS must be at most {}", Self::MAX_HOURS));
        }

        let sweep_interval_hours = env::var("SWEEP_INTERVAL_HOURS")
            .unwrap_or_else(|_| Self::DEFAULT_SWEEP_INTERVAL_HOURS.to_string())
            .parse::<u64>()
            .map_err(|_| "SWEEP_INTERVAL_HOURS must be a valid number".to_string())?;

        if sweep_interval_hours == 0 {
            return Err("SWEEP_INTERVAL_HOURS must be greater than zero".to_string());
        }

        if sweep_interval_hours > Self::MAX_HOURS as u64 {
            return Err(format!(
                "SWEEP_INTERVAL_HOURS must be at most {}",
                Self::MAX_HOURS
            ));
        }

        Ok(Self {
            retention_hours,
            sweep_interval_hours,
        })
    }

    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::hours(self.retention_hours)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_hours * 3600)
    }
}
