//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use bites_infra::database::DatabaseConfig;

/// Blob storage configuration.
#[derive(Debug, Clone)]
pub struct BlobConfig {
    /// Directory blobs are written under. Unset means in-memory blobs.
    pub root: Option<PathBuf>,
    /// Base URL where the root is publicly served.
    pub public_base_url: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub blob: BlobConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        let blob = BlobConfig {
            root: env::var("BLOB_ROOT").ok().map(PathBuf::from),
            public_base_url: env::var("PUBLIC_BLOB_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080/blobs".to_string()),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            blob,
        }
    }
}
