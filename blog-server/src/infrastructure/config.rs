use anyhow::{bail, Context, Result};

pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017/blog-app";
pub const DEFAULT_TEST_DATABASE_URL: &str = "mongodb://localhost:27017/test-blog-app";
const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:8000,http://127.0.0.1:8000";

/// Where posts are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => bail!("Unknown STORE_BACKEND `{}` (expected `mongo` or `memory`)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub store_backend: StoreBackend,
    pub http_host: String,
    pub http_port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let store_backend = match lookup("STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => StoreBackend::Mongo,
        };

        let http_host = lookup("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let http_port: u16 = match lookup("HTTP_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("HTTP_PORT must be a port number, got `{}`", value))?,
            None => 8080,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            database_url,
            store_backend,
            http_host,
            http_port,
            cors_allowed_origins,
        })
    }

    /// In-memory store on a free local port.
    pub fn in_memory() -> Self {
        Self {
            database_url: String::new(),
            store_backend: StoreBackend::Memory,
            http_host: "127.0.0.1".to_string(),
            http_port: 0,
            cors_allowed_origins: Vec::new(),
        }
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

pub fn test_database_url() -> String {
    std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string())
}
