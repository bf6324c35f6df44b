use std::time::Duration;

use anyhow::{Context, Result};

/// Upload ceiling advertised to users (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_EXTRACT_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Hard limit on uploaded resume size.
    pub max_upload_bytes: usize,
    /// `None` disables the extraction timeout.
    pub extract_timeout: Option<Duration>,
    /// When false, only the first page of a PDF is read.
    pub pdf_all_pages: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            extract_timeout: Some(Duration::from_secs(DEFAULT_EXTRACT_TIMEOUT_SECS)),
            pdf_all_pages: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let timeout_secs: u64 = parse_env("EXTRACT_TIMEOUT_SECS", DEFAULT_EXTRACT_TIMEOUT_SECS)?;

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            extract_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            pdf_all_pages: parse_env("PDF_ALL_PAGES", defaults.pdf_all_pages)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
