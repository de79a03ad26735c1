use anyhow::{Context, Result};

pub const DEFAULT_BRAND_LINE: &str = "Generated by Professional CV Review System";
const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every value has a default; a value that is set but unparseable fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Brand line printed in the closing footer of every PDF report.
    pub brand_line: String,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            brand_line: DEFAULT_BRAND_LINE.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            brand_line: env_or("REPORT_BRAND_LINE", DEFAULT_BRAND_LINE),
            max_body_bytes: env_or("MAX_BODY_BYTES", &DEFAULT_MAX_BODY_BYTES.to_string())
                .parse::<usize>()
                .context("MAX_BODY_BYTES must be a byte count")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.brand_line, DEFAULT_BRAND_LINE);
        assert_eq!(config.max_body_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_env_or_falls_back_when_unset() {
        assert_eq!(env_or("REVIEWDOC_TEST_SURELY_UNSET_VAR", "fallback"), "fallback");
    }
}
