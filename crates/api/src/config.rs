use crate::auth::jwt::{JwtConfig, ServiceTokenConfig};

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have sensible defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// User JWT configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Service-token namespace configuration (separate secret + constant).
    pub service: ServiceTokenConfig,
    /// Secret keying the TIN field cipher.
    pub crypto_secret: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `3000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `JWT_SECRET`             | (required)              |
    /// | `SERVICE_TOKEN_SECRET`   | (required)              |
    /// | `SERVICE_SECURITY_TOKEN` | (required)              |
    /// | `CRYPTO_SECRET`          | (required)              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();
        let service = ServiceTokenConfig::from_env();

        let crypto_secret =
            std::env::var("CRYPTO_SECRET").expect("CRYPTO_SECRET must be set in the environment");
        assert!(!crypto_secret.is_empty(), "CRYPTO_SECRET must not be empty");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            service,
            crypto_secret,
        }
    }
}
