//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Gallery server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT signing secret for session tokens
    pub jwt_secret: String,
    /// Directory served under /static (uploads live in a subdirectory)
    pub static_dir: String,
    /// Directory where ingested images are written
    pub upload_dir: String,
    /// Payment provider API base URL
    pub payment_api_url: String,
    /// Payment provider API credential
    pub payment_api_key: String,
    /// Payment provider business short code
    pub payment_shortcode: String,
    /// Payment provider passkey (STK push password derivation)
    pub payment_passkey: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "static/uploads".into()),
            payment_api_url: std::env::var("PAYMENT_API_URL")
                .unwrap_or_else(|_| "https://sandbox.safaricom.co.ke".into()),
            payment_api_key: Self::require_secret("PAYMENT_API_KEY", &environment)?,
            payment_shortcode: std::env::var("PAYMENT_SHORTCODE")
                .unwrap_or_else(|_| "174379".into()),
            payment_passkey: Self::require_secret("PAYMENT_PASSKEY", &environment)?,
            environment,
        })
    }
}
