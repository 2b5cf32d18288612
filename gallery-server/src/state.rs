//! Application state

use sqlx::PgPool;

use crate::auth::TokenService;
use crate::config::Config;
use crate::payment::PaymentClient;
use crate::upload::ImageStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Session token issuer/verifier
    pub tokens: TokenService,
    /// Uploaded image store
    pub images: ImageStore,
    /// Payment provider client
    pub payments: PaymentClient,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let images = ImageStore::new(&config.upload_dir);
        images.ensure_dir().await?;

        Ok(Self {
            pool,
            tokens: TokenService::new(&config.jwt_secret),
            images,
            payments: PaymentClient::new(
                &config.payment_api_url,
                &config.payment_api_key,
                &config.payment_shortcode,
                &config.payment_passkey,
            ),
        })
    }
}
