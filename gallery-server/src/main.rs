//! gallery-server — art gallery web backend
//!
//! - Stateless JWT session auth with an admin role gate
//! - Artwork / exhibition CRUD with inline data-URI image ingestion
//! - Contact message inbox
//! - Mobile-money payment initiation pass-through

mod api;
mod auth;
mod config;
mod db;
mod error;
mod payment;
mod state;
mod upload;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gallery_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting gallery-server (env: {})", config.environment);

    let state = AppState::new(&config).await?;

    // `gallery-server create-admin <name> <email> <password>` seeds an admin
    // account and exits; admins are never created through the public API.
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("create-admin") {
        let [_, _, name, email, password] = &args[..] else {
            return Err("usage: gallery-server create-admin <name> <email> <password>".into());
        };
        return create_admin(&state, name, email, password).await;
    }

    let app = api::create_router(state, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("gallery-server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn create_admin(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), BoxError> {
    let email = email.trim().to_lowercase();

    if db::admins::find_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err("admin email already exists".into());
    }

    let password_hash =
        auth::hash_password(password).map_err(|e| format!("password hashing failed: {e}"))?;

    let id = db::admins::create(
        &state.pool,
        name,
        &email,
        &password_hash,
        shared::util::now_millis(),
    )
    .await?;

    tracing::info!(admin_id = id, "admin account created");

    Ok(())
}
