//! API routes — public reads, authenticated payment, admin-gated writes

pub mod artwork;
pub mod auth;
pub mod contact;
pub mod exhibition;
pub mod health;
pub mod payment;

use axum::routing::{get, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::{require_admin, require_auth};
use crate::error::ServiceError;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, ServiceError>;

/// Create the combined router
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    // Public: reads, account endpoints, contact form
    let public = Router::new()
        .route("/", get(health::index))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/admin-login", post(auth::admin_login))
        .route("/api/artworks", get(artwork::list_artworks))
        .route("/api/artworks/{id}", get(artwork::get_artwork))
        .route("/api/exhibitions", get(exhibition::list_exhibitions))
        .route("/api/exhibitions/{id}", get(exhibition::get_exhibition))
        .route("/api/contact", post(contact::create_message));

    // Any valid session
    let authenticated = Router::new()
        .route("/api/payments/initiate", post(payment::initiate))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    // Admin only: resource mutations, message inbox
    let admin = Router::new()
        .route("/api/artworks", post(artwork::create_artwork))
        .route(
            "/api/artworks/{id}",
            put(artwork::update_artwork).delete(artwork::delete_artwork),
        )
        .route("/api/exhibitions", post(exhibition::create_exhibition))
        .route(
            "/api/exhibitions/{id}",
            put(exhibition::update_exhibition).delete(exhibition::delete_exhibition),
        )
        .route("/messages", get(contact::list_messages))
        .route("/messages/{id}", put(contact::update_message))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(admin)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenService;
    use crate::payment::PaymentClient;
    use crate::upload::ImageStore;
    use axum::body::Body;
    use http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            // Lazy pool: guard tests never touch the database
            pool: sqlx::postgres::PgPoolOptions::new()
                .connect_lazy("postgres://localhost/unused")
                .unwrap(),
            tokens: TokenService::new("test-secret-key-at-least-32-bytes!!"),
            images: ImageStore::new(std::env::temp_dir().join("gallery-test-uploads")),
            payments: PaymentClient::new("http://localhost", "key", "174379", "passkey"),
        }
    }

    fn guarded_router(state: AppState) -> Router {
        Router::new()
            .route("/admin-only", get(|| async { "ok" }))
            .layer(middleware::from_fn(require_admin))
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state)
    }

    fn request(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/admin-only");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_credential_is_401() {
        let app = guarded_router(test_state());
        let resp = app.oneshot(request(None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_401() {
        let app = guarded_router(test_state());
        let resp = app
            .oneshot(request(Some("Bearer not-a-token")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_admin_token_is_403() {
        let state = test_state();
        let token = state.tokens.issue("42", "Jane Curator", false).unwrap();
        let app = guarded_router(state);

        let resp = app
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_token_is_admitted() {
        let state = test_state();
        let token = state.tokens.issue("1", "Site Admin", true).unwrap();
        let app = guarded_router(state);

        let resp = app
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_second_word_header_form_is_accepted() {
        let state = test_state();
        let token = state.tokens.issue("1", "Site Admin", true).unwrap();
        let app = guarded_router(state);

        let resp = app
            .oneshot(request(Some(&format!("Token {token}"))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rotated_secret_is_401() {
        let state = test_state();
        let other = TokenService::new("different-secret-key-32-bytes-long!");
        let token = other.issue("1", "Site Admin", true).unwrap();
        let app = guarded_router(state);

        let resp = app
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
