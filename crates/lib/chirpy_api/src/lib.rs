//! # chirpy_api
//!
//! HTTP API library for Chirpy.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use chirpy_core::store::Store;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{admin, auth, chirps, health, users, webhooks};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (PostgreSQL in production, in-memory for tests).
    pub store: Arc<dyn Store>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(store: impl Store + 'static, config: ApiConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_API_HEALTHZ, get(health::healthz))
        .route(routes::POST_API_USERS, post(users::create_user_handler))
        .route(routes::POST_API_LOGIN, post(auth::login_handler))
        .route(routes::GET_API_CHIRPS, get(chirps::list_chirps_handler))
        .route(routes::GET_API_CHIRPS_ID, get(chirps::get_chirp_handler))
        .route(routes::POST_ADMIN_RESET, post(admin::reset_handler));

    // Routes that require an access token
    let protected = Router::new()
        .route(routes::PUT_API_USERS, put(users::update_user_handler))
        .route(routes::POST_API_CHIRPS, post(chirps::create_chirp_handler))
        .route(
            routes::DELETE_API_CHIRPS_ID,
            delete(chirps::delete_chirp_handler),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    // Routes that require a live refresh token
    let refresh = Router::new()
        .route(routes::POST_API_REFRESH, post(auth::refresh_handler))
        .route(routes::POST_API_REVOKE, post(auth::revoke_handler))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_refresh_token,
        ));

    // Partner webhooks (API key)
    let webhooks = Router::new()
        .route(
            routes::POST_API_POLKA_WEBHOOKS,
            post(webhooks::polka_webhook_handler),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_api_key,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(refresh)
        .merge(webhooks)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
