//! Admin router configuration

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::admin::handlers::{
    admin_guard, dashboard_handler, login_handler, logout_handler, status_handler,
};
use crate::admin::models::AdminState;

/// Create the admin router: public auth endpoints plus the guarded area
pub fn create_admin_router(state: AdminState) -> Router {
    let guarded = Router::new()
        .route("/admin/dashboard", get(dashboard_handler))
        .route("/admin/status", get(status_handler))
        .layer(middleware::from_fn_with_state(state.clone(), admin_guard));

    Router::new()
        // Public routes (no session required)
        .route("/admin/auth/login", post(login_handler))
        .route("/admin/auth/logout", post(logout_handler))
        // Protected admin area
        .merge(guarded)
        // CORS support
        .layer(CorsLayer::permissive())
        // Shared state
        .with_state(state)
}
