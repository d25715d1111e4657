//! Route definitions for the Crop Recommendation Platform

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        .merge(protected_routes(state))
}

/// Routes that require a bearer token
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/recommendations", recommendation_routes())
        .nest("/weather", weather_routes())
        .nest("/soil", soil_routes())
        .nest("/crops", crop_routes())
        .nest("/dashboard", dashboard_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn recommendation_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        post(handlers::create_recommendation).get(handlers::list_recommendations),
    )
}

fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/current", get(handlers::get_current_weather))
        .route("/history", get(handlers::get_weather_history))
}

fn soil_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handlers::create_soil_reading).get(handlers::list_soil_readings),
        )
        .route("/:reading_id", get(handlers::get_soil_reading))
}

fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops))
        .route("/:crop_id", get(handlers::get_crop))
}

fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/farmer", get(handlers::farmer_dashboard))
        .route("/officer", get(handlers::officer_dashboard))
        .route("/admin", get(handlers::admin_dashboard))
}
