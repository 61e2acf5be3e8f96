mod error;
mod state;
mod util;

pub mod docs;
pub mod routes;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use axum::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        // Auth routes
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        // Catalog routes
        .route("/products", get(routes::products::list_products))
        .route("/products/search", get(routes::products::search_products))
        .route("/products/:product_id", get(routes::products::get_product))
        // User routes
        .route(
            "/users/:user_id",
            get(routes::users::get_user).put(routes::users::set_address),
        )
        .route(
            "/users/:user_id/addresses",
            get(routes::users::list_addresses).post(routes::users::add_address),
        )
        .route(
            "/users/:user_id/addresses/:address_id",
            delete(routes::users::delete_address),
        )
        // Cart routes
        .route(
            "/cart",
            get(routes::cart::get_cart)
                .post(routes::cart::add_item)
                .put(routes::cart::update_item),
        )
        .route("/cart/checkout", put(routes::cart::checkout))
        .route("/cart/:product_id", delete(routes::cart::remove_item))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
