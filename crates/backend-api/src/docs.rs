use axum::Json;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::products::list_products,
        crate::routes::products::search_products,
        crate::routes::products::get_product,
        crate::routes::users::get_user,
        crate::routes::users::set_address,
        crate::routes::users::list_addresses,
        crate::routes::users::add_address,
        crate::routes::users::delete_address,
        crate::routes::cart::get_cart,
        crate::routes::cart::add_item,
        crate::routes::cart::update_item,
        crate::routes::cart::remove_item,
        crate::routes::cart::checkout
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::models::RegisterRequest,
            crate::routes::models::LoginRequest,
            crate::routes::models::SessionResponse,
            crate::routes::models::UserResponse,
            crate::routes::models::UserProfileResponse,
            crate::routes::models::GetUserResponse,
            crate::routes::models::AddressRequest,
            crate::routes::models::AddressResponse,
            crate::routes::models::AddressesResponse,
            crate::routes::models::AddressOnlyResponse,
            crate::routes::models::SuccessResponse,
            crate::routes::models::ProductResponse,
            crate::routes::models::CartItemRequest,
            crate::routes::models::CartItemResponse,
            crate::routes::models::CartResponse,
            crate::routes::models::CheckoutResponse
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Auth", description = "Registration and session management"),
        (name = "Products", description = "Catalog lookups"),
        (name = "Users", description = "User profile and legacy address"),
        (name = "Addresses", description = "Saved shipping addresses"),
        (name = "Cart", description = "Cart lines and checkout")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        let schemes = &mut components.security_schemes;

        let mut scheme = SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer));
        if let SecurityScheme::Http(http) = &mut scheme {
            http.bearer_format = Some("Bearer".to_string());
        }

        schemes.insert("bearerAuth".to_string(), scheme);
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
