use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use storefront_commerce::{CartIntent, QuantityChange};

use crate::{
    routes::models::{CartItemRequest, CartItemResponse, CartResponse, CheckoutResponse},
    util::require_identity,
    ApiError, AppState,
};

#[utoipa::path(
    get,
    path = "/cart",
    tag = "Cart",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Cart lines with live prices", body = [CartItemResponse]),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<CartItemResponse>>, ApiError> {
    let identity = require_identity(&state, &headers).await?;
    let cart = state.carts().get_cart(&identity).await?;
    Ok(Json(cart.lines().cloned().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/cart",
    tag = "Cart",
    security(("bearerAuth" = [])),
    request_body = CartItemRequest,
    responses(
        (status = 200, description = "Line added", body = CartResponse),
        (status = 400, description = "Quantity out of range", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown product", body = crate::error::ErrorResponse),
        (status = 409, description = "Product already in cart", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CartItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let identity = require_identity(&state, &headers).await?;
    let cart = state
        .carts()
        .upsert_item(
            &identity,
            &payload.product_id,
            payload.quantity,
            CartIntent::Add,
        )
        .await?;
    Ok(Json(cart.into()))
}

#[utoipa::path(
    put,
    path = "/cart",
    tag = "Cart",
    security(("bearerAuth" = [])),
    request_body = CartItemRequest,
    responses(
        (status = 200, description = "Quantity replaced", body = CartResponse),
        (status = 204, description = "Quantity was zero and the line is gone"),
        (status = 400, description = "Quantity out of range", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown product", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CartItemRequest>,
) -> Result<Response, ApiError> {
    let identity = require_identity(&state, &headers).await?;
    let change = state
        .carts()
        .set_quantity(&identity, &payload.product_id, payload.quantity)
        .await?;

    Ok(match change {
        QuantityChange::Removed => StatusCode::NO_CONTENT.into_response(),
        QuantityChange::Updated(cart) => Json(CartResponse::from(cart)).into_response(),
    })
}

#[utoipa::path(
    delete,
    path = "/cart/{product_id}",
    tag = "Cart",
    security(("bearerAuth" = [])),
    params(("product_id" = String, Path, description = "Product id")),
    responses(
        (status = 204, description = "Line removed"),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 404, description = "No such line", body = crate::error::ErrorResponse)
    )
)]
pub async fn remove_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let identity = require_identity(&state, &headers).await?;
    state.carts().remove_item(&identity, &product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/cart/checkout",
    tag = "Cart",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Wallet debited and cart emptied", body = CheckoutResponse),
        (status = 400, description = "EmptyCart, NoAddress or InsufficientBalance", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    )
)]
pub async fn checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let identity = require_identity(&state, &headers).await?;
    let receipt = state.checkout().checkout(&identity).await?;
    Ok(Json(receipt.into()))
}
