use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use storefront_commerce::{Projection, UserView};

use crate::{
    routes::models::{
        AddressOnlyResponse, AddressRequest, AddressesResponse, GetUserResponse, SuccessResponse,
        UserQuery,
    },
    util::require_identity,
    ApiError, AppState,
};

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    security(("bearerAuth" = [])),
    params(("user_id" = String, Path, description = "Public user id"), UserQuery),
    responses(
        (status = 200, description = "User profile, or only the address with q=address", body = GetUserResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "Not your account", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown user", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<GetUserResponse>, ApiError> {
    let identity = require_identity(&state, &headers).await?;
    let projection = match query.q.as_deref() {
        Some("address") => Projection::AddressOnly,
        _ => Projection::Full,
    };

    let view = state
        .identities()
        .get_user(&identity, &user_id, projection)
        .await?;

    Ok(Json(match view {
        UserView::Full(profile) => GetUserResponse::Full(profile.into()),
        UserView::AddressOnly { address } => {
            GetUserResponse::AddressOnly(AddressOnlyResponse { address })
        }
    }))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}",
    tag = "Users",
    security(("bearerAuth" = [])),
    params(("user_id" = String, Path, description = "Public user id")),
    request_body = AddressRequest,
    responses(
        (status = 200, description = "Legacy address updated", body = AddressOnlyResponse),
        (status = 400, description = "Address too short", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "Not your account", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown user", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Json(payload): Json<AddressRequest>,
) -> Result<Json<AddressOnlyResponse>, ApiError> {
    let identity = require_identity(&state, &headers).await?;
    let address = state
        .addresses()
        .set_legacy_address(&identity, &user_id, &payload.address)
        .await?;

    Ok(Json(AddressOnlyResponse {
        address: Some(address),
    }))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/addresses",
    tag = "Addresses",
    security(("bearerAuth" = [])),
    params(("user_id" = String, Path, description = "Public user id")),
    responses(
        (status = 200, description = "Saved addresses, oldest first", body = AddressesResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "Not your account", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown user", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_addresses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Result<Json<AddressesResponse>, ApiError> {
    let identity = require_identity(&state, &headers).await?;
    let addresses = state
        .addresses()
        .list_addresses(&identity, &user_id)
        .await?;

    Ok(Json(AddressesResponse {
        addresses: addresses.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/users/{user_id}/addresses",
    tag = "Addresses",
    security(("bearerAuth" = [])),
    params(("user_id" = String, Path, description = "Public user id")),
    request_body = AddressRequest,
    responses(
        (status = 200, description = "Address saved", body = SuccessResponse),
        (status = 400, description = "Address too short", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "Not your account", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown user", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Json(payload): Json<AddressRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let identity = require_identity(&state, &headers).await?;
    state
        .addresses()
        .add_address(&identity, &user_id, &payload.address)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}/addresses/{address_id}",
    tag = "Addresses",
    security(("bearerAuth" = [])),
    params(
        ("user_id" = String, Path, description = "Public user id"),
        ("address_id" = String, Path, description = "Address id")
    ),
    responses(
        (status = 200, description = "Address deleted", body = SuccessResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "Not your account", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown user or address", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, address_id)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let identity = require_identity(&state, &headers).await?;
    state
        .addresses()
        .delete_address(&identity, &user_id, &address_id)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}
