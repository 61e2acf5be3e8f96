use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    routes::models::{ProductResponse, SearchQuery},
    ApiError, AppState,
};

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses((status = 200, description = "The whole catalog", body = [ProductResponse]))
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.catalog().list_products().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/products/search",
    tag = "Products",
    params(SearchQuery),
    responses((status = 200, description = "Products whose name or category matches", body = [ProductResponse]))
)]
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let value = query.value.unwrap_or_default();
    let products = state.catalog().search_products(&value).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/products/{product_id}",
    tag = "Products",
    params(("product_id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "Unknown product", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.catalog().get_product(&product_id).await?;
    Ok(Json(product.into()))
}
