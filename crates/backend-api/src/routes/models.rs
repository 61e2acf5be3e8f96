//! Request and response bodies shared by the route handlers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_auth::{AuthSession, User};
use storefront_commerce::{
    compute_total, Address, Cart, CartLine, CheckoutReceipt, Product, UserProfile,
};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    #[schema(value_type = f64)]
    pub cost: Decimal,
    pub rating: u8,
    pub image: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
            cost: product.cost,
            rating: product.rating,
            image: product.image,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressResponse {
    pub id: String,
    pub address: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            address: address.text,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressesResponse {
    pub addresses: Vec<AddressResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddressRequest {
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressOnlyResponse {
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.public_id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

impl SessionResponse {
    pub fn new(session: AuthSession, user: User) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at.to_rfc3339(),
            user: user.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[schema(value_type = f64)]
    pub wallet_money: Decimal,
    pub address: Option<String>,
    pub addresses: Vec<AddressResponse>,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            wallet_money: profile.wallet_money,
            address: profile.address,
            addresses: profile.addresses.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum GetUserResponse {
    Full(UserProfileResponse),
    AddressOnly(AddressOnlyResponse),
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// `address` limits the response to the legacy address.
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub value: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub product_id: String,
    pub quantity: u32,
    pub product: ProductResponse,
}

impl From<CartLine> for CartItemResponse {
    fn from(line: CartLine) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
            product: line.product.into(),
        }
    }
}

/// Body of the cart mutations: the resulting lines plus their live total.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    #[schema(value_type = f64)]
    pub total: Decimal,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let total = compute_total(cart.lines());
        Self {
            items: cart.lines().cloned().map(Into::into).collect(),
            total,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    #[schema(value_type = f64)]
    pub wallet_money: Decimal,
    #[schema(value_type = f64)]
    pub charged: Decimal,
}

impl From<CheckoutReceipt> for CheckoutResponse {
    fn from(receipt: CheckoutReceipt) -> Self {
        Self {
            wallet_money: receipt.wallet_money,
            charged: receipt.charged,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
