use storefront_auth::{normalize_email, User};

/// The authenticated caller, as seen by the commerce core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub public_id: String,
    pub email: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            public_id: user.public_id.clone(),
            email: user.email.clone(),
        }
    }
}

/// The single ownership rule: a record belongs to the caller when the owner's
/// email matches the caller's, ignoring case and surrounding whitespace.
pub fn belongs_to(owner_email: &str, identity: &Identity) -> bool {
    normalize_email(owner_email) == normalize_email(&identity.email)
}
