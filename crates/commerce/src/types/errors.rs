//! Error types for the commerce core.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for commerce operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Every failure a commerce operation can report.
///
/// The first group are caller errors; `Contention`, `Corrupt` and `Database`
/// are server faults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("access denied")]
    Forbidden,

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("cart is empty")]
    EmptyCart,

    #[error("no saved address to ship to")]
    NoAddress,

    #[error("wallet balance {balance} is below cart total {total}")]
    InsufficientBalance { balance: Decimal, total: Decimal },

    #[error("checkout gave up after {attempts} conflicting attempts")]
    Contention { attempts: u32 },

    #[error("stored data is invalid: {message}")]
    Corrupt { message: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }

    /// Stable machine-readable name rendered to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::Forbidden => "Forbidden",
            Self::Validation { .. } => "ValidationError",
            Self::Conflict { .. } => "Conflict",
            Self::EmptyCart => "EmptyCart",
            Self::NoAddress => "NoAddress",
            Self::InsufficientBalance { .. } => "InsufficientBalance",
            Self::Contention { .. } | Self::Corrupt { .. } | Self::Database(_) => "ServerFault",
        }
    }

    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::Contention { .. } | Self::Corrupt { .. } | Self::Database(_)
        )
    }
}
