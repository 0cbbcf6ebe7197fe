//! Seller model and related payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Seller entity as stored in the `sellers` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Seller {
    pub id: Uuid,
    pub name: String,
}

impl Seller {
    /// Create a seller with a freshly generated identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Seller-shaped request body used by the update route
///
/// Both fields are optional on the wire; a missing or null `name` is caught by
/// validation rather than by deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SellerInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
}

impl SellerInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

/// Response for seller creation
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSellerResponse {
    pub message: String,
    pub seller: Seller,
}
