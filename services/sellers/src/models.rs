//! Request, response and storage models

pub mod seller;
pub mod user;

// Re-export for convenience
pub use seller::{CreateSellerResponse, Seller, SellerInput};
pub use user::{LoginRequest, LoginResponse, Role, User};
