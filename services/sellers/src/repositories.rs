//! Repositories for seller and user lookups

pub mod seller;
pub mod user;

pub use seller::{SELLERS_SCHEMA, SellerDb, SellerRepository};
pub use user::UserRepository;
