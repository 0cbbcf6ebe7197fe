//! Application state shared across handlers

use sqlx::SqlitePool;

use crate::{
    jwt::JwtService,
    repositories::{SellerRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub seller_repository: SellerRepository,
    pub user_repository: UserRepository,
    pub jwt_service: JwtService,
}
