//! Seller manager HTTP service
//!
//! CRUD-style endpoints over sellers, a stub login issuing HS256 bearer
//! tokens, and the request pipeline that guards them: bearer authentication,
//! role policies and per-route endpoint filters.

pub mod config;
pub mod error;
pub mod filters;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

use common::error::DatabaseResult;
use sqlx::SqlitePool;

pub use routes::create_router;
pub use state::AppState;

use crate::{
    jwt::{JwtService, SigningSecret},
    repositories::{SellerRepository, UserRepository},
};

/// Assemble the application state over an open pool
///
/// The seller table is created if it does not exist yet.
pub async fn build_state(
    db_pool: SqlitePool,
    secret: &SigningSecret,
    user_repository: UserRepository,
) -> DatabaseResult<AppState> {
    let seller_repository = SellerRepository::new(db_pool.clone());
    seller_repository.ensure_schema().await?;

    Ok(AppState {
        db_pool,
        seller_repository,
        user_repository,
        jwt_service: JwtService::new(secret),
    })
}
