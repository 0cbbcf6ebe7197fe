//! Seller repository and the per-request store handle

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use common::database::ensure_schema;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{SqlitePool, pool::PoolConnection, Sqlite};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{error::ApiError, models::Seller, state::AppState};

/// DDL for the seller table
pub const SELLERS_SCHEMA: &[&str] = &[r#"
    CREATE TABLE IF NOT EXISTS sellers (
        id BLOB PRIMARY KEY NOT NULL,
        name TEXT NOT NULL
    )
    "#];

/// Seller repository, a cheap handle over the connection pool
#[derive(Clone)]
pub struct SellerRepository {
    pool: SqlitePool,
}

impl SellerRepository {
    /// Create a new seller repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the seller table if it does not exist yet
    pub async fn ensure_schema(&self) -> DatabaseResult<()> {
        ensure_schema(&self.pool, SELLERS_SCHEMA).await
    }

    /// Acquire a store handle scoped to one request
    pub async fn acquire(&self) -> DatabaseResult<SellerDb> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(DatabaseError::Connection)?;
        Ok(SellerDb { conn })
    }
}

/// Store handle owning one pooled connection
///
/// The connection goes back to the pool when the handle is dropped, whichever
/// way the request ends.
pub struct SellerDb {
    conn: PoolConnection<Sqlite>,
}

impl SellerDb {
    /// Get all sellers in insertion order
    pub async fn get_all(&mut self) -> DatabaseResult<Vec<Seller>> {
        sqlx::query_as::<_, Seller>("SELECT id, name FROM sellers ORDER BY rowid")
            .fetch_all(&mut *self.conn)
            .await
            .map_err(DatabaseError::Query)
    }

    /// Persist a new seller
    pub async fn add(&mut self, seller: &Seller) -> DatabaseResult<()> {
        info!("Creating new seller: {}", seller.id);

        sqlx::query("INSERT INTO sellers (id, name) VALUES (?, ?)")
            .bind(seller.id)
            .bind(&seller.name)
            .execute(&mut *self.conn)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(())
    }

    /// Find a seller by ID
    pub async fn find_by_id(&mut self, id: Uuid) -> DatabaseResult<Option<Seller>> {
        debug!("Finding seller by ID: {}", id);

        sqlx::query_as::<_, Seller>("SELECT id, name FROM sellers WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(DatabaseError::Query)
    }

    /// Rename a seller, returning whether a row was touched
    pub async fn update_name(&mut self, id: Uuid, name: &str) -> DatabaseResult<bool> {
        let result = sqlx::query("UPDATE sellers SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SellerDb {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.seller_repository.acquire().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::database::{DatabaseConfig, init_pool};

    async fn repository() -> SellerRepository {
        let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();
        let repository = SellerRepository::new(pool);
        repository.ensure_schema().await.unwrap();
        repository
    }

    #[tokio::test]
    async fn test_add_then_find_by_id() {
        let repository = repository().await;
        let mut db = repository.acquire().await.unwrap();
        let seller = Seller::new("Acme");

        db.add(&seller).await.unwrap();

        assert_eq!(db.find_by_id(seller.id).await.unwrap(), Some(seller));
        assert_eq!(db.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_all_keeps_insertion_order() {
        let repository = repository().await;
        let mut db = repository.acquire().await.unwrap();
        assert!(db.get_all().await.unwrap().is_empty());

        let first = Seller::new("First");
        let second = Seller::new("Second");
        db.add(&first).await.unwrap();
        db.add(&second).await.unwrap();

        assert_eq!(db.get_all().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_update_name() {
        let repository = repository().await;
        let mut db = repository.acquire().await.unwrap();
        let seller = Seller::new("Old");
        db.add(&seller).await.unwrap();

        assert!(db.update_name(seller.id, "New").await.unwrap());
        assert!(!db.update_name(Uuid::new_v4(), "Ghost").await.unwrap());

        let stored = db.find_by_id(seller.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "New");
    }

    #[tokio::test]
    async fn test_handle_releases_connection_on_drop() {
        let repository = repository().await;

        // The in-memory pool holds exactly one connection
        let first = repository.acquire().await.unwrap();
        drop(first);
        let mut second = repository.acquire().await.unwrap();

        assert!(second.get_all().await.unwrap().is_empty());
    }
}
