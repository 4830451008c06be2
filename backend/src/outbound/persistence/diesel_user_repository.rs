//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Double;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserChanges, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: UserId::from_uuid(row.id),
        wallet_address: row.wallet_address,
        username: row.username,
        bio: row.bio,
        role: row.role,
        profile_picture: row.profile_picture,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Build an `ILIKE` pattern matching `query` literally anywhere in a column.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            wallet_address: &user.wallet_address,
            username: &user.username,
            bio: &user.bio,
            role: &user.role,
            profile_picture: user.profile_picture.as_deref(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(drop)
            .map_err(diesel_error)
    }

    async fn find_by_wallet_address(
        &self,
        wallet_address: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::wallet_address.eq(wallet_address))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(row_to_user))
    }

    async fn update_by_wallet_address(
        &self,
        wallet_address: &str,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        if changes.is_empty() {
            return self.find_by_wallet_address(wallet_address).await;
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changeset = UserChangeset {
            username: changes.username.as_deref(),
            bio: changes.bio.as_deref(),
            role: changes.role.as_deref(),
            profile_picture: changes.profile_picture.as_deref(),
            updated_at: Utc::now(),
        };
        let row: Option<UserRow> =
            diesel::update(users::table.filter(users::wallet_address.eq(wallet_address)))
                .set(&changeset)
                .returning(UserRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?;
        Ok(row.map(row_to_user))
    }

    async fn search(&self, query: &str) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let pattern = contains_pattern(query);
        let rows: Vec<UserRow> = users::table
            .filter(
                users::username
                    .ilike(pattern.as_str())
                    .or(users::bio.ilike(pattern.as_str()))
                    .or(users::wallet_address.ilike(pattern.as_str()))
                    .or(users::role.ilike(pattern.as_str())),
            )
            .order(users::created_at.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn sample(&self, limit: u32) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(sql::<Double>("RANDOM()"))
            .limit(i64::from(limit))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_user).collect())
    }
}
