//! User account domain service.
//!
//! Implements the [`UserAccounts`] driving port over a [`UserRepository`].
//! Each operation validates its identifying input first, then calls the
//! repository inside [`storage_boundary`], then resolves absent records.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::domain::ports::{MAX_RANDOM_USERS, UserAccounts, UserRepository};
use crate::domain::{
    Avatar, Failure, NewUser, ServiceResult, USER_SUBJECT, User, UserChanges, UserId,
    require_found, require_identifier, storage_boundary,
};

/// User account service backed by a repository.
#[derive(Clone)]
pub struct UserAccountService<R> {
    repository: Arc<R>,
}

impl<R> UserAccountService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UserAccountService<R>
where
    R: UserRepository,
{
    async fn lookup(
        &self,
        wallet_address: &str,
        operation: &'static str,
        public_message: &'static str,
    ) -> ServiceResult<User> {
        let wallet_address = require_identifier(USER_SUBJECT, wallet_address)?;
        let record = storage_boundary(
            self.repository.find_by_wallet_address(wallet_address).await,
            operation,
            public_message,
        )?;
        require_found(record, USER_SUBJECT, wallet_address)
    }
}

#[async_trait]
impl<R> UserAccounts for UserAccountService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, new_user: NewUser) -> ServiceResult<User> {
        require_identifier(USER_SUBJECT, &new_user.wallet_address)?;
        let user = User::register(new_user, Utc::now());
        storage_boundary(
            self.repository.insert(&user).await,
            "create_user",
            "Failed to create new user.",
        )?;
        info!(user_id = %user.id, "user account created");
        Ok(user)
    }

    async fn login_user(&self, wallet_address: &str) -> ServiceResult<User> {
        let user = self
            .lookup(wallet_address, "login_user", "Failed to login user.")
            .await?;
        debug!(user_id = %user.id, "wallet login resolved");
        Ok(user)
    }

    async fn get_user_by_wallet_address(&self, wallet_address: &str) -> ServiceResult<User> {
        self.lookup(
            wallet_address,
            "get_user_by_wallet_address",
            "Failed to fetch user by wallet address.",
        )
        .await
    }

    async fn get_user_id_by_wallet_address(&self, wallet_address: &str) -> ServiceResult<UserId> {
        self.lookup(
            wallet_address,
            "get_user_id_by_wallet_address",
            "Failed to fetch user ID by wallet address.",
        )
        .await
        .map(|user| user.id)
    }

    async fn update_user(
        &self,
        wallet_address: &str,
        changes: UserChanges,
    ) -> ServiceResult<User> {
        let wallet_address = require_identifier(USER_SUBJECT, wallet_address)?;
        let updated = storage_boundary(
            self.repository
                .update_by_wallet_address(wallet_address, &changes)
                .await,
            "update_user",
            "Failed to update user.",
        )?;
        require_found(updated, USER_SUBJECT, wallet_address)
    }

    async fn get_user_avatar(&self, wallet_address: &str) -> ServiceResult<Avatar> {
        let wallet_address = require_identifier(USER_SUBJECT, wallet_address)?;
        let record = storage_boundary(
            self.repository.find_by_wallet_address(wallet_address).await,
            "get_user_avatar",
            "Failed to fetch user avatar.",
        )?;
        Ok(Avatar::from_picture(
            record
                .as_ref()
                .and_then(|user| user.profile_picture.as_deref()),
        ))
    }

    async fn search_users(&self, query: &str) -> ServiceResult<Vec<User>> {
        storage_boundary(
            self.repository.search(query.trim()).await,
            "search_users",
            "Failed to search users.",
        )
    }

    async fn random_users(&self, limit: u32) -> ServiceResult<Vec<User>> {
        if limit == 0 {
            return Err(Failure::validation(USER_SUBJECT, limit.to_string()));
        }
        storage_boundary(
            self.repository.sample(limit.min(MAX_RANDOM_USERS)).await,
            "random_users",
            "Failed to fetch random users.",
        )
    }
}
