//! Driving port for user account use cases.
//!
//! Inbound adapters depend on this trait rather than on a concrete service so
//! handlers stay testable without storage.

use async_trait::async_trait;

use crate::domain::{Avatar, NewUser, ServiceResult, User, UserChanges, UserId};

/// Default number of accounts returned by [`UserAccounts::random_users`].
pub const DEFAULT_RANDOM_USERS: u32 = 20;
/// Upper bound applied to [`UserAccounts::random_users`] limits.
pub const MAX_RANDOM_USERS: u32 = 100;

/// User account use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Register a new account.
    async fn create_user(&self, new_user: NewUser) -> ServiceResult<User>;

    /// Resolve the account behind a freshly connected wallet.
    async fn login_user(&self, wallet_address: &str) -> ServiceResult<User>;

    /// Fetch an account by wallet address.
    async fn get_user_by_wallet_address(&self, wallet_address: &str) -> ServiceResult<User>;

    /// Resolve the internal identifier of an account.
    async fn get_user_id_by_wallet_address(&self, wallet_address: &str) -> ServiceResult<UserId>;

    /// Apply a partial update to an account.
    async fn update_user(
        &self,
        wallet_address: &str,
        changes: UserChanges,
    ) -> ServiceResult<User>;

    /// Fetch the avatar of an account; unknown wallets have no avatar.
    async fn get_user_avatar(&self, wallet_address: &str) -> ServiceResult<Avatar>;

    /// Search accounts by free text.
    async fn search_users(&self, query: &str) -> ServiceResult<Vec<User>>;

    /// Return a random sample of accounts.
    async fn random_users(&self, limit: u32) -> ServiceResult<Vec<User>>;
}
