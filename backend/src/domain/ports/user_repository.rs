//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::macros::define_error_enum;
use crate::domain::{User, UserChanges};

define_error_enum! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError: into_message {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage of user accounts keyed by wallet address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a freshly registered account.
    ///
    /// Implementations reject a second account for the same wallet address.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch the account bound to `wallet_address`.
    async fn find_by_wallet_address(
        &self,
        wallet_address: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Apply `changes` to the account bound to `wallet_address`.
    ///
    /// Returns the updated account, or `None` when no account matched.
    async fn update_by_wallet_address(
        &self,
        wallet_address: &str,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Case-insensitive substring search over username, bio, wallet and role.
    async fn search(&self, query: &str) -> Result<Vec<User>, UserPersistenceError>;

    /// Return up to `limit` accounts in random order.
    async fn sample(&self, limit: u32) -> Result<Vec<User>, UserPersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn errors_carry_adapter_detail() {
        let err = UserPersistenceError::query("duplicate key value violates unique constraint");
        assert_eq!(
            err.to_string(),
            "user repository query failed: duplicate key value violates unique constraint"
        );
    }
}
