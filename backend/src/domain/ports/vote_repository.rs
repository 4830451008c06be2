//! Port abstraction for vote persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::macros::define_error_enum;
use crate::domain::{Vote, VoteType};

define_error_enum! {
    /// Persistence errors raised by vote repository adapters.
    pub enum VotePersistenceError: into_message {
        /// Repository connection could not be established.
        Connection { message: String } => "vote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vote repository query failed: {message}",
    }
}

/// Storage of votes, at most one per `(wallet_address, hash)` pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Fetch the vote `wallet_address` holds on `hash`, if any.
    async fn find(
        &self,
        wallet_address: &str,
        hash: &str,
    ) -> Result<Option<Vote>, VotePersistenceError>;

    /// Persist a new vote.
    async fn insert(&self, vote: &Vote) -> Result<(), VotePersistenceError>;

    /// Flip the direction of an existing vote.
    async fn change_type(&self, id: Uuid, vote_type: VoteType)
    -> Result<(), VotePersistenceError>;

    /// Remove a vote.
    async fn delete(&self, id: Uuid) -> Result<(), VotePersistenceError>;

    /// Every vote cast on `hash`, oldest first.
    async fn list_by_hash(&self, hash: &str) -> Result<Vec<Vote>, VotePersistenceError>;

    /// Every vote cast by `wallet_address`, oldest first.
    async fn list_by_wallet_address(
        &self,
        wallet_address: &str,
    ) -> Result<Vec<Vote>, VotePersistenceError>;
}
