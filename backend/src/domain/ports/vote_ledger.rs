//! Driving port for vote use cases.

use async_trait::async_trait;

use crate::domain::{ServiceResult, Vote, VoteAction, VoteSummary, VoteType};

/// Vote use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteLedger: Send + Sync {
    /// Cast, switch, or withdraw the caller's vote on `hash`.
    async fn handle_vote(
        &self,
        wallet_address: &str,
        vote_type: VoteType,
        hash: &str,
    ) -> ServiceResult<VoteAction>;

    /// Every vote cast on `hash`.
    async fn get_votes_by_hash(&self, hash: &str) -> ServiceResult<Vec<Vote>>;

    /// Every vote cast by `wallet_address`.
    async fn get_votes_by_wallet_address(&self, wallet_address: &str) -> ServiceResult<Vec<Vote>>;

    /// Up/down totals for `hash`.
    async fn get_vote_summary(&self, hash: &str) -> ServiceResult<VoteSummary>;
}
