//! Vote domain service.
//!
//! Votes toggle: casting the same direction twice withdraws the vote, casting
//! the other direction switches it. Only registered wallets may vote.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::ports::{UserRepository, VoteLedger, VoteRepository};
use crate::domain::{
    ServiceResult, USER_SUBJECT, VOTE_SUBJECT, Vote, VoteAction, VoteSummary, VoteType,
    require_found, require_identifier, storage_boundary,
};

const RECORD_VOTE_FAILED: &str = "Failed to record vote.";
const VOTES_BY_HASH_FAILED: &str = "Failed to fetch votes by hash.";
const VOTES_BY_WALLET_FAILED: &str = "Failed to fetch votes by wallet address.";

/// Vote service backed by vote and user repositories.
#[derive(Clone)]
pub struct VoteLedgerService<V, U> {
    votes: Arc<V>,
    users: Arc<U>,
}

impl<V, U> VoteLedgerService<V, U> {
    /// Create a new service with the given repositories.
    pub fn new(votes: Arc<V>, users: Arc<U>) -> Self {
        Self { votes, users }
    }
}

impl<V, U> VoteLedgerService<V, U>
where
    V: VoteRepository,
    U: UserRepository,
{
    async fn require_voter(&self, wallet_address: &str) -> ServiceResult<()> {
        let voter = storage_boundary(
            self.users.find_by_wallet_address(wallet_address).await,
            "handle_vote",
            RECORD_VOTE_FAILED,
        )?;
        require_found(voter, USER_SUBJECT, wallet_address).map(drop)
    }

    async fn apply_vote(
        &self,
        wallet_address: &str,
        vote_type: VoteType,
        hash: &str,
    ) -> ServiceResult<VoteAction> {
        let existing = storage_boundary(
            self.votes.find(wallet_address, hash).await,
            "handle_vote",
            RECORD_VOTE_FAILED,
        )?;

        let (outcome, action) = match existing {
            None => {
                let vote = Vote::cast(wallet_address, hash, vote_type, Utc::now());
                (self.votes.insert(&vote).await, VoteAction::Cast)
            }
            Some(vote) if vote.vote_type == vote_type => {
                (self.votes.delete(vote.id).await, VoteAction::Withdrawn)
            }
            Some(vote) => (
                self.votes.change_type(vote.id, vote_type).await,
                VoteAction::Switched,
            ),
        };
        storage_boundary(outcome, "handle_vote", RECORD_VOTE_FAILED)?;
        Ok(action)
    }
}

#[async_trait]
impl<V, U> VoteLedger for VoteLedgerService<V, U>
where
    V: VoteRepository,
    U: UserRepository,
{
    async fn handle_vote(
        &self,
        wallet_address: &str,
        vote_type: VoteType,
        hash: &str,
    ) -> ServiceResult<VoteAction> {
        let wallet_address = require_identifier(VOTE_SUBJECT, wallet_address)?;
        let hash = require_identifier(VOTE_SUBJECT, hash)?;
        self.require_voter(wallet_address).await?;

        let action = self.apply_vote(wallet_address, vote_type, hash).await?;
        debug!(?action, vote_type = vote_type.as_str(), hash, "vote handled");
        Ok(action)
    }

    async fn get_votes_by_hash(&self, hash: &str) -> ServiceResult<Vec<Vote>> {
        let hash = require_identifier(VOTE_SUBJECT, hash)?;
        storage_boundary(
            self.votes.list_by_hash(hash).await,
            "get_votes_by_hash",
            VOTES_BY_HASH_FAILED,
        )
    }

    async fn get_votes_by_wallet_address(&self, wallet_address: &str) -> ServiceResult<Vec<Vote>> {
        let wallet_address = require_identifier(VOTE_SUBJECT, wallet_address)?;
        storage_boundary(
            self.votes.list_by_wallet_address(wallet_address).await,
            "get_votes_by_wallet_address",
            VOTES_BY_WALLET_FAILED,
        )
    }

    async fn get_vote_summary(&self, hash: &str) -> ServiceResult<VoteSummary> {
        let votes = self.get_votes_by_hash(hash).await?;
        Ok(VoteSummary::tally(hash, &votes))
    }
}
