//! Votes cast by users on hashed content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Subject name used in failures raised by vote operations.
pub const VOTE_SUBJECT: &str = "Vote";

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
        }
    }

    /// Parse the storage representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "upvote" => Some(Self::Upvote),
            "downvote" => Some(Self::Downvote),
            _ => None,
        }
    }
}

/// A single user's vote on a piece of content.
///
/// ## Invariants
/// - At most one vote exists per `(wallet_address, hash)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: Uuid,
    pub wallet_address: String,
    pub hash: String,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    /// Create a fresh vote.
    pub fn cast(
        wallet_address: impl Into<String>,
        hash: impl Into<String>,
        vote_type: VoteType,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            wallet_address: wallet_address.into(),
            hash: hash.into(),
            vote_type,
            created_at: now,
            updated_at: now,
        }
    }
}

/// What [`handle_vote`](crate::domain::ports::VoteLedger::handle_vote) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoteAction {
    /// No prior vote existed; a new one was recorded.
    Cast,
    /// A prior vote of the other type was flipped.
    Switched,
    /// A prior vote of the same type was removed.
    Withdrawn,
}

/// Aggregated votes for one content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteSummary {
    pub hash: String,
    pub upvotes: u64,
    pub downvotes: u64,
    pub score: i64,
}

impl VoteSummary {
    /// Tally a list of votes for `hash`.
    pub fn tally(hash: impl Into<String>, votes: &[Vote]) -> Self {
        let (upvotes, downvotes) =
            votes
                .iter()
                .fold((0_u64, 0_u64), |(up, down), vote| match vote.vote_type {
                    VoteType::Upvote => (up + 1, down),
                    VoteType::Downvote => (up, down + 1),
                });
        let score = i64::try_from(upvotes)
            .unwrap_or(i64::MAX)
            .saturating_sub(i64::try_from(downvotes).unwrap_or(i64::MAX));
        Self {
            hash: hash.into(),
            upvotes,
            downvotes,
            score,
        }
    }
}
