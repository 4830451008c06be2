//! PostgreSQL-backed `VoteRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{VotePersistenceError, VoteRepository};
use crate::domain::{Vote, VoteType};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewVoteRow, VoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::votes;

/// Diesel-backed implementation of the `VoteRepository` port.
#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> VotePersistenceError {
    map_pool_error(error, VotePersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> VotePersistenceError {
    map_diesel_error(
        error,
        VotePersistenceError::query,
        VotePersistenceError::connection,
    )
}

fn row_to_vote(row: VoteRow) -> Result<Vote, VotePersistenceError> {
    let vote_type = VoteType::parse(&row.vote_type).ok_or_else(|| {
        VotePersistenceError::query(format!(
            "vote {} has unrecognised type '{}'",
            row.id, row.vote_type
        ))
    })?;
    Ok(Vote {
        id: row.id,
        wallet_address: row.wallet_address,
        hash: row.hash,
        vote_type,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_votes(rows: Vec<VoteRow>) -> Result<Vec<Vote>, VotePersistenceError> {
    rows.into_iter().map(row_to_vote).collect()
}

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn find(
        &self,
        wallet_address: &str,
        hash: &str,
    ) -> Result<Option<Vote>, VotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<VoteRow> = votes::table
            .filter(votes::wallet_address.eq(wallet_address))
            .filter(votes::hash.eq(hash))
            .select(VoteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_vote).transpose()
    }

    async fn insert(&self, vote: &Vote) -> Result<(), VotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewVoteRow {
            id: vote.id,
            wallet_address: &vote.wallet_address,
            hash: &vote.hash,
            vote_type: vote.vote_type.as_str(),
            created_at: vote.created_at,
            updated_at: vote.updated_at,
        };
        diesel::insert_into(votes::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(drop)
            .map_err(diesel_error)
    }

    async fn change_type(&self, id: Uuid, vote_type: VoteType) -> Result<(), VotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(votes::table.find(id))
            .set((
                votes::vote_type.eq(vote_type.as_str()),
                votes::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(VotePersistenceError::query(format!("vote {id} does not exist")));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), VotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::delete(votes::table.find(id))
            .execute(&mut conn)
            .await
            .map(drop)
            .map_err(diesel_error)
    }

    async fn list_by_hash(&self, hash: &str) -> Result<Vec<Vote>, VotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<VoteRow> = votes::table
            .filter(votes::hash.eq(hash))
            .order(votes::created_at.asc())
            .select(VoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_votes(rows)
    }

    async fn list_by_wallet_address(
        &self,
        wallet_address: &str,
    ) -> Result<Vec<Vote>, VotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<VoteRow> = votes::table
            .filter(votes::wallet_address.eq(wallet_address))
            .order(votes::created_at.asc())
            .select(VoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_votes(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(vote_type: &str) -> VoteRow {
        let now = Utc::now();
        VoteRow {
            id: Uuid::nil(),
            wallet_address: "0xA".to_owned(),
            hash: "h1".to_owned(),
            vote_type: vote_type.to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn stored_types_map_back_to_domain() {
        let vote = row_to_vote(row("downvote")).expect("known type");
        assert_eq!(vote.vote_type, VoteType::Downvote);
    }

    #[rstest]
    fn unknown_stored_types_are_query_errors() {
        let err = row_to_vote(row("sidevote")).expect_err("unknown type");
        assert!(matches!(err, VotePersistenceError::Query { .. }));
    }
}
