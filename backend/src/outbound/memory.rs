//! In-memory repositories.
//!
//! Used when no database URL is configured and by integration tests. State
//! lives behind `std::sync::RwLock`; a poisoned lock surfaces as a query
//! error rather than a panic.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::domain::ports::{
    UserPersistenceError, UserRepository, VotePersistenceError, VoteRepository,
};
use crate::domain::{User, UserChanges, Vote, VoteType};

const POISONED: &str = "in-memory store lock poisoned";

/// User store keyed by wallet address.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    fn snapshot(&self) -> Result<Vec<User>, UserPersistenceError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        let mut listed: Vec<User> = users.values().cloned().collect();
        listed.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(listed)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        if users.contains_key(&user.wallet_address) {
            return Err(UserPersistenceError::query(format!(
                "wallet address {} is already registered",
                user.wallet_address
            )));
        }
        users.insert(user.wallet_address.clone(), user.clone());
        Ok(())
    }

    async fn find_by_wallet_address(
        &self,
        wallet_address: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        Ok(users.get(wallet_address).cloned())
    }

    async fn update_by_wallet_address(
        &self,
        wallet_address: &str,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        Ok(users.get_mut(wallet_address).map(|user| {
            user.apply(changes, Utc::now());
            user.clone()
        }))
    }

    async fn search(&self, query: &str) -> Result<Vec<User>, UserPersistenceError> {
        let needle = query.to_lowercase();
        let mut matches = self.snapshot()?;
        matches.retain(|user| user.matches(&needle));
        Ok(matches)
    }

    async fn sample(&self, limit: u32) -> Result<Vec<User>, UserPersistenceError> {
        let mut users = self.snapshot()?;
        users.shuffle(&mut rand::thread_rng());
        users.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(users)
    }
}

/// Vote store; insertion order is the listing order.
#[derive(Debug, Default)]
pub struct InMemoryVoteRepository {
    votes: RwLock<Vec<Vote>>,
}

impl InMemoryVoteRepository {
    fn list_where(
        &self,
        keep: impl Fn(&Vote) -> bool,
    ) -> Result<Vec<Vote>, VotePersistenceError> {
        let votes = self
            .votes
            .read()
            .map_err(|_| VotePersistenceError::query(POISONED))?;
        Ok(votes.iter().filter(|vote| keep(vote)).cloned().collect())
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteRepository {
    async fn find(
        &self,
        wallet_address: &str,
        hash: &str,
    ) -> Result<Option<Vote>, VotePersistenceError> {
        let votes = self
            .votes
            .read()
            .map_err(|_| VotePersistenceError::query(POISONED))?;
        Ok(votes
            .iter()
            .find(|vote| vote.wallet_address == wallet_address && vote.hash == hash)
            .cloned())
    }

    async fn insert(&self, vote: &Vote) -> Result<(), VotePersistenceError> {
        let mut votes = self
            .votes
            .write()
            .map_err(|_| VotePersistenceError::query(POISONED))?;
        if votes
            .iter()
            .any(|existing| existing.wallet_address == vote.wallet_address && existing.hash == vote.hash)
        {
            return Err(VotePersistenceError::query(format!(
                "{} already voted on {}",
                vote.wallet_address, vote.hash
            )));
        }
        votes.push(vote.clone());
        Ok(())
    }

    async fn change_type(&self, id: Uuid, vote_type: VoteType) -> Result<(), VotePersistenceError> {
        let mut votes = self
            .votes
            .write()
            .map_err(|_| VotePersistenceError::query(POISONED))?;
        let vote = votes
            .iter_mut()
            .find(|vote| vote.id == id)
            .ok_or_else(|| VotePersistenceError::query(format!("vote {id} does not exist")))?;
        vote.vote_type = vote_type;
        vote.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), VotePersistenceError> {
        let mut votes = self
            .votes
            .write()
            .map_err(|_| VotePersistenceError::query(POISONED))?;
        votes.retain(|vote| vote.id != id);
        Ok(())
    }

    async fn list_by_hash(&self, hash: &str) -> Result<Vec<Vote>, VotePersistenceError> {
        self.list_where(|vote| vote.hash == hash)
    }

    async fn list_by_wallet_address(
        &self,
        wallet_address: &str,
    ) -> Result<Vec<Vote>, VotePersistenceError> {
        self.list_where(|vote| vote.wallet_address == wallet_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewUser;
    use rstest::{fixture, rstest};

    fn user(wallet: &str, username: &str) -> User {
        let mut new_user = NewUser::with_wallet(wallet);
        new_user.username = username.to_owned();
        User::register(new_user, Utc::now())
    }

    #[fixture]
    fn users() -> InMemoryUserRepository {
        InMemoryUserRepository::default()
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_wallets_are_rejected(users: InMemoryUserRepository) {
        users.insert(&user("0xA", "ada")).await.expect("first insert");

        let second = users.insert(&user("0xA", "grace")).await;

        assert!(matches!(second, Err(UserPersistenceError::Query { .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_wallet_is_none(users: InMemoryUserRepository) {
        let updated = users
            .update_by_wallet_address("0xNOPE", &UserChanges::default())
            .await
            .expect("update runs");
        assert_eq!(updated, None);
    }

    #[rstest]
    #[tokio::test]
    async fn search_ignores_case(users: InMemoryUserRepository) {
        users.insert(&user("0xA", "Ada")).await.expect("insert");
        users.insert(&user("0xB", "Grace")).await.expect("insert");

        let found = users.search("ADA").await.expect("search");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].wallet_address, "0xA");
    }

    #[rstest]
    #[tokio::test]
    async fn sample_never_exceeds_limit(users: InMemoryUserRepository) {
        for n in 0..5 {
            users
                .insert(&user(&format!("0x{n}"), "u"))
                .await
                .expect("insert");
        }

        assert_eq!(users.sample(3).await.expect("sample").len(), 3);
        assert_eq!(users.sample(10).await.expect("sample").len(), 5);
    }

    #[rstest]
    #[tokio::test]
    async fn votes_are_unique_per_wallet_and_hash() {
        let votes = InMemoryVoteRepository::default();
        let now = Utc::now();
        votes
            .insert(&Vote::cast("0xA", "h1", VoteType::Upvote, now))
            .await
            .expect("first vote");

        let again = votes
            .insert(&Vote::cast("0xA", "h1", VoteType::Downvote, now))
            .await;

        assert!(again.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn change_type_and_delete_act_on_the_identified_vote() {
        let votes = InMemoryVoteRepository::default();
        let vote = Vote::cast("0xA", "h1", VoteType::Upvote, Utc::now());
        votes.insert(&vote).await.expect("insert");

        votes
            .change_type(vote.id, VoteType::Downvote)
            .await
            .expect("switch");
        let switched = votes.find("0xA", "h1").await.expect("find");
        assert_eq!(switched.map(|v| v.vote_type), Some(VoteType::Downvote));

        votes.delete(vote.id).await.expect("delete");
        assert_eq!(votes.list_by_hash("h1").await.expect("list"), Vec::new());
    }
}
