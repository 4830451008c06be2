//! Behavioural tests for the service result pipeline over real adapters.
//!
//! Services run against the in-memory repositories, or against a repository
//! double that always fails and counts how often it was reached.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use backend::domain::ports::{UserAccounts, UserPersistenceError, UserRepository, VoteLedger};
use backend::domain::{
    Failure, NewUser, User, UserAccountService, UserChanges, VoteAction, VoteLedgerService,
    VoteType,
};
use backend::outbound::memory::{InMemoryUserRepository, InMemoryVoteRepository};
use rstest::{fixture, rstest};

const WALLET: &str = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
const HASH: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

/// User store that refuses every call with a detailed driver error.
#[derive(Default)]
struct BrokenUserRepository {
    calls: AtomicUsize,
}

impl BrokenUserRepository {
    fn refuse<T>(&self) -> Result<T, UserPersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(UserPersistenceError::connection(
            "connection refused (os error 111) at db.internal:5432",
        ))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for BrokenUserRepository {
    async fn insert(&self, _user: &User) -> Result<(), UserPersistenceError> {
        self.refuse()
    }

    async fn find_by_wallet_address(
        &self,
        _wallet_address: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.refuse()
    }

    async fn update_by_wallet_address(
        &self,
        _wallet_address: &str,
        _changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.refuse()
    }

    async fn search(&self, _query: &str) -> Result<Vec<User>, UserPersistenceError> {
        self.refuse()
    }

    async fn sample(&self, _limit: u32) -> Result<Vec<User>, UserPersistenceError> {
        self.refuse()
    }
}

struct Services {
    users: Arc<dyn UserAccounts>,
    votes: Arc<dyn VoteLedger>,
}

#[fixture]
fn services() -> Services {
    let user_store = Arc::new(InMemoryUserRepository::default());
    let vote_store = Arc::new(InMemoryVoteRepository::default());
    Services {
        users: Arc::new(UserAccountService::new(Arc::clone(&user_store))),
        votes: Arc::new(VoteLedgerService::new(vote_store, user_store)),
    }
}

async fn register(users: &dyn UserAccounts, wallet: &str) -> User {
    users
        .create_user(NewUser::with_wallet(wallet))
        .await
        .expect("registration succeeds")
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn blank_wallets_never_reach_storage(#[case] wallet: &str) {
    let repository = Arc::new(BrokenUserRepository::default());
    let users = UserAccountService::new(Arc::clone(&repository));

    let login = users.login_user(wallet).await;
    let fetch = users.get_user_by_wallet_address(wallet).await;
    let avatar = users.get_user_avatar(wallet).await;

    assert_eq!(login, Err(Failure::validation("User", wallet)));
    assert_eq!(fetch, Err(Failure::validation("User", wallet)));
    assert_eq!(avatar, Err(Failure::validation("User", wallet)));
    assert_eq!(repository.calls(), 0);
}

#[rstest]
#[tokio::test]
async fn storage_detail_is_hidden_behind_a_fixed_message() {
    let repository = Arc::new(BrokenUserRepository::default());
    let users = UserAccountService::new(Arc::clone(&repository));

    let failure = users
        .get_user_by_wallet_address(WALLET)
        .await
        .expect_err("storage is down");

    assert_eq!(
        failure,
        Failure::database("Failed to fetch user by wallet address.")
    );
    assert!(!failure.to_string().contains("os error"));
    assert_eq!(repository.calls(), 1);
}

#[rstest]
#[tokio::test]
async fn missing_accounts_are_not_found(services: Services) {
    let outcome = services.users.login_user(WALLET).await;

    assert_eq!(outcome, Err(Failure::not_found("User", WALLET)));
    assert_eq!(outcome.clone().ok(), None);
    assert!(outcome.is_err());
}

#[rstest]
#[tokio::test]
async fn registered_accounts_are_found_by_login(services: Services) {
    let created = register(services.users.as_ref(), WALLET).await;

    let logged_in = services.users.login_user(WALLET).await.expect("login");
    let id = services
        .users
        .get_user_id_by_wallet_address(WALLET)
        .await
        .expect("id lookup");

    assert_eq!(logged_in, created);
    assert_eq!(id, created.id);
}

#[rstest]
#[tokio::test]
async fn second_registration_for_a_wallet_is_a_database_failure(services: Services) {
    register(services.users.as_ref(), WALLET).await;

    let again = services
        .users
        .create_user(NewUser::with_wallet(WALLET))
        .await;

    assert_eq!(again, Err(Failure::database("Failed to create new user.")));
}

#[rstest]
#[tokio::test]
async fn avatar_of_unknown_wallet_is_empty(services: Services) {
    let avatar = services
        .users
        .get_user_avatar(WALLET)
        .await
        .expect("lenient lookup");
    assert_eq!(avatar.avatar, None);
}

#[rstest]
#[tokio::test]
async fn empty_listings_are_successes(services: Services) {
    let by_hash = services.votes.get_votes_by_hash(HASH).await;
    let by_wallet = services.votes.get_votes_by_wallet_address(WALLET).await;
    let found = services.users.search_users("nobody").await;

    assert_eq!(by_hash, Ok(Vec::new()));
    assert_eq!(by_wallet, Ok(Vec::new()));
    assert_eq!(found, Ok(Vec::new()));
}

#[rstest]
#[tokio::test]
async fn voting_toggles_per_wallet_and_hash(services: Services) {
    register(services.users.as_ref(), WALLET).await;
    let votes = services.votes.as_ref();

    let first = votes.handle_vote(WALLET, VoteType::Upvote, HASH).await;
    let switched = votes.handle_vote(WALLET, VoteType::Downvote, HASH).await;
    let summary = votes.get_vote_summary(HASH).await.expect("summary");
    let withdrawn = votes.handle_vote(WALLET, VoteType::Downvote, HASH).await;

    assert_eq!(first, Ok(VoteAction::Cast));
    assert_eq!(switched, Ok(VoteAction::Switched));
    assert_eq!((summary.upvotes, summary.downvotes, summary.score), (0, 1, -1));
    assert_eq!(withdrawn, Ok(VoteAction::Withdrawn));
    assert_eq!(votes.get_votes_by_hash(HASH).await, Ok(Vec::new()));
}

#[rstest]
#[tokio::test]
async fn unregistered_wallets_cannot_vote(services: Services) {
    let outcome = services
        .votes
        .handle_vote(WALLET, VoteType::Upvote, HASH)
        .await;

    assert_eq!(outcome, Err(Failure::not_found("User", WALLET)));
    assert_eq!(services.votes.get_votes_by_hash(HASH).await, Ok(Vec::new()));
}

#[rstest]
#[tokio::test]
async fn votes_against_broken_user_storage_are_database_failures() {
    let users = Arc::new(BrokenUserRepository::default());
    let ledger = VoteLedgerService::new(
        Arc::new(InMemoryVoteRepository::default()),
        Arc::clone(&users),
    );

    let outcome = ledger.handle_vote(WALLET, VoteType::Upvote, HASH).await;

    assert_eq!(outcome, Err(Failure::database("Failed to record vote.")));
    assert_eq!(users.calls(), 1);
}

#[rstest]
#[tokio::test]
async fn updates_only_touch_supplied_fields(services: Services) {
    let mut new_user = NewUser::with_wallet(WALLET);
    new_user.username = "ada".to_owned();
    services.users.create_user(new_user).await.expect("create");

    let changes = UserChanges {
        bio: Some("Counts things".to_owned()),
        ..UserChanges::default()
    };
    let updated = services
        .users
        .update_user(WALLET, changes)
        .await
        .expect("update");

    assert_eq!(updated.username, "ada");
    assert_eq!(updated.bio, "Counts things");
}

#[rstest]
#[tokio::test]
async fn repeated_lookups_agree(services: Services) {
    register(services.users.as_ref(), WALLET).await;

    let first = services.users.get_user_by_wallet_address(WALLET).await;
    let second = services.users.get_user_by_wallet_address(WALLET).await;
    let missing_once = services.users.get_user_by_wallet_address("0xNOPE").await;
    let missing_twice = services.users.get_user_by_wallet_address("0xNOPE").await;

    assert!(first.is_ok());
    assert_eq!(first, second);
    assert_eq!(missing_once, missing_twice);
}

#[rstest]
#[tokio::test]
async fn failed_updates_report_a_fixed_message() {
    let repository = Arc::new(BrokenUserRepository::default());
    let users = UserAccountService::new(Arc::clone(&repository));

    let outcome = users.update_user(WALLET, UserChanges::default()).await;

    assert_eq!(outcome, Err(Failure::database("Failed to update user.")));
    assert_eq!(repository.calls(), 1);
}
