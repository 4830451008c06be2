//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use backend::domain::ports::{UserAccounts, UserRepository, VoteLedger, VoteRepository};
use backend::domain::{UserAccountService, VoteLedgerService};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{InMemoryUserRepository, InMemoryVoteRepository};
use backend::outbound::persistence::{DbPool, DieselUserRepository, DieselVoteRepository};
use tracing::info;

/// Wire both services over one pair of repositories.
fn services_over<U, V>(users: Arc<U>, votes: Arc<V>) -> HttpState
where
    U: UserRepository + 'static,
    V: VoteRepository + 'static,
{
    let accounts: Arc<dyn UserAccounts> = Arc::new(UserAccountService::new(Arc::clone(&users)));
    let ledger: Arc<dyn VoteLedger> = Arc::new(VoteLedgerService::new(votes, users));
    HttpState::new(accounts, ledger)
}

/// Build the HTTP state, using PostgreSQL when a pool is available.
pub(crate) fn build_http_state(db_pool: Option<&DbPool>) -> HttpState {
    match db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            services_over(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselVoteRepository::new(pool.clone())),
            )
        }
        None => {
            info!("no database configured; using in-memory repositories");
            services_over(
                Arc::new(InMemoryUserRepository::default()),
                Arc::new(InMemoryVoteRepository::default()),
            )
        }
    }
}
