//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UserAccounts, VoteLedger};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserAccounts>,
    pub votes: Arc<dyn VoteLedger>,
}

impl HttpState {
    /// Construct state from the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{UserAccountService, VoteLedgerService};
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::{InMemoryUserRepository, InMemoryVoteRepository};
    ///
    /// let users = Arc::new(InMemoryUserRepository::default());
    /// let votes = Arc::new(InMemoryVoteRepository::default());
    /// let state = HttpState::new(
    ///     Arc::new(UserAccountService::new(users.clone())),
    ///     Arc::new(VoteLedgerService::new(votes, users)),
    /// );
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UserAccounts>, votes: Arc<dyn VoteLedger>) -> Self {
        Self { users, votes }
    }
}
