//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound persistence
//! adapters; driving ports ([`UserAccounts`], [`VoteLedger`]) are implemented
//! by domain services and consumed by inbound adapters.

mod user_accounts;
mod user_repository;
mod vote_ledger;
mod vote_repository;

#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::{DEFAULT_RANDOM_USERS, MAX_RANDOM_USERS, UserAccounts};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use vote_ledger::MockVoteLedger;
pub use vote_ledger::VoteLedger;
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::{VotePersistenceError, VoteRepository};
