//! Domain primitives, ports, and services.
//!
//! Purpose: Define the user and vote aggregates, the [`Failure`] taxonomy
//! every operation reports through, and the services implementing the
//! driving ports. Nothing in this module knows about HTTP or SQL.
//!
//! Public surface:
//! - [`ServiceResult`] / [`Failure`]: outcome of every domain operation.
//! - [`User`], [`NewUser`], [`UserChanges`], [`Avatar`]: account model.
//! - [`Vote`], [`VoteType`], [`VoteAction`], [`VoteSummary`]: vote model.
//! - [`UserAccountService`], [`VoteLedgerService`]: port implementations.

pub(crate) mod macros;

pub mod failure;
pub mod ports;
pub mod user;
pub mod user_accounts_service;
pub mod vote;
pub mod vote_ledger_service;

pub use self::failure::{
    Failure, ServiceResult, require_found, require_identifier, storage_boundary,
};
pub use self::user::{Avatar, NewUser, USER_SUBJECT, User, UserChanges, UserId};
pub use self::user_accounts_service::UserAccountService;
pub use self::vote::{VOTE_SUBJECT, Vote, VoteAction, VoteSummary, VoteType};
pub use self::vote_ledger_service::VoteLedgerService;
