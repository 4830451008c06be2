//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{users, votes};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub wallet_address: String,
    pub username: String,
    pub bio: String,
    pub role: String,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub wallet_address: &'a str,
    pub username: &'a str,
    pub bio: &'a str,
    pub role: &'a str,
    pub profile_picture: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for partial profile updates; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub username: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub role: Option<&'a str>,
    pub profile_picture: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the votes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VoteRow {
    pub id: Uuid,
    pub wallet_address: String,
    pub hash: String,
    pub vote_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for recording a vote.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = votes)]
pub(crate) struct NewVoteRow<'a> {
    pub id: Uuid,
    pub wallet_address: &'a str,
    pub hash: &'a str,
    pub vote_type: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
