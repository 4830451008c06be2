//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts, one per wallet address.
    users (id) {
        id -> Uuid,
        wallet_address -> Text,
        username -> Text,
        bio -> Text,
        role -> Text,
        profile_picture -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Votes on content hashes; unique per `(wallet_address, hash)`.
    votes (id) {
        id -> Uuid,
        wallet_address -> Text,
        hash -> Text,
        /// `upvote` or `downvote`.
        vote_type -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, votes);
