//! User account model.
//!
//! A user is identified externally by the wallet address they connect with;
//! the address is treated as an opaque string. Internally each account also
//! carries a UUID assigned on creation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Subject name used in failures raised by user operations.
pub const USER_SUBJECT: &str = "User";

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    #[schema(example = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F")]
    pub wallet_address: String,
    #[schema(example = "ada")]
    pub username: String,
    pub bio: String,
    #[schema(example = "student")]
    pub role: String,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Materialise a new account from creation input.
    pub fn register(new_user: NewUser, now: DateTime<Utc>) -> Self {
        let NewUser {
            wallet_address,
            username,
            bio,
            role,
            profile_picture,
        } = new_user;
        Self {
            id: UserId::random(),
            wallet_address,
            username,
            bio,
            role,
            profile_picture,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, changes: &UserChanges, now: DateTime<Utc>) {
        if changes.is_empty() {
            return;
        }
        if let Some(username) = &changes.username {
            self.username.clone_from(username);
        }
        if let Some(bio) = &changes.bio {
            self.bio.clone_from(bio);
        }
        if let Some(role) = &changes.role {
            self.role.clone_from(role);
        }
        if let Some(picture) = &changes.profile_picture {
            self.profile_picture = Some(picture.clone());
        }
        self.updated_at = now;
    }

    /// Whether any searchable field contains `needle` (already lowercased).
    pub fn matches(&self, needle: &str) -> bool {
        [
            self.username.as_str(),
            self.bio.as_str(),
            self.wallet_address.as_str(),
            self.role.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Input for account creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    pub wallet_address: String,
    pub username: String,
    pub bio: String,
    pub role: String,
    pub profile_picture: Option<String>,
}

impl NewUser {
    /// Creation input carrying only a wallet address.
    pub fn with_wallet(wallet_address: impl Into<String>) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            ..Self::default()
        }
    }
}

/// Partial update of an account; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
    pub profile_picture: Option<String>,
}

impl UserChanges {
    /// True when the update would not modify any field.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.bio.is_none()
            && self.role.is_none()
            && self.profile_picture.is_none()
    }
}

/// Avatar lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Avatar {
    pub avatar: Option<String>,
}

impl Avatar {
    /// Build from a stored picture, treating blank values as absent.
    pub fn from_picture(picture: Option<&str>) -> Self {
        Self {
            avatar: picture
                .filter(|value| !value.trim().is_empty())
                .map(str::to_owned),
        }
    }
}
