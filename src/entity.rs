//! Auction entities
//!
//! `Item`s and `User`s own their derived indexes (bid history, winner
//! cache, distinct items bid on) and guard them with their own locks,
//! so unrelated entities never contend with each other.
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

mod bid;
mod item;
mod user;

pub use self::{bid::*, item::*, user::*};

pub type EntityId = Uuid;
pub type ItemId = EntityId;
pub type UserId = EntityId;
pub type BidId = EntityId;
pub type Amount = f64;
pub type Timestamp = OffsetDateTime;

/// Creation time of an entity that was never stamped
///
/// Anything at or before it also counts as unset, so JSON carrying
/// `0001-01-01T00:00:00Z` gets stamped like a missing `createdAt`.
pub const ZERO_TIMESTAMP: Timestamp = OffsetDateTime::UNIX_EPOCH;

fn zero_timestamp() -> Timestamp {
    ZERO_TIMESTAMP
}

/// Identity and creation time shared by every entity
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub id: EntityId,
    #[serde(
        rename = "createdAt",
        with = "time::serde::rfc3339",
        default = "zero_timestamp"
    )]
    pub created_at: Timestamp,
}

impl Meta {
    /// Fresh random identity stamped with the current time
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_nil()
    }

    pub fn has_created_at(&self) -> bool {
        self.created_at > ZERO_TIMESTAMP
    }

    /// Registration rule for items and users: an entity without an id
    /// gets both a new id and a new creation time. An entity that
    /// already has an id is left untouched.
    pub fn ensure_identity(&mut self) {
        if !self.has_id() {
            *self = Self::new();
        }
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            created_at: ZERO_TIMESTAMP,
        }
    }
}
