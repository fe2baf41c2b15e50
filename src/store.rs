//! Bidding store
//!
//! The registry of all items and users, and the only place that sees
//! both sides of a bid. Backends implement [`BiddingStore`]; the only
//! one so far keeps everything in memory.
//!
//! Placing a bid updates the item and then the user as two separate
//! steps, each atomic on its own entity. There is no store-wide lock,
//! so a reader may briefly see a bid in an item's history before the
//! bidder's items index lists that item.
mod in_memory;

pub use self::in_memory::*;

use crate::entity::{Bid, Item, ItemId, SharedBid, SharedItem, SharedUser, User, UserId};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    #[error("no valid bids on item {0}")]
    NoValidBids(ItemId),
}

impl StoreError {
    /// Every store failure is a lookup that came back empty
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::ItemNotFound(_) | StoreError::UserNotFound(_) | StoreError::NoValidBids(_)
        )
    }
}

pub trait BiddingStore {
    fn all_items(&self) -> Vec<SharedItem>;
    /// Register an item, giving it an id and creation time if it has no id
    fn create_item(&self, item: Item) -> SharedItem;
    fn get_item(&self, id: ItemId) -> Result<SharedItem, StoreError>;

    fn all_users(&self) -> Vec<SharedUser>;
    /// Register a user, giving it an id and creation time if it has no id
    fn create_user(&self, user: User) -> SharedUser;
    fn get_user(&self, id: UserId) -> Result<SharedUser, StoreError>;

    /// Every bid on every item
    ///
    /// Bids of one item come in arrival order, but items come in no
    /// particular order.
    fn all_bids(&self) -> Vec<SharedBid>;

    fn item_count(&self) -> usize {
        self.all_items().len()
    }

    fn user_count(&self) -> usize {
        self.all_users().len()
    }

    /// Record `bid` on its item and its user
    ///
    /// Both the item and the user are resolved before anything is
    /// mutated, so a failed placement leaves the store unchanged.
    fn place_bid(&self, bid: Bid) -> Result<SharedBid, StoreError>;

    /// Drop every item and user
    ///
    /// Not meant to race with other operations.
    fn reset(&self);

    fn get_user_bids(&self, user_id: UserId) -> Result<Vec<SharedBid>, StoreError> {
        Ok(self.get_user(user_id)?.bids())
    }

    fn get_bids_on_item(&self, item_id: ItemId) -> Result<Vec<SharedBid>, StoreError> {
        Ok(self.get_item(item_id)?.bids())
    }

    fn get_items_user_has_bid(&self, user_id: UserId) -> Result<Vec<SharedItem>, StoreError> {
        Ok(self.get_user(user_id)?.items_bid())
    }

    fn get_winning_bid(&self, item_id: ItemId) -> Result<SharedBid, StoreError> {
        self.get_item(item_id)?
            .winning_bid()
            .ok_or(StoreError::NoValidBids(item_id))
    }
}

pub type SharedBiddingStore = Arc<dyn BiddingStore + Send + Sync + 'static>;
