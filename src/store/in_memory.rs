use super::*;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Store keeping all entities in two hash maps
///
/// Each map has its own lock, held only for the lookup or insert.
/// Bid placement never touches these locks for writing.
#[derive(Default)]
pub struct InMemoryBiddingStore {
    items: RwLock<HashMap<ItemId, SharedItem>>,
    users: RwLock<HashMap<UserId, SharedUser>>,
}

impl InMemoryBiddingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_shared() -> SharedBiddingStore {
        Arc::new(Self::new())
    }
}

impl BiddingStore for InMemoryBiddingStore {
    fn all_items(&self) -> Vec<SharedItem> {
        self.items.read().values().cloned().collect()
    }

    fn create_item(&self, mut item: Item) -> SharedItem {
        item.meta.ensure_identity();
        let item = Arc::new(item);

        if self
            .items
            .write()
            .insert(item.id(), item.clone())
            .is_some()
        {
            warn!(item_id = ?item.id(), "item re-registered, previous one replaced");
        }
        debug!(
            item_id = ?item.id(),
            name = %item.name,
            created_at = %item.created_at(),
            "item created"
        );
        item
    }

    fn get_item(&self, id: ItemId) -> Result<SharedItem, StoreError> {
        self.items
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::ItemNotFound(id))
    }

    fn all_users(&self) -> Vec<SharedUser> {
        self.users.read().values().cloned().collect()
    }

    fn create_user(&self, mut user: User) -> SharedUser {
        user.meta.ensure_identity();
        let user = Arc::new(user);

        if self
            .users
            .write()
            .insert(user.id(), user.clone())
            .is_some()
        {
            warn!(user_id = ?user.id(), "user re-registered, previous one replaced");
        }
        debug!(
            user_id = ?user.id(),
            name = %user.name,
            created_at = %user.created_at(),
            "user created"
        );
        user
    }

    fn get_user(&self, id: UserId) -> Result<SharedUser, StoreError> {
        self.users
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::UserNotFound(id))
    }

    fn all_bids(&self) -> Vec<SharedBid> {
        // clone the item handles first so no item lock is taken under the map lock
        let items = self.all_items();
        items.iter().flat_map(|item| item.bids()).collect()
    }

    fn item_count(&self) -> usize {
        self.items.read().len()
    }

    fn user_count(&self) -> usize {
        self.users.read().len()
    }

    fn place_bid(&self, mut bid: Bid) -> Result<SharedBid, StoreError> {
        bid.ensure_identity();

        let item = self.get_item(bid.item_id)?;
        let user = self.get_user(bid.user_id)?;

        let bid = Arc::new(bid);
        item.place_new_bid(bid.clone());
        // a concurrent reader may see the bid on the item but not yet on the user
        user.place_new_bid_on_item(bid.clone(), &item);

        debug!(
            bid_id = ?bid.id(),
            item_id = ?bid.item_id,
            user_id = ?bid.user_id,
            amount = bid.amount,
            created_at = %bid.created_at(),
            bids_on_item = item.bid_count(),
            "bid placed"
        );
        Ok(bid)
    }

    fn reset(&self) {
        let mut items = self.items.write();
        let mut users = self.users.write();
        *items = HashMap::new();
        *users = HashMap::new();
        debug!("store reset");
    }
}
