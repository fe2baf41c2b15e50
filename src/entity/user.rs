use super::*;
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub type SharedUser = Arc<User>;

/// Distinct items a user has bid on, in first-bid order
#[derive(Debug, Default)]
struct ItemsBid {
    seen: HashSet<ItemId>,
    items: Vec<SharedItem>,
}

impl ItemsBid {
    fn insert(&mut self, item: &SharedItem) -> bool {
        if !self.seen.insert(item.id()) {
            return false;
        }
        self.items.push(item.clone());
        true
    }
}

/// A bidder
///
/// Like `Item`, the bid index and the items index are independent and
/// each sits behind its own lock.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub meta: Meta,
    #[serde(default)]
    pub name: String,

    #[serde(skip)]
    bids: RwLock<HashMap<BidId, SharedBid>>,
    #[serde(skip)]
    items_bid: Mutex<ItemsBid>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: Meta::new(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> UserId {
        self.meta.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.meta.created_at
    }

    /// Register `bid` and remember `item` unless it is already known
    ///
    /// Registering the same bid id twice is a no-op.
    pub fn place_new_bid_on_item(&self, bid: SharedBid, item: &SharedItem) {
        self.bids.write().insert(bid.id(), bid);
        self.items_bid.lock().insert(item);
    }

    /// All bids placed by this user, in no particular order
    pub fn bids(&self) -> Vec<SharedBid> {
        self.bids.read().values().cloned().collect()
    }

    pub fn items_bid(&self) -> Vec<SharedItem> {
        self.items_bid.lock().items.clone()
    }
}
