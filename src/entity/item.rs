use super::*;
use parking_lot::RwLock;
use std::sync::Arc;

pub type SharedItem = Arc<Item>;

/// Cached winner of an item
#[derive(Clone, Debug, Default)]
struct BestBid {
    max_amount: Amount,
    winning_bid: Option<SharedBid>,
}

impl BestBid {
    /// Strictly greater only: on equal amounts the earlier bid keeps
    /// winning. The very first bid always wins, whatever its amount.
    fn is_outbidded_by(&self, amount: Amount) -> bool {
        self.winning_bid
            .as_ref()
            .map(|_| self.max_amount < amount)
            .unwrap_or(true)
    }
}

/// An auctioned item
///
/// The bid list and the winner cache are guarded by separate locks
/// and no method ever holds both at once.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(flatten)]
    pub meta: Meta,
    #[serde(default)]
    pub name: String,

    #[serde(skip)]
    bids: RwLock<Vec<SharedBid>>,
    #[serde(skip)]
    best_bid: RwLock<BestBid>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: Meta::new(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> ItemId {
        self.meta.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.meta.created_at
    }

    /// Record a bid that was already checked to target this item
    ///
    /// The bid becomes visible in the history before it can become
    /// the cached winner.
    pub fn place_new_bid(&self, bid: SharedBid) {
        self.bids.write().push(bid.clone());
        self.update_best_bid(&bid);
    }

    /// Snapshot of the bid history, in arrival order
    pub fn bids(&self) -> Vec<SharedBid> {
        self.bids.read().clone()
    }

    pub fn bid_count(&self) -> usize {
        self.bids.read().len()
    }

    pub fn update_best_bid(&self, bid: &SharedBid) {
        let mut best = self.best_bid.write();
        if best.is_outbidded_by(bid.amount) {
            best.max_amount = bid.amount;
            best.winning_bid = Some(bid.clone());
        }
    }

    /// `None` until the first bid lands
    pub fn winning_bid(&self) -> Option<SharedBid> {
        self.best_bid.read().winning_bid.clone()
    }
}
