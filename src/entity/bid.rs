use super::*;
use std::sync::Arc;

/// A bid is immutable once placed; the item and the user both hold
/// the same instance.
pub type SharedBid = Arc<Bid>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    #[serde(flatten)]
    pub meta: Meta,
    #[serde(rename = "itemID", default)]
    pub item_id: ItemId,
    #[serde(rename = "userID", default)]
    pub user_id: UserId,
    #[serde(default)]
    pub amount: Amount,
}

impl Bid {
    pub fn new(item_id: ItemId, user_id: UserId, amount: Amount) -> Self {
        Self {
            meta: Meta::new(),
            item_id,
            user_id,
            amount,
        }
    }

    pub fn id(&self) -> BidId {
        self.meta.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.meta.created_at
    }

    /// All fields at their zero value, which is what an empty or
    /// unrelated JSON object decodes to.
    pub fn is_degenerate(&self) -> bool {
        *self == Self::default()
    }

    /// Assign the identity and timestamp a caller left out
    pub fn ensure_identity(&mut self) {
        if !self.meta.has_id() {
            self.meta.id = Uuid::new_v4();
        }
        if !self.meta.has_created_at() {
            self.meta.created_at = OffsetDateTime::now_utc();
        }
    }
}
