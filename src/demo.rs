//! Demo and test data
//!
//! Users and items get sequential names; bid amounts are drawn from an
//! exponential distribution so every item ends up with a clear winner.
use crate::entity::{Amount, Bid, Item, SharedBid, SharedItem, SharedUser, User};
use crate::store::{BiddingStore, StoreError};
use rand::Rng;

pub fn create_users(store: &dyn BiddingStore, num: usize) -> Vec<SharedUser> {
    (0..num)
        .map(|i| store.create_user(User::new(format!("James Bond 007-{i:03}"))))
        .collect()
}

pub fn create_items(store: &dyn BiddingStore, num: usize) -> Vec<SharedItem> {
    (0..num)
        .map(|i| store.create_item(Item::new(format!("A-thing-{i:03}"))))
        .collect()
}

pub fn random_amounts(len: usize) -> Vec<Amount> {
    let mut rng = rand::thread_rng();
    // inverse transform sampling of Exp(1); `1 - u` keeps `ln` away from 0
    (0..len).map(|_| -(1.0 - rng.gen::<f64>()).ln()).collect()
}

/// A `num_items` x `num_bids` matrix of amounts and the highest amount of each row
pub fn amounts_matrix(num_items: usize, num_bids: usize) -> (Vec<Vec<Amount>>, Vec<Amount>) {
    let matrix: Vec<Vec<Amount>> = (0..num_items).map(|_| random_amounts(num_bids)).collect();
    let max_amounts = matrix
        .iter()
        .map(|row| row.iter().copied().fold(Amount::NEG_INFINITY, Amount::max))
        .collect();
    (matrix, max_amounts)
}

/// Two users; user `i % 2` places every amount of row `i` on item `i`
///
/// Returns the bids item by item, in placement order.
pub fn two_users_bid_on_many_items(
    store: &dyn BiddingStore,
    amounts: &[Vec<Amount>],
) -> Result<(Vec<SharedBid>, Vec<SharedItem>, Vec<SharedUser>), StoreError> {
    let users = create_users(store, 2);
    let items = create_items(store, amounts.len());

    let mut bids = vec![];
    for (item_idx, row) in amounts.iter().enumerate() {
        let item = &items[item_idx];
        let user = &users[item_idx % 2];
        for &amount in row {
            bids.push(store.place_bid(Bid::new(item.id(), user.id(), amount))?);
        }
    }
    Ok((bids, items, users))
}

/// Empty `store`, then fill it with `num_items` items and
/// `3 * num_items` bids on each, split between two users
pub fn prefill(store: &dyn BiddingStore, num_items: usize) -> Result<usize, StoreError> {
    store.reset();
    let (amounts, _) = amounts_matrix(num_items, 3 * num_items);
    let (bids, _, _) = two_users_bid_on_many_items(store, &amounts)?;
    Ok(bids.len())
}
