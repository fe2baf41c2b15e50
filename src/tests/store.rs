use crate::{
    demo,
    entity::*,
    store::{BiddingStore, InMemoryBiddingStore, StoreError},
};
use anyhow::Result;
use std::{collections::HashSet, sync::Arc};

fn ids<T>(entities: &[Arc<T>], id: impl Fn(&T) -> EntityId) -> HashSet<EntityId> {
    entities.iter().map(|e| id(&**e)).collect()
}

#[test]
fn empty_store_lists_nothing() {
    let store = InMemoryBiddingStore::new();

    assert!(store.all_items().is_empty());
    assert!(store.all_users().is_empty());
    assert!(store.all_bids().is_empty());
}

#[test]
fn create_item_assigns_missing_identity() {
    let store = InMemoryBiddingStore::new();

    let mut item = Item::default();
    item.name = "A thing".to_owned();
    let item = store.create_item(item);

    assert!(item.meta.has_id());
    assert_ne!(item.created_at(), ZERO_TIMESTAMP);
    assert_eq!(store.get_item(item.id()).map(|i| i.id()), Ok(item.id()));
}

#[test]
fn create_item_keeps_existing_identity() {
    let store = InMemoryBiddingStore::new();
    let item = Item::new("A thing");
    let meta = item.meta;

    let created = store.create_item(item);

    assert_eq!(created.meta, meta);
    assert_eq!(store.item_count(), 1);
}

#[test]
fn create_user_assigns_missing_identity() {
    let store = InMemoryBiddingStore::new();

    let mut user = User::default();
    user.name = "James Bond".to_owned();
    let user = store.create_user(user);

    assert!(user.meta.has_id());
    assert_ne!(user.created_at(), ZERO_TIMESTAMP);
    assert_eq!(store.all_users().len(), 1);
}

#[test]
fn unknown_ids_are_not_found() {
    let store = InMemoryBiddingStore::new();
    demo::create_items(&store, 3);
    demo::create_users(&store, 3);

    let id = EntityId::new_v4();
    assert_eq!(store.get_item(id).err(), Some(StoreError::ItemNotFound(id)));
    assert_eq!(store.get_user(id).err(), Some(StoreError::UserNotFound(id)));
    assert_eq!(store.get_bids_on_item(id).err(), Some(StoreError::ItemNotFound(id)));
    assert_eq!(store.get_winning_bid(id).err(), Some(StoreError::ItemNotFound(id)));
    assert_eq!(store.get_user_bids(id).err(), Some(StoreError::UserNotFound(id)));
    assert_eq!(
        store.get_items_user_has_bid(id).err(),
        Some(StoreError::UserNotFound(id))
    );
}

#[test]
fn known_item_without_bids() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let item = store.create_item(Item::new("A thing"));

    assert!(store.get_bids_on_item(item.id())?.is_empty());

    let err = store.get_winning_bid(item.id()).unwrap_err();
    assert_eq!(err, StoreError::NoValidBids(item.id()));
    assert!(err.is_not_found());
    Ok(())
}

#[test]
fn place_bid_fills_in_identity() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let item = store.create_item(Item::new("A thing"));
    let user = store.create_user(User::new("James Bond"));

    let placed = store.place_bid(Bid {
        item_id: item.id(),
        user_id: user.id(),
        amount: 9.99,
        ..Default::default()
    })?;

    assert!(placed.meta.has_id());
    assert!(placed.meta.has_created_at());
    assert_eq!(placed.item_id, item.id());
    assert_eq!(placed.user_id, user.id());
    assert_eq!(store.get_bids_on_item(item.id())?, vec![placed.clone()]);
    assert_eq!(store.get_user_bids(user.id())?, vec![placed]);
    Ok(())
}

#[test]
fn place_bid_stamps_pre_epoch_creation_time() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let item = store.create_item(Item::new("A thing"));
    let user = store.create_user(User::new("James Bond"));

    let bid: Bid = serde_json::from_value(serde_json::json!({
        "createdAt": "0001-01-01T00:00:00Z",
        "itemID": item.id(),
        "userID": user.id(),
        "amount": 2.5,
    }))?;
    assert!(!bid.meta.has_created_at());

    let placed = store.place_bid(bid)?;

    assert!(placed.meta.has_created_at());
    assert!(placed.created_at() > ZERO_TIMESTAMP);
    Ok(())
}

#[test]
fn place_bid_keeps_caller_identity() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let item = store.create_item(Item::new("A thing"));
    let user = store.create_user(User::new("James Bond"));
    let bid = Bid::new(item.id(), user.id(), 1.0);

    let placed = store.place_bid(bid)?;

    assert_eq!(*placed, bid);
    Ok(())
}

#[test]
fn place_bid_shares_one_instance() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let item = store.create_item(Item::new("A thing"));
    let user = store.create_user(User::new("James Bond"));

    let placed = store.place_bid(Bid::new(item.id(), user.id(), 1.0))?;

    assert!(Arc::ptr_eq(&placed, &item.bids()[0]));
    assert!(Arc::ptr_eq(&placed, &user.bids()[0]));
    Ok(())
}

#[test]
fn place_bid_on_unknown_item_changes_nothing() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let (amounts, _) = demo::amounts_matrix(2, 3);
    let (bids, _, users) = demo::two_users_bid_on_many_items(&store, &amounts)?;

    let missing = ItemId::new_v4();
    let err = store
        .place_bid(Bid::new(missing, users[0].id(), 100.0))
        .unwrap_err();

    assert_eq!(err, StoreError::ItemNotFound(missing));
    assert_eq!(store.item_count(), 2);
    assert_eq!(store.user_count(), 2);
    assert_eq!(store.all_bids().len(), bids.len());
    assert_eq!(store.get_user_bids(users[0].id())?.len(), 3);
    assert_eq!(store.get_items_user_has_bid(users[0].id())?.len(), 1);
    Ok(())
}

#[test]
fn place_bid_by_unknown_user_changes_nothing() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let item = store.create_item(Item::new("A thing"));
    let user = store.create_user(User::new("James Bond"));
    let first = store.place_bid(Bid::new(item.id(), user.id(), 5.0))?;

    let missing = UserId::new_v4();
    let err = store
        .place_bid(Bid::new(item.id(), missing, 500.0))
        .unwrap_err();

    assert_eq!(err, StoreError::UserNotFound(missing));
    assert_eq!(store.get_bids_on_item(item.id())?, vec![first.clone()]);
    assert_eq!(store.get_winning_bid(item.id())?, first);
    assert_eq!(store.user_count(), 1);
    Ok(())
}

#[test]
fn winner_scenario_with_tie() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let item = store.create_item(Item::new("A thing"));
    let user = store.create_user(User::new("James Bond"));

    let a = store.place_bid(Bid::new(item.id(), user.id(), 10.0))?;
    assert_eq!(store.get_winning_bid(item.id())?, a);

    let b = store.place_bid(Bid::new(item.id(), user.id(), 15.0))?;
    assert_eq!(store.get_winning_bid(item.id())?, b);

    let mut later = Bid::new(item.id(), user.id(), 15.0);
    later.meta.created_at = b.created_at() + time::Duration::seconds(1);
    let c = store.place_bid(later)?;
    assert!(b.created_at() < c.created_at());
    assert_eq!(store.get_winning_bid(item.id())?.id(), b.id());
    Ok(())
}

#[test]
fn winning_bid_is_the_first_maximum() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let (amounts, max_amounts) = demo::amounts_matrix(8, 24);
    let (_, items, _) = demo::two_users_bid_on_many_items(&store, &amounts)?;

    for (item, max_amount) in items.iter().zip(max_amounts) {
        let bids = store.get_bids_on_item(item.id())?;
        let first_max = bids
            .iter()
            .find(|b| b.amount == max_amount)
            .map(|b| b.id());

        let winner = store.get_winning_bid(item.id())?;
        assert_eq!(winner.amount, max_amount);
        assert_eq!(Some(winner.id()), first_max);
    }
    Ok(())
}

#[test]
fn items_user_has_bid_are_distinct() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let x = store.create_item(Item::new("X"));
    let y = store.create_item(Item::new("Y"));
    let user = store.create_user(User::new("James Bond"));

    for amount in [1.0, 2.0, 3.0] {
        store.place_bid(Bid::new(x.id(), user.id(), amount))?;
    }
    store.place_bid(Bid::new(y.id(), user.id(), 1.0))?;

    let items = store.get_items_user_has_bid(user.id())?;
    assert_eq!(items.len(), 2);
    assert_eq!(ids(&items, Item::id), HashSet::from([x.id(), y.id()]));
    assert_eq!(store.get_user_bids(user.id())?.len(), 4);
    Ok(())
}

#[test]
fn two_users_split_items_by_parity() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let (amounts, _) = demo::amounts_matrix(4, 12);
    let (bids, items, users) = demo::two_users_bid_on_many_items(&store, &amounts)?;

    assert_eq!(bids.len(), 48);
    assert_eq!(
        ids(&store.get_items_user_has_bid(users[0].id())?, Item::id),
        HashSet::from([items[0].id(), items[2].id()])
    );
    assert_eq!(
        ids(&store.get_items_user_has_bid(users[1].id())?, Item::id),
        HashSet::from([items[1].id(), items[3].id()])
    );
    Ok(())
}

#[test]
fn all_bids_keeps_arrival_order_within_an_item() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let (amounts, _) = demo::amounts_matrix(3, 5);
    let (placed, items, _) = demo::two_users_bid_on_many_items(&store, &amounts)?;

    let all = store.all_bids();
    assert_eq!(ids(&all, Bid::id), ids(&placed, Bid::id));

    for item in &items {
        let on_item: Vec<_> = all
            .iter()
            .filter(|b| b.item_id == item.id())
            .map(|b| b.id())
            .collect();
        let expected: Vec<_> = placed
            .iter()
            .filter(|b| b.item_id == item.id())
            .map(|b| b.id())
            .collect();
        assert_eq!(on_item, expected);
    }
    Ok(())
}

#[test]
fn user_side_lags_item_side_within_a_placement() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let item = store.create_item(Item::new("A thing"));
    let user = store.create_user(User::new("James Bond"));
    let bid = Arc::new(Bid::new(item.id(), user.id(), 3.0));

    // the two halves of a placement, observed in between
    item.place_new_bid(bid.clone());
    assert_eq!(store.get_bids_on_item(item.id())?.len(), 1);
    assert_eq!(store.get_winning_bid(item.id())?, bid);
    assert!(store.get_items_user_has_bid(user.id())?.is_empty());
    assert!(store.get_user_bids(user.id())?.is_empty());

    user.place_new_bid_on_item(bid.clone(), &item);
    assert_eq!(store.get_user_bids(user.id())?, vec![bid]);
    assert_eq!(store.get_items_user_has_bid(user.id())?.len(), 1);
    Ok(())
}

#[test]
fn reset_discards_everything() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    let placed = demo::prefill(&store, 3)?;
    assert_eq!(placed, 27);
    assert_eq!(store.all_bids().len(), 27);

    let item_id = store.all_items()[0].id();
    store.reset();

    assert!(store.all_items().is_empty());
    assert!(store.all_users().is_empty());
    assert!(store.all_bids().is_empty());
    assert_eq!(
        store.get_item(item_id).err(),
        Some(StoreError::ItemNotFound(item_id))
    );

    demo::create_items(&store, 2);
    assert_eq!(store.item_count(), 2);
    Ok(())
}

#[test]
fn demo_prefill_starts_from_an_empty_store() -> Result<()> {
    let store = InMemoryBiddingStore::new();
    demo::create_items(&store, 5);
    demo::create_users(&store, 5);

    assert_eq!(demo::prefill(&store, 2)?, 12);
    assert_eq!(store.item_count(), 2);
    assert_eq!(store.user_count(), 2);
    assert_eq!(store.all_bids().len(), 12);
    Ok(())
}

#[test]
fn store_errors_are_not_found() {
    let id = EntityId::new_v4();
    for err in [
        StoreError::ItemNotFound(id),
        StoreError::UserNotFound(id),
        StoreError::NoValidBids(id),
    ] {
        assert!(err.is_not_found());
        assert!(err.to_string().contains(&id.to_string()));
    }
}
