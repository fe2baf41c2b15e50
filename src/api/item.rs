use super::*;
use crate::entity::{Bid, Item, SharedItem};
use axum::extract::Path;
use tracing::debug;

pub(super) fn routes() -> Router<SharedBiddingStore> {
    Router::new()
        .route("/", get(all_items).post(create_item))
        .route("/:item_id", get(get_item))
        .route("/:item_id/bids", get(get_bids).post(place_bid))
        .route("/:item_id/winner", get(get_winner))
}

async fn all_items(State(store): State<SharedBiddingStore>) -> Json<Vec<SharedItem>> {
    Json(store.all_items())
}

async fn create_item(
    State(store): State<SharedBiddingStore>,
    payload: Result<Json<Item>, JsonRejection>,
) -> Result<(StatusCode, Json<SharedItem>), RestError> {
    let Json(item) = payload?;
    let item = store.create_item(item);
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(store): State<SharedBiddingStore>,
    Path(item_id): Path<String>,
) -> Result<Json<SharedItem>, RestError> {
    Ok(Json(store.get_item(parse_id(&item_id)?)?))
}

async fn get_bids(
    State(store): State<SharedBiddingStore>,
    Path(item_id): Path<String>,
) -> Result<Json<Vec<SharedBid>>, RestError> {
    Ok(Json(store.get_bids_on_item(parse_id(&item_id)?)?))
}

/// The item comes from the path; an `itemID` in the body is ignored
async fn place_bid(
    State(store): State<SharedBiddingStore>,
    Path(item_id): Path<String>,
    payload: Result<Json<Bid>, JsonRejection>,
) -> Result<(StatusCode, Json<SharedBid>), RestError> {
    let item = store.get_item(parse_id(&item_id)?)?;

    let mut bid = match payload {
        Ok(Json(bid)) if !bid.is_degenerate() => bid,
        Ok(_) => return Err(RestError::InvalidBid(BID_DECODE_FAILURE.to_owned())),
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "bid rejected");
            return Err(RestError::BadParameters(BID_DECODE_FAILURE.to_owned()));
        }
    };
    if !bid.amount.is_finite() {
        return Err(RestError::InvalidBid(format!(
            "bid amount must be finite, got {}",
            bid.amount
        )));
    }
    bid.item_id = item.id();

    let bid = store.place_bid(bid)?;
    debug!(bid_id = ?bid.id(), item_id = ?bid.item_id, "bid accepted");
    Ok((StatusCode::CREATED, Json(bid)))
}

async fn get_winner(
    State(store): State<SharedBiddingStore>,
    Path(item_id): Path<String>,
) -> Result<Json<SharedBid>, RestError> {
    Ok(Json(store.get_winning_bid(parse_id(&item_id)?)?))
}
