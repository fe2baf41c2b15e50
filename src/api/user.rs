use super::*;
use crate::entity::{SharedItem, SharedUser, User};
use axum::extract::Path;

pub(super) fn routes() -> Router<SharedBiddingStore> {
    Router::new()
        .route("/", get(all_users).post(create_user))
        .route("/:user_id", get(get_user))
        .route("/:user_id/bids", get(get_user_bids))
        .route("/:user_id/items", get(get_items_user_has_bid))
}

async fn all_users(State(store): State<SharedBiddingStore>) -> Json<Vec<SharedUser>> {
    Json(store.all_users())
}

async fn create_user(
    State(store): State<SharedBiddingStore>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<(StatusCode, Json<SharedUser>), RestError> {
    let Json(user) = payload?;
    Ok((StatusCode::CREATED, Json(store.create_user(user))))
}

async fn get_user(
    State(store): State<SharedBiddingStore>,
    Path(user_id): Path<String>,
) -> Result<Json<SharedUser>, RestError> {
    Ok(Json(store.get_user(parse_id(&user_id)?)?))
}

async fn get_user_bids(
    State(store): State<SharedBiddingStore>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<SharedBid>>, RestError> {
    Ok(Json(store.get_user_bids(parse_id(&user_id)?)?))
}

async fn get_items_user_has_bid(
    State(store): State<SharedBiddingStore>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<SharedItem>>, RestError> {
    Ok(Json(store.get_items_user_has_bid(parse_id(&user_id)?)?))
}
