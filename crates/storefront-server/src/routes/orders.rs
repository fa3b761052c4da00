use axum::extract::State;
use axum::{Form, Json};

use storefront_core::order::Order;
use storefront_core::StorefrontError;

use crate::error::AppError;
use crate::state::OrderState;

#[derive(serde::Deserialize)]
pub struct CreateOrderForm {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub item: String,
}

/// POST /orders — create an order. Responds with the full ledger (the new
/// order plus everything committed before it), not just the created record.
pub async fn create_order(
    State(state): State<OrderState>,
    Form(form): Form<CreateOrderForm>,
) -> Result<Json<Vec<Order>>, AppError> {
    match state.book.create_order(&form.user_id, &form.item).await {
        Ok(orders) => Ok(Json(orders)),
        // On this path an unknown user is a caller error, not a missing
        // route: the 404 belongs to `/user`, not `/orders`.
        Err(e @ StorefrontError::UserNotFound(_)) => Err(AppError::bad_request(e.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// GET /orders — list the full ledger.
pub async fn list_orders(State(state): State<OrderState>) -> Json<Vec<Order>> {
    Json(state.book.list_orders())
}
