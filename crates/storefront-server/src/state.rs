use std::sync::Arc;

use storefront_core::orchestrator::OrderBook;
use storefront_core::user::UserDirectory;

/// Shared state for the user-directory router.
#[derive(Clone)]
pub struct UserState {
    pub directory: Arc<UserDirectory>,
}

/// Shared state for the order-ledger router. The order book (and the store
/// inside it) is an explicit instance, so tests get an isolated ledger per
/// router.
#[derive(Clone)]
pub struct OrderState {
    pub book: Arc<OrderBook>,
}
