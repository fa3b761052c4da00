use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub user_id: i32,
    pub item: String,
    /// Snapshot of the user as resolved at creation time. Not kept in sync
    /// with later directory changes. Omitted from the encoding when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

// ---------------------------------------------------------------------------
// OrderStore — append-only ledger under a single coarse lock
// ---------------------------------------------------------------------------

/// Append-only order ledger. One lock guards both id assignment and the
/// push, so concurrent appends can never observe the same length.
pub struct OrderStore {
    orders: Mutex<Vec<Order>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
        }
    }

    /// Sole mutation entry point. Assigns `len + 1` as the id and pushes
    /// atomically under the lock. Returns the committed order.
    pub fn append(&self, user_id: i32, item: impl Into<String>, user: User) -> Order {
        let mut orders = self.orders.lock().expect("order store lock poisoned");
        let order = Order {
            id: orders.len() as u64 + 1,
            user_id,
            item: item.into(),
            user: Some(user),
        };
        orders.push(order.clone());
        order
    }

    /// Consistent copy of the ledger in append order.
    pub fn snapshot(&self) -> Vec<Order> {
        let orders = self.orders.lock().expect("order store lock poisoned");
        orders.clone()
    }

    pub fn len(&self) -> usize {
        let orders = self.orders.lock().expect("order store lock poisoned");
        orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
