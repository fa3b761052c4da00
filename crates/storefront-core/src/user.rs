use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
}

impl User {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// UserDirectory — in-memory directory keyed by id
// ---------------------------------------------------------------------------

/// In-memory user directory. Lookups clone the record out, so callers never
/// hold a live reference into the table.
pub struct UserDirectory {
    users: RwLock<HashMap<i32, User>>,
}

impl UserDirectory {
    /// Directory seeded with the fixed demo table.
    pub fn new() -> Self {
        Self::with_users([User::new(1, "Alice"), User::new(2, "Bob")])
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    /// Insert or replace a record.
    pub fn insert(&self, user: User) {
        let mut users = self.users.write().expect("user directory lock poisoned");
        users.insert(user.id, user);
    }

    pub fn lookup(&self, id: i32) -> Option<User> {
        let users = self.users.read().expect("user directory lock poisoned");
        users.get(&id).cloned()
    }

    /// All users, sorted by id for stable output.
    pub fn list(&self) -> Vec<User> {
        let users = self.users.read().expect("user directory lock poisoned");
        let mut list: Vec<User> = users.values().cloned().collect();
        list.sort_by_key(|u| u.id);
        list
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
