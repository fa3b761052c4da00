use std::sync::Arc;

use crate::error::{Result, StorefrontError};
use crate::order::{Order, OrderStore};
use crate::resolver::ResolveUser;

/// Coordinates order creation: validate, resolve the user from the
/// directory service, commit to the ledger.
pub struct OrderBook {
    store: Arc<OrderStore>,
    resolver: Arc<dyn ResolveUser>,
}

impl OrderBook {
    pub fn new(store: Arc<OrderStore>, resolver: Arc<dyn ResolveUser>) -> Self {
        Self { store, resolver }
    }

    /// Create an order and return the full ledger contents, newest last.
    ///
    /// Validation failures return before any upstream call is made.
    /// Resolution happens strictly before the store lock is taken, so
    /// order creation never serializes on upstream latency, and a failed
    /// resolution leaves the ledger untouched.
    pub async fn create_order(&self, user_id: &str, item: &str) -> Result<Vec<Order>> {
        if user_id.trim().is_empty() {
            return Err(StorefrontError::MissingField("user_id"));
        }
        if item.trim().is_empty() {
            return Err(StorefrontError::MissingField("item"));
        }
        let id: i32 = user_id
            .trim()
            .parse()
            .map_err(|_| StorefrontError::InvalidUserId(user_id.to_string()))?;

        let user = match self.resolver.resolve(id).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(user_id = id, error = %e, "user resolution failed");
                return Err(e);
            }
        };

        // The directory is authoritative for the id, not the caller string.
        let order = self.store.append(user.id, item, user);
        tracing::info!(order_id = order.id, user_id = order.user_id, "order committed");

        Ok(self.store.snapshot())
    }

    /// Consistent snapshot of the ledger. Pure read.
    pub fn list_orders(&self) -> Vec<Order> {
        self.store.snapshot()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{User, UserDirectory};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Resolver backed directly by an in-memory directory, counting calls.
    struct DirectoryResolver {
        directory: Arc<UserDirectory>,
        calls: AtomicUsize,
    }

    impl DirectoryResolver {
        fn new(directory: Arc<UserDirectory>) -> Self {
            Self {
                directory,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ResolveUser for DirectoryResolver {
        async fn resolve(&self, id: i32) -> Result<User> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.directory
                .lookup(id)
                .ok_or(StorefrontError::UserNotFound(id))
        }
    }

    struct UnavailableResolver;

    #[async_trait]
    impl ResolveUser for UnavailableResolver {
        async fn resolve(&self, _id: i32) -> Result<User> {
            Err(StorefrontError::Upstream("connection refused".into()))
        }
    }

    fn order_book() -> (OrderBook, Arc<UserDirectory>, Arc<OrderStore>) {
        let directory = Arc::new(UserDirectory::new());
        let store = Arc::new(OrderStore::new());
        let resolver = Arc::new(DirectoryResolver::new(Arc::clone(&directory)));
        (
            OrderBook::new(Arc::clone(&store), resolver),
            directory,
            store,
        )
    }

    #[tokio::test]
    async fn create_order_commits_and_returns_full_ledger() {
        let (book, _, _) = order_book();

        let orders = book.create_order("1", "Book").await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, 1);
        assert_eq!(orders[0].user_id, 1);
        assert_eq!(orders[0].item, "Book");
        assert_eq!(orders[0].user, Some(User::new(1, "Alice")));
    }

    #[tokio::test]
    async fn sequential_orders_get_increasing_ids() {
        let (book, _, _) = order_book();

        book.create_order("1", "Book").await.unwrap();
        let orders = book.create_order("2", "Pen").await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, 1);
        assert_eq!(orders[1].id, 2);
    }

    #[tokio::test]
    async fn unknown_user_leaves_ledger_unchanged() {
        let (book, _, store) = order_book();

        let err = book.create_order("999", "Book").await.unwrap_err();
        assert!(matches!(err, StorefrontError::UserNotFound(999)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_leaves_ledger_unchanged() {
        let store = Arc::new(OrderStore::new());
        let book = OrderBook::new(Arc::clone(&store), Arc::new(UnavailableResolver));

        let err = book.create_order("1", "Book").await.unwrap_err();
        assert!(matches!(err, StorefrontError::Upstream(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn validation_failure_skips_the_upstream_call() {
        let directory = Arc::new(UserDirectory::new());
        let resolver = Arc::new(DirectoryResolver::new(Arc::clone(&directory)));
        let store = Arc::new(OrderStore::new());
        let book = OrderBook::new(Arc::clone(&store), Arc::clone(&resolver) as Arc<dyn ResolveUser>);

        assert!(matches!(
            book.create_order("1", "").await.unwrap_err(),
            StorefrontError::MissingField("item")
        ));
        assert!(matches!(
            book.create_order("", "Book").await.unwrap_err(),
            StorefrontError::MissingField("user_id")
        ));
        assert!(matches!(
            book.create_order("abc", "Book").await.unwrap_err(),
            StorefrontError::InvalidUserId(_)
        ));

        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn embedded_user_is_a_snapshot_not_a_live_reference() {
        let (book, directory, _) = order_book();

        let orders = book.create_order("1", "Book").await.unwrap();
        directory.insert(User::new(1, "Alicia"));

        assert_eq!(orders[0].user, Some(User::new(1, "Alice")));
        assert_eq!(
            book.list_orders()[0].user,
            Some(User::new(1, "Alice")),
            "later directory changes must not leak into committed orders"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_creations_assign_unique_dense_ids() {
        let (book, _, store) = order_book();
        let book = Arc::new(book);

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let book = Arc::clone(&book);
                tokio::spawn(async move { book.create_order("1", "Book").await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let mut ids: Vec<u64> = store.snapshot().iter().map(|o| o.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<u64>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn listings_concurrent_with_creation_observe_monotonic_growth() {
        let (book, _, _) = order_book();
        let book = Arc::new(book);

        let writers: Vec<_> = (0..16)
            .map(|_| {
                let book = Arc::clone(&book);
                tokio::spawn(async move { book.create_order("1", "Book").await })
            })
            .collect();

        let reader = {
            let book = Arc::clone(&book);
            tokio::spawn(async move {
                let mut last = 0;
                for _ in 0..64 {
                    let snapshot = book.list_orders();
                    assert!(snapshot.len() >= last, "ledger size must never shrink");
                    last = snapshot.len();
                    for order in &snapshot {
                        assert!(!order.item.is_empty());
                        assert!(order.user.is_some());
                    }
                    tokio::task::yield_now().await;
                }
            })
        };

        for writer in writers {
            writer.await.unwrap().unwrap();
        }
        reader.await.unwrap();
        assert_eq!(book.list_orders().len(), 16);
    }

    #[tokio::test]
    async fn list_orders_snapshots_without_mutating() {
        let (book, _, store) = order_book();
        book.create_order("1", "Book").await.unwrap();

        let first = book.list_orders();
        let second = book.list_orders();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(store.len(), 1);
    }
}
