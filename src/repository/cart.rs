use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::cart::{CartLine, CartSnapshot};
use crate::domain::product::Product;
use crate::repository::{CartReader, CartWriter};

/// Callback invoked with the new snapshot after every cart change.
type Observer = Arc<dyn Fn(&CartSnapshot) + Send + Sync>;

/// Handle returned by [`CartStore::subscribe`], used to unregister the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Authoritative owner of the cart state.
///
/// The store holds at most one line per product id, preserves insertion
/// order across quantity changes, and derives totals from the current
/// lines on every query. All mutations go through [`CartWriter`]; there
/// is no way for consumers to reach into the line list directly.
///
/// `CartStore` is a cheap-to-clone handle around shared interior state,
/// so every screen of the presentation layer can hold the same cart.
/// Mutations are serialized through the interior lock, and each mutation
/// notifies all subscribed observers synchronously, in registration
/// order, before the mutating call returns. A mutation that leaves the
/// cart unchanged (removing an absent line, re-setting the current
/// quantity, clearing an empty cart) notifies nobody.
#[derive(Clone, Default)]
pub struct CartStore {
    inner: Arc<Mutex<CartInner>>,
}

#[derive(Default)]
struct CartInner {
    lines: Vec<CartLine>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription_id: u64,
}

impl CartStore {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer to be called with the new snapshot after
    /// every cart change. Observers run synchronously on the mutating
    /// call and should return quickly.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&CartSnapshot) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_subscription_id);
        inner.next_subscription_id += 1;
        inner.observers.push((id, Arc::new(observer)));
        id
    }

    /// Unregister a previously subscribed observer. Returns `false` if
    /// the subscription was already removed. An unsubscribed observer is
    /// never invoked again.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(existing, _)| *existing != id);
        inner.observers.len() != before
    }

    // A panicking observer must not poison the cart for the rest of the
    // session, so poisoned locks are recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, CartInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `op` against the line list and notify observers if it reports
    /// a change. The lock is released before observers run, so the
    /// callbacks themselves may read the store.
    fn mutate<F>(&self, op: F)
    where
        F: FnOnce(&mut Vec<CartLine>) -> bool,
    {
        let (snapshot, observers) = {
            let mut inner = self.lock();
            if !op(&mut inner.lines) {
                return;
            }
            let snapshot = CartSnapshot::new(inner.lines.clone());
            let observers: Vec<Observer> = inner
                .observers
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect();
            (snapshot, observers)
        };

        for observer in &observers {
            observer(&snapshot);
        }
    }
}

impl CartReader for CartStore {
    fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(self.lock().lines.clone())
    }

    fn lines(&self) -> Vec<CartLine> {
        self.lock().lines.clone()
    }

    fn line_count(&self) -> usize {
        self.lock().lines.len()
    }

    fn is_empty(&self) -> bool {
        self.lock().lines.is_empty()
    }

    fn total_cents(&self) -> i64 {
        self.lock()
            .lines
            .iter()
            .map(CartLine::line_total_cents)
            .sum()
    }
}

impl CartWriter for CartStore {
    fn add_product(&self, product: &Product) {
        self.mutate(|lines| {
            match lines.iter_mut().find(|line| line.product_id == product.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(1),
                None => lines.push(CartLine::new(product)),
            }
            true
        });
    }

    fn update_quantity(&self, product_id: i32, quantity: NonZeroU32) {
        self.mutate(|lines| {
            match lines.iter_mut().find(|line| line.product_id == product_id) {
                Some(line) if line.quantity != quantity => {
                    line.quantity = quantity;
                    true
                }
                _ => false,
            }
        });
    }

    fn remove_product(&self, product_id: i32) {
        self.mutate(|lines| {
            let before = lines.len();
            lines.retain(|line| line.product_id != product_id);
            lines.len() != before
        });
    }

    fn clear(&self) {
        self.mutate(|lines| {
            if lines.is_empty() {
                return false;
            }
            lines.clear();
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn product(id: i32, price_cents: i64) -> Product {
        Product::new(id, format!("Product {id}"), price_cents, "USD")
    }

    fn quantity(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).expect("non-zero quantity")
    }

    #[test]
    fn adding_a_new_product_creates_a_line_with_quantity_one() {
        let store = CartStore::new();

        store.add_product(&product(1, 10_000));

        let lines = store.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, 1);
        assert_eq!(lines[0].quantity.get(), 1);
        assert_eq!(store.total_cents(), 10_000);
    }

    #[test]
    fn adding_the_same_product_twice_accumulates_quantity() {
        let store = CartStore::new();
        let chair = product(1, 10_000);

        store.add_product(&chair);
        store.add_product(&chair);

        let lines = store.lines();
        assert_eq!(lines.len(), 1, "no duplicate line per product id");
        assert_eq!(lines[0].quantity.get(), 2);
        assert_eq!(store.total_cents(), 20_000);
    }

    #[test]
    fn re_adding_a_product_keeps_its_position() {
        let store = CartStore::new();

        store.add_product(&product(1, 10_000));
        store.add_product(&product(2, 20_000));
        store.add_product(&product(1, 10_000));

        let ids: Vec<i32> = store.lines().iter().map(|line| line.product_id).collect();
        assert_eq!(ids, vec![1, 2], "quantity bump must not move the line");
    }

    #[test]
    fn denormalized_fields_are_captured_at_first_add() {
        let store = CartStore::new();
        store.add_product(&product(1, 10_000));

        // Re-adding with a repriced product bumps the quantity but keeps
        // the price the line was created with.
        store.add_product(&product(1, 99_900));

        let lines = store.lines();
        assert_eq!(lines[0].quantity.get(), 2);
        assert_eq!(lines[0].price_cents, 10_000);
        assert_eq!(store.total_cents(), 20_000);
    }

    #[test]
    fn update_quantity_replaces_the_quantity_exactly() {
        let store = CartStore::new();
        store.add_product(&product(1, 10_000));

        store.update_quantity(1, quantity(5));

        assert_eq!(store.lines()[0].quantity.get(), 5);
        assert_eq!(store.total_cents(), 50_000);
    }

    #[test]
    fn update_quantity_for_unknown_product_is_a_no_op() {
        let store = CartStore::new();
        store.add_product(&product(1, 10_000));
        let before = store.snapshot();

        store.update_quantity(42, quantity(5));

        assert_eq!(store.snapshot(), before, "no line may be created");
    }

    #[test]
    fn remove_product_deletes_only_the_matching_line() {
        let store = CartStore::new();
        store.add_product(&product(1, 10_000));
        store.add_product(&product(2, 20_000));

        store.remove_product(1);

        let lines = store.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, 2);
        assert_eq!(store.total_cents(), 20_000);
    }

    #[test]
    fn remove_of_absent_product_leaves_the_cart_unchanged() {
        let store = CartStore::new();
        store.add_product(&product(1, 10_000));
        let before = store.snapshot();

        store.remove_product(42);

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn clear_empties_the_cart_regardless_of_prior_state() {
        let store = CartStore::new();
        store.add_product(&product(1, 10_000));
        store.add_product(&product(2, 20_000));
        store.update_quantity(1, quantity(7));

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.line_count(), 0);
        assert_eq!(store.total_cents(), 0);
    }

    #[test]
    fn total_is_recomputed_after_every_mutation() {
        let store = CartStore::new();

        store.add_product(&product(1, 10_000));
        assert_eq!(store.total_cents(), 10_000);

        store.add_product(&product(1, 10_000));
        assert_eq!(store.total_cents(), 20_000);

        store.add_product(&product(2, 20_000));
        assert_eq!(store.total_cents(), 40_000);

        store.update_quantity(1, quantity(5));
        assert_eq!(store.total_cents(), 70_000);

        store.remove_product(2);
        assert_eq!(store.total_cents(), 50_000);

        store.clear();
        assert_eq!(store.total_cents(), 0);
    }

    #[test]
    fn mutating_a_returned_snapshot_does_not_affect_the_store() {
        let store = CartStore::new();
        store.add_product(&product(1, 10_000));

        let mut lines = store.lines();
        lines.clear();
        let mut snapshot = store.snapshot();
        snapshot.lines.clear();

        assert_eq!(store.line_count(), 1);
    }

    #[test]
    fn observers_receive_every_post_mutation_snapshot_in_order() {
        let store = CartStore::new();
        let seen: Arc<Mutex<Vec<(usize, i64)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        store.subscribe(move |snapshot| {
            sink.lock()
                .expect("observer sink")
                .push((snapshot.line_count(), snapshot.total_cents));
        });

        store.add_product(&product(1, 10_000));
        store.add_product(&product(2, 20_000));
        store.update_quantity(1, quantity(2));
        store.remove_product(2);
        store.clear();

        let seen = seen.lock().expect("observer sink");
        assert_eq!(
            *seen,
            vec![
                (1, 10_000),
                (2, 30_000),
                (2, 40_000),
                (1, 20_000),
                (0, 0),
            ]
        );
    }

    #[test]
    fn observers_are_notified_in_registration_order() {
        let store = CartStore::new();
        let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

        let first_sink = order.clone();
        store.subscribe(move |_| first_sink.lock().expect("order sink").push("first"));
        let second_sink = order.clone();
        store.subscribe(move |_| second_sink.lock().expect("order sink").push("second"));

        store.add_product(&product(1, 10_000));

        assert_eq!(*order.lock().expect("order sink"), vec!["first", "second"]);
    }

    #[test]
    fn no_op_mutations_notify_nobody() {
        let store = CartStore::new();
        store.add_product(&product(1, 10_000));

        let calls = Arc::new(Mutex::new(0usize));
        let sink = calls.clone();
        store.subscribe(move |_| *sink.lock().expect("call counter") += 1);

        store.remove_product(42);
        store.update_quantity(42, quantity(3));
        store.update_quantity(1, quantity(1)); // already the current quantity

        assert_eq!(*calls.lock().expect("call counter"), 0);

        store.clear();
        store.clear(); // second clear finds an empty cart

        assert_eq!(*calls.lock().expect("call counter"), 1);
    }

    #[test]
    fn unsubscribed_observers_are_not_invoked() {
        let store = CartStore::new();
        let calls = Arc::new(Mutex::new(0usize));
        let sink = calls.clone();

        let id = store.subscribe(move |_| *sink.lock().expect("call counter") += 1);
        store.add_product(&product(1, 10_000));

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id), "second unsubscribe reports removal");

        store.add_product(&product(2, 20_000));

        assert_eq!(*calls.lock().expect("call counter"), 1);
    }

    #[test]
    fn observers_may_read_the_store_during_notification() {
        let store = CartStore::new();
        let reader = store.clone();
        let totals = Arc::new(Mutex::new(Vec::new()));
        let sink = totals.clone();

        store.subscribe(move |snapshot| {
            // A read inside the observer sees the post-mutation state.
            assert_eq!(reader.total_cents(), snapshot.total_cents);
            sink.lock().expect("total sink").push(snapshot.total_cents);
        });

        store.add_product(&product(1, 10_000));
        store.add_product(&product(1, 10_000));

        assert_eq!(*totals.lock().expect("total sink"), vec![10_000, 20_000]);
    }

    #[test]
    fn cloned_handles_share_the_same_cart() {
        let store = CartStore::new();
        let screen = store.clone();

        store.add_product(&product(1, 10_000));

        assert_eq!(screen.line_count(), 1);
        assert_eq!(screen.total_cents(), 10_000);
    }
}
