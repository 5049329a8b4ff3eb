use std::sync::{Arc, Mutex};

use log::*;

use infra::ids::OrderId;
use infra::persistence::{Error, Store};

mod models;

pub use self::models::{Customer, Order};

const ORDERS_KEY: &str = "orders";
const DRAFT_KEY: &str = "orders/draft";

/// The durable collection of placed orders: one JSON document under a fixed
/// key, read in full and written in full on every mutation.
///
/// Handles are cheap to clone; all read-modify-write mutations on the shared
/// collection are serialized through one lock, so a second writer can never
/// silently discard another's update.
#[derive(Debug, Clone)]
pub struct OrderStore {
    store: Store,
    write_lock: Arc<Mutex<()>>,
}

impl OrderStore {
    pub fn new(store: Store) -> Self {
        OrderStore {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The full order history, oldest first. Nothing persisted yet and
    /// unreadable history both come back as an empty collection.
    pub fn list(&self) -> Vec<Order> {
        match self.store.load::<Vec<Order>>(ORDERS_KEY) {
            Ok(Some(orders)) => orders,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Order history is unreadable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Append one order, preserving everything already persisted.
    pub fn append(&self, order: &Order) -> Result<(), Error> {
        let _guard = self.lock();
        let mut orders = self.list();
        orders.push(order.clone());
        self.store.save(ORDERS_KEY, &orders)?;
        debug!("Appended order {}; {} on record", order.id, orders.len());
        Ok(())
    }

    /// Overwrite the persisted collection wholesale.
    pub fn replace(&self, orders: &[Order]) -> Result<(), Error> {
        let _guard = self.lock();
        self.store.save(ORDERS_KEY, &orders)?;
        debug!("Replaced order history; {} on record", orders.len());
        Ok(())
    }

    /// Remove the order with the given id, if any. A missing id is a no-op.
    pub fn delete_by_id(&self, id: OrderId) -> Result<(), Error> {
        let _guard = self.lock();
        let orders: Vec<Order> = self
            .list()
            .into_iter()
            .filter(|order| order.id != id)
            .collect();
        self.store.save(ORDERS_KEY, &orders)?;
        debug!("Deleted order {}; {} remain", id, orders.len());
        Ok(())
    }

    /// Stash a provisional order. Drafts live under their own key and never
    /// show up in `list()`.
    pub fn save_draft(&self, order: &Order) -> Result<(), Error> {
        self.store.save(DRAFT_KEY, order)
    }

    pub fn draft(&self) -> Result<Option<Order>, Error> {
        self.store.load(DRAFT_KEY)
    }

    pub fn clear_draft(&self) -> Result<(), Error> {
        self.store.delete(DRAFT_KEY)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
