use std::sync::Arc;

use anyhow::Result;
use log::*;

use infra::ids::IdGen;

pub mod checkout;
pub mod config;
pub mod menu;
pub mod money;
pub mod orders;
pub mod selection;

use crate::checkout::CheckoutFlow;
use crate::menu::Catalog;
use crate::orders::OrderStore;

/// The assembled storefront: the static catalog, the durable order store,
/// and a factory for per-session checkout flows.
#[derive(Debug, Clone)]
pub struct MealCart {
    catalog: Catalog,
    orders: OrderStore,
    ids: Arc<IdGen>,
}

impl MealCart {
    pub fn new(config: &config::Config) -> Result<Self> {
        let store = config.db.build()?;
        debug!("Opened order store");

        let catalog = Catalog::standard();
        let orders = OrderStore::new(store);
        let ids = Arc::new(IdGen::new());

        Ok(MealCart {
            catalog,
            orders,
            ids,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    /// A fresh browsing session against the shared store.
    pub fn checkout(&self) -> CheckoutFlow {
        info!("Starting checkout session");
        CheckoutFlow::new(self.orders.clone(), self.ids.clone())
    }
}
