use chrono::Local;
use serde::{Deserialize, Serialize};

use infra::ids::OrderId;

use crate::menu::MenuItem;
use crate::money::Price;

/// Customer details captured at checkout. All free text; the checkout flow
/// only requires that each field is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub payment_method: String,
}

/// A placed order: a snapshot of the selected meals plus their summed total.
/// Never mutated after creation; deleted wholesale or not at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub meals: Vec<MenuItem>,
    pub total: Price,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

impl Order {
    /// A draft snapshot taken before customer details are collected.
    pub fn provisional(id: OrderId, meals: Vec<MenuItem>) -> Self {
        Self::compose(id, meals, None)
    }

    pub fn confirmed(id: OrderId, meals: Vec<MenuItem>, customer: Customer) -> Self {
        Self::compose(id, meals, Some(customer))
    }

    fn compose(id: OrderId, meals: Vec<MenuItem>, customer: Option<Customer>) -> Self {
        let total = meals.iter().map(|m| m.price).sum();
        let date = Local::now().format("%d/%m/%Y, %H:%M:%S").to_string();
        Order {
            id,
            meals,
            total,
            date,
            customer,
        }
    }
}
