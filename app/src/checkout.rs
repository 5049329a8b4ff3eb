use std::sync::Arc;

use err_derive::Error;
use log::*;

use infra::ids::IdGen;
use infra::persistence;

use crate::menu::{MealId, MenuItem};
use crate::money::Price;
use crate::orders::{Customer, Order, OrderStore};
use crate::selection::SelectionSet;

/// The five checkout fields, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    Email,
    Phone,
    Address,
    PaymentMethod,
}

pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub message: &'static str,
}

/// Driven as an explicit ordered list rather than by iterating struct keys,
/// so the order of reported errors is part of the contract.
pub const FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        field: Field::FullName,
        label: "Full name",
        message: "Full name is required",
    },
    FieldSpec {
        field: Field::Email,
        label: "Email",
        message: "Email is required",
    },
    FieldSpec {
        field: Field::Phone,
        label: "Phone",
        message: "Phone number is required",
    },
    FieldSpec {
        field: Field::Address,
        label: "Address",
        message: "Delivery address is required",
    },
    FieldSpec {
        field: Field::PaymentMethod,
        label: "Payment method",
        message: "Payment method is required",
    },
];

/// Validation failures from a rejected submit, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    entries: Vec<(Field, &'static str)>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|&(_, message)| message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Field, &'static str)> {
        self.entries.iter()
    }

    fn push(&mut self, field: Field, message: &'static str) {
        self.entries.push((field, message));
    }
}

/// The working form. Validation is presence-only by design: any non-empty
/// string passes, there is no email or phone format checking.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    full_name: String,
    email: String,
    phone: String,
    address: String,
    payment_method: String,
}

impl CheckoutForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
            Field::PaymentMethod => &self.payment_method,
        }
    }

    pub fn set(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
            Field::PaymentMethod => &mut self.payment_method,
        };
        *slot = value.to_string();
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for spec in FIELDS.iter() {
            if self.get(spec.field).trim().is_empty() {
                errors.push(spec.field, spec.message);
            }
        }
        errors
    }

    fn to_customer(&self) -> Customer {
        Customer {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            payment_method: self.payment_method.clone(),
        }
    }

    fn clear(&mut self) {
        *self = CheckoutForm::default();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Browsing,
    Reviewing,
    AwaitingInput,
    Confirmed(Order),
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Browsing => "browsing",
            State::Reviewing => "reviewing",
            State::AwaitingInput => "awaiting input",
            State::Confirmed(_) => "confirmed",
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(display = "nothing has been selected yet")]
    EmptySelection,
    #[error(display = "not available while {}", _0)]
    WrongState(&'static str),
    #[error(display = "{}", _0)]
    Persistence(#[error(from)] persistence::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Confirmed(Order),
    Rejected(ValidationErrors),
}

/// One user's path from browsing the menu to a persisted order.
///
/// Browsing -> Reviewing -> AwaitingInput -> Confirmed, with Confirmed
/// returning to Browsing via `new_order`. Entering the review step stashes a
/// provisional snapshot in the store's draft slot; only a successful submit
/// appends to the order history.
#[derive(Debug)]
pub struct CheckoutFlow {
    store: OrderStore,
    ids: Arc<IdGen>,
    selection: SelectionSet,
    form: CheckoutForm,
    state: State,
}

impl CheckoutFlow {
    pub fn new(store: OrderStore, ids: Arc<IdGen>) -> Self {
        CheckoutFlow {
            store,
            ids,
            selection: SelectionSet::new(),
            form: CheckoutForm::default(),
            state: State::Browsing,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn total(&self) -> Price {
        self.selection.total()
    }

    pub fn toggle(&mut self, item: MenuItem) {
        self.selection.toggle(item);
    }

    pub fn is_selected(&self, id: MealId) -> bool {
        self.selection.is_selected(id)
    }

    /// Lifecycle hook for the browsing screen regaining focus.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn can_proceed(&self) -> bool {
        self.state == State::Browsing && !self.selection.is_empty()
    }

    /// Browsing -> Reviewing. Guarded on a non-empty selection; the UI is
    /// expected to disable the action rather than surface the error.
    pub fn proceed(&mut self) -> Result<(), CheckoutError> {
        self.expect_state(&State::Browsing)?;
        if self.selection.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }
        debug!(
            "Proceeding to review with {} meals, total {}",
            self.selection.len(),
            self.total()
        );
        self.state = State::Reviewing;
        Ok(())
    }

    /// Reviewing -> AwaitingInput, stashing a provisional snapshot of the
    /// order so an abandoned checkout can be resumed.
    pub fn begin_checkout(&mut self) -> Result<(), CheckoutError> {
        self.expect_state(&State::Reviewing)?;
        let draft = Order::provisional(self.ids.next(), self.selection.snapshot());
        self.store.save_draft(&draft)?;
        debug!("Saved draft order {}", draft.id);
        self.state = State::AwaitingInput;
        Ok(())
    }

    /// Field edits don't trigger validation; that happens only at submit.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), CheckoutError> {
        self.expect_state(&State::AwaitingInput)?;
        self.form.set(field, value);
        Ok(())
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// AwaitingInput -> Confirmed when every field is non-blank; otherwise the
    /// flow stays put and reports which fields failed.
    pub fn submit(&mut self) -> Result<SubmitOutcome, CheckoutError> {
        self.expect_state(&State::AwaitingInput)?;

        let errors = self.form.validate();
        if !errors.is_empty() {
            debug!("Rejected submit: {} missing fields", errors.len());
            return Ok(SubmitOutcome::Rejected(errors));
        }

        let order = Order::confirmed(
            self.ids.next(),
            self.selection.snapshot(),
            self.form.to_customer(),
        );
        self.store.append(&order)?;
        self.store.clear_draft()?;
        info!("Confirmed order {} with total {}", order.id, order.total);

        self.form.clear();
        self.selection.clear();
        self.state = State::Confirmed(order.clone());
        Ok(SubmitOutcome::Confirmed(order))
    }

    /// Confirmed -> Browsing. Leaves the persisted history untouched.
    pub fn new_order(&mut self) -> Result<(), CheckoutError> {
        match self.state {
            State::Confirmed(_) => {
                self.state = State::Browsing;
                Ok(())
            }
            ref other => Err(CheckoutError::WrongState(other.name())),
        }
    }

    fn expect_state(&self, wanted: &State) -> Result<(), CheckoutError> {
        if &self.state == wanted {
            Ok(())
        } else {
            Err(CheckoutError::WrongState(self.state.name()))
        }
    }
}
