pub use self::{
    amount::{Amount, AmountError},
    input::{ExpenseInput, Field, ValidationError},
    record::{Record, HEADERS},
    store::{Store, StoreError},
    totals::{Totals, UNCATEGORIZED},
    tracker::{today, ExpenseTracker, TrackerError},
};

mod amount;
mod input;
mod record;
mod store;
mod totals;
mod tracker;
pub mod view;
