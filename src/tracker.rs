use log::info;

use crate::{ExpenseInput, Record, Store, StoreError, Totals, ValidationError};

/// Possible errors to occur during an operation on the expense records
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("There is no expense at index {position}, only {len} expenses exist")]
    NotFound { position: usize, len: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Today's date in local time, the default for blank dates
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// The central place for reading and changing expense records
///
/// The tracker keeps no records of its own. Every operation loads the full
/// set of records from the [`Store`], applies its change and writes the
/// full set back. Records are addressed by their zero based position, which
/// is resolved again on every call, so a position taken from an earlier load
/// can point to a different record if the file was changed in between.
#[derive(Clone, Debug)]
pub struct ExpenseTracker {
    store: Store,
}

impl ExpenseTracker {
    /// Creates a tracker on top of the given store
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// The store all records are read from and written to
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// All records in their stored order
    pub fn records(&self) -> Result<Vec<Record>, TrackerError> {
        Ok(self.store.load()?)
    }

    /// The totals of all records
    pub fn totals(&self) -> Result<Totals, TrackerError> {
        Ok(Totals::compute(&self.records()?))
    }

    /// Validates the input and appends it as a new record
    pub fn add(&self, input: &ExpenseInput) -> Result<Record, TrackerError> {
        let record = input.validate(&today())?;

        let mut records = self.store.load()?;
        records.push(record.clone());
        self.store.save(&records)?;

        info!("added expense {} at position {}", record, records.len() - 1);
        Ok(record)
    }

    /// Validates the input and replaces the record at `position` with it
    pub fn update(&self, position: usize, input: &ExpenseInput) -> Result<Record, TrackerError> {
        let record = input.validate(&today())?;

        let mut records = self.store.load()?;
        let len = records.len();
        let slot = records
            .get_mut(position)
            .ok_or(TrackerError::NotFound { position, len })?;
        *slot = record.clone();
        self.store.save(&records)?;

        info!("updated expense at position {} to {}", position, record);
        Ok(record)
    }

    /// Removes the record at `position` and returns it
    /// All records behind it move up by one position.
    pub fn delete(&self, position: usize) -> Result<Record, TrackerError> {
        let mut records = self.store.load()?;
        if position >= records.len() {
            return Err(TrackerError::NotFound { position, len: records.len() });
        }
        let record = records.remove(position);
        self.store.save(&records)?;

        info!("deleted expense {} from position {}", record, position);
        Ok(record)
    }

    /// The record at `position`, if there is one
    pub fn get(&self, position: usize) -> Result<Option<Record>, TrackerError> {
        let mut records = self.store.load()?;
        match position < records.len() {
            true => Ok(Some(records.swap_remove(position))),
            false => Ok(None),
        }
    }
}
