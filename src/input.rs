use std::fmt;

use crate::{
    amount::{Amount, AmountError},
    record::Record,
};

/// The fields of an expense the user has to fill in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Date,
    Category,
    Description,
    Amount,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Date => "date",
            Field::Category => "category",
            Field::Description => "description",
            Field::Amount => "amount",
        };
        f.write_str(name)
    }
}

/// Possible errors to occur while validating user input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill all fields, the {0} is missing")]
    MissingField(Field),
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),
}

/// The raw text of an expense as it was entered
///
/// This is the state of the entry form. It is owned by whoever presents the
/// form and handed to the tracker as is, the tracker does the trimming and
/// validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseInput {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

impl ExpenseInput {
    /// The content of a freshly cleared form
    pub fn cleared(today: &str) -> Self {
        Self {
            date: today.to_owned(),
            ..Default::default()
        }
    }

    /// Turns the input into a record ready to be stored
    ///
    /// A blank date falls back to `today`. All other fields are required,
    /// and the amount is rounded to two decimals.
    pub fn validate(&self, today: &str) -> Result<Record, ValidationError> {
        let date = match self.date.trim() {
            "" => today.trim(),
            date => date,
        };
        let fields = [
            (Field::Date, date),
            (Field::Category, self.category.trim()),
            (Field::Description, self.description.trim()),
            (Field::Amount, self.amount.trim()),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }

        let amount: Amount = self.amount.parse()?;

        Ok(Record {
            date: date.to_owned(),
            category: self.category.trim().to_owned(),
            description: self.description.trim().to_owned(),
            amount: amount.to_string(),
        })
    }
}

impl From<&Record> for ExpenseInput {
    fn from(record: &Record) -> Self {
        Self {
            date: record.date.clone(),
            category: record.category.clone(),
            description: record.description.clone(),
            amount: record.amount.clone(),
        }
    }
}
