use std::fmt;

use log::warn;

use crate::{amount::Amount, record::Record};

/// The label used for records without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The overall and per category sums of a set of records
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    total: Amount,
    /// Categories in the order they first appeared in
    categories: Vec<(String, Amount)>,
}

impl Totals {
    /// Sums up the amounts of all records
    ///
    /// Unlike loading, this never fails. A record with an amount that can't be
    /// read is left out of all sums, a blank amount counts as zero.
    pub fn compute(records: &[Record]) -> Self {
        let mut totals = Self::default();

        for (position, record) in records.iter().enumerate() {
            let amount = match record.amount.trim() {
                "" => Amount::ZERO,
                _ => match record.amount() {
                    Ok(amount) => amount,
                    Err(err) => {
                        warn!("skipping record {} in totals: {}", position + 1, err);
                        continue;
                    }
                },
            };
            let category = match record.category.as_str() {
                "" => UNCATEGORIZED,
                category => category,
            };

            totals.total = totals.total.saturating_add(amount);
            match totals.categories.iter_mut().find(|(name, _)| name == category) {
                Some((_, sum)) => *sum = sum.saturating_add(amount),
                None => totals.categories.push((category.to_owned(), amount)),
            }
        }

        totals
    }

    /// The sum of all amounts
    pub fn total(&self) -> Amount {
        self.total
    }

    /// The sum of each category, in order of first appearance
    pub fn categories(&self) -> &[(String, Amount)] {
        &self.categories
    }

    /// The sum of a single category
    pub fn category(&self, name: &str) -> Option<Amount> {
        self.categories
            .iter()
            .find(|(category, _)| category == name)
            .map(|(_, amount)| *amount)
    }
}

impl fmt::Display for Totals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total spent: ${}", self.total)?;
        for (category, amount) in &self.categories {
            write!(f, "\n{}: ${}", category, amount)?;
        }
        Ok(())
    }
}
