use crate::amount::{Amount, AmountError};

/// The column headers of the expense file, in the order they are written
pub const HEADERS: [&str; 4] = ["Date", "Category", "Description", "Amount"];

/// An expense record
///
/// Records have no identifier of their own. A record is addressed by its
/// position in the expense file, which is also the order it was added in.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// The amount as written in the file
    /// Records written by the tracker always carry exactly two decimals.
    #[serde(rename = "Amount")]
    pub amount: String,
}

impl Record {
    /// Parses the stored amount
    pub fn amount(&self) -> Result<Amount, AmountError> {
        self.amount.parse()
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.date, self.category, self.description, self.amount,
        )
    }
}
