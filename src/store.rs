use std::{
    io,
    path::{Path, PathBuf},
};

use log::debug;

use crate::record::{Record, HEADERS};

/// Possible errors to occur while reading or writing the expense file
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Could not access the expense file `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("The expense file `{}` contains a malformed row", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.to_owned(), source }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        match source.is_io_error() {
            true => Self::io(path, io::Error::from(source)),
            false => Self::Parse { path: path.to_owned(), source },
        }
    }
}

/// The flat file all expense records live in
///
/// The store keeps nothing in memory. Every [`Store::load`] reads the whole
/// file and every [`Store::save`] rewrites it.
#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Creates a store backed by the file at `path`
    /// The file does not have to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all records in file order
    ///
    /// A missing file is an empty store. Columns are matched by their header,
    /// so reordered or additional columns are fine, but a row with a different
    /// number of fields than the header fails the whole load.
    pub fn load(&self) -> Result<Vec<Record>, StoreError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_path(&self.path);
        let mut reader = match reader {
            Ok(reader) => reader,
            Err(err) if is_not_found(&err) => {
                debug!("{} does not exist yet, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::csv(&self.path, err)),
        };
        let records = reader
            .deserialize()
            .collect::<Result<Vec<Record>, _>>()
            .map_err(|err| StoreError::csv(&self.path, err))?;

        debug!("loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Replaces the content of the file with `records`
    ///
    /// The records are written to a sibling file first, which is then renamed
    /// over the backing file.
    pub fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        let tmp_path = self.tmp_path();

        // `serialize` only emits the header with the first record
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp_path)
            .map_err(|err| StoreError::csv(&tmp_path, err))?;
        writer
            .write_record(HEADERS)
            .map_err(|err| StoreError::csv(&tmp_path, err))?;
        for record in records {
            writer
                .serialize(record)
                .map_err(|err| StoreError::csv(&tmp_path, err))?;
        }
        writer
            .flush()
            .map_err(|err| StoreError::io(&tmp_path, err))?;
        drop(writer);

        std::fs::rename(&tmp_path, &self.path).map_err(|err| StoreError::io(&self.path, err))?;

        debug!("saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Only a missing file counts as an empty store, any other failure to open it doesn't
fn is_not_found(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Io(err) if err.kind() == io::ErrorKind::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, category: &str, description: &str, amount: &str) -> Record {
        Record {
            date: date.into(),
            category: category.into(),
            description: description.into(),
            amount: amount.into(),
        }
    }

    fn store_with(content: &str) -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.csv");
        std::fs::write(&path, content).unwrap();
        (dir, Store::new(path))
    }

    macro_rules! load_test {
        (
            $name:ident
            $content:literal
            $expected:expr
        ) => {
            #[test]
            fn $name() {
                let (_dir, store) = store_with($content);
                assert_eq!(store.load().unwrap(), $expected);
            }
        };
    }

    macro_rules! malformed_test {
        (
            $name:ident
            $content:literal
        ) => {
            #[test]
            fn $name() {
                let (_dir, store) = store_with($content);
                let err = store.load().unwrap_err();
                assert!(matches!(err, StoreError::Parse { .. }), "unexpected error {:?}", err);
            }
        };
    }

    load_test!(single_row
        "Date,Category,Description,Amount\n2024-01-15,Groceries,Weekly shopping,54.32\n"
        vec![record("2024-01-15", "Groceries", "Weekly shopping", "54.32")]
    );
    load_test!(keeps_file_order
        "Date,Category,Description,Amount\n2024-01-02,B,second,2.00\n2024-01-01,A,first,1.00\n2024-01-03,C,third,3.00\n"
        vec![
            record("2024-01-02", "B", "second", "2.00"),
            record("2024-01-01", "A", "first", "1.00"),
            record("2024-01-03", "C", "third", "3.00"),
        ]
    );
    load_test!(header_only
        "Date,Category,Description,Amount\n"
        Vec::<Record>::new()
    );
    load_test!(reordered_columns
        "Amount,Date,Description,Category\n1.50,2024-02-01,Bus ticket,Travel\n"
        vec![record("2024-02-01", "Travel", "Bus ticket", "1.50")]
    );
    load_test!(padded_headers
        "Date, Category, Description, Amount\n2024-02-01,Travel,Bus ticket,1.50\n"
        vec![record("2024-02-01", "Travel", "Bus ticket", "1.50")]
    );
    load_test!(unknown_column
        "Date,Category,Description,Amount,Notes\n2024-02-01,Travel,Bus ticket,1.50,late\n"
        vec![record("2024-02-01", "Travel", "Bus ticket", "1.50")]
    );
    load_test!(missing_category_column
        "Date,Description,Amount\n2024-02-01,Bus ticket,1.50\n"
        vec![record("2024-02-01", "", "Bus ticket", "1.50")]
    );
    load_test!(quoted_comma
        "Date,Category,Description,Amount\n2024-02-01,Food,\"Bread, butter\",3.10\n"
        vec![record("2024-02-01", "Food", "Bread, butter", "3.10")]
    );
    load_test!(unparseable_amount_is_kept
        "Date,Category,Description,Amount\n2024-02-01,Food,Mystery,bad\n"
        vec![record("2024-02-01", "Food", "Mystery", "bad")]
    );

    malformed_test!(missing_field
        "Date,Category,Description,Amount\n2024-01-15,Groceries,54.32\n"
    );
    malformed_test!(extra_field
        "Date,Category,Description,Amount\n2024-01-15,Groceries,Weekly shopping,54.32,oops\n"
    );
    malformed_test!(missing_required_column
        "Date,Category,Description\n2024-01-15,Groceries,Weekly shopping\n"
    );

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("expenses.csv"));

        assert_eq!(store.load().unwrap(), Vec::<Record>::new());
        assert!(!store.path().exists());
    }

    #[test]
    fn save_writes_header_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("expenses.csv"));

        store
            .save(&[
                record("2024-01-15", "Groceries", "Weekly shopping", "54.32"),
                record("2024-01-16", "Fuel", "Gas, premium", "40.00"),
            ])
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "Date,Category,Description,Amount\n\
             2024-01-15,Groceries,Weekly shopping,54.32\n\
             2024-01-16,Fuel,\"Gas, premium\",40.00\n",
        );
    }

    #[test]
    fn save_empty_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("expenses.csv"));

        store.save(&[]).unwrap();

        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "Date,Category,Description,Amount\n",
        );
        assert_eq!(store.load().unwrap(), Vec::<Record>::new());
    }

    #[test]
    fn save_replaces_content() {
        let (dir, store) = store_with(
            "Date,Category,Description,Amount\n2024-01-15,Groceries,Weekly shopping,54.32\n",
        );

        store.save(&[record("2024-03-01", "Rent", "March", "900.00")]).unwrap();

        assert_eq!(store.load().unwrap(), vec![record("2024-03-01", "Rent", "March", "900.00")]);
        let files = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 1, "the temporary file should be gone");
    }

    #[test]
    fn save_of_load_is_idempotent() {
        let content = "Date,Category,Description,Amount\n\
                       2024-01-15,Groceries,Weekly shopping,54.32\n\
                       2024-01-16,Fuel,\"Gas, premium\",40.00\n\
                       2024-01-17,Gifts,\"A \"\"quoted\"\" card\",-3.50\n";
        let (_dir, store) = store_with(content);

        store.save(&store.load().unwrap()).unwrap();

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), content);
    }

    #[test]
    fn file_as_parent_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("plainfile");
        std::fs::write(&parent, "not a directory").unwrap();
        let store = Store::new(parent.join("expenses.csv"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }), "unexpected error {:?}", err);
        let err = store.save(&[]).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }), "unexpected error {:?}", err);
    }

    #[test]
    fn unwritable_location_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("missing").join("expenses.csv"));

        let err = store.save(&[]).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }), "unexpected error {:?}", err);
    }
}
