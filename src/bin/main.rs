use std::{
    io::{self, BufRead, Write},
    num::NonZeroUsize,
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use env_logger::Env;

use expense_tracker::{today, view, ExpenseInput, ExpenseTracker, Record, Store, Totals, TrackerError};

/// A cli interface to the expense tracker
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The path to the expense CSV file
    #[clap(long, env = "EXPENSE_TRACKER_FILE", default_value = "expenses.csv")]
    file: PathBuf,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lists all expenses and their totals (the default)
    List,
    /// Adds a new expense, the date defaults to today
    Add(Form),
    /// Shows the expense at a position as it would be edited
    Show {
        /// The position as shown by `list`
        position: NonZeroUsize,
    },
    /// Replaces the expense at a position
    ///
    /// Fields that are not given keep their current value.
    Update {
        /// The position as shown by `list`
        position: NonZeroUsize,
        #[clap(flatten)]
        form: Form,
    },
    /// Deletes the expense at a position
    Delete {
        /// The position as shown by `list`
        position: NonZeroUsize,
        /// Don't ask for confirmation
        #[clap(short, long)]
        yes: bool,
    },
    /// Prints only the totals
    Summary,
}

/// The fields of the entry form
#[derive(Debug, clap::Args)]
struct Form {
    #[clap(long)]
    date: Option<String>,
    #[clap(long)]
    category: Option<String>,
    #[clap(long)]
    description: Option<String>,
    #[clap(long)]
    amount: Option<String>,
}

impl Form {
    /// Overwrites the fields of `input` with the ones given on the command line
    fn fill(self, mut input: ExpenseInput) -> ExpenseInput {
        if let Some(date) = self.date {
            input.date = date;
        }
        if let Some(category) = self.category {
            input.category = category;
        }
        if let Some(description) = self.description {
            input.description = description;
        }
        if let Some(amount) = self.amount {
            input.amount = amount;
        }
        input
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let tracker = ExpenseTracker::new(Store::new(args.file));

    match args.command.unwrap_or(Command::List) {
        Command::List => refresh(&tracker)?,
        Command::Summary => println!("{}", tracker.totals()?),
        Command::Add(form) => {
            let input = form.fill(ExpenseInput::cleared(&today()));
            tracker.add(&input)?;
            println!("Expense added.");
            refresh(&tracker)?;
        }
        Command::Show { position } => match tracker.get(index(position))? {
            Some(record) => println!("{}", view::form_text(&ExpenseInput::from(&record))),
            None => println!("No expense at position {}", position),
        },
        Command::Update { position, form } => {
            let record = selected(&tracker, position)?;
            let input = form.fill(ExpenseInput::from(&record));
            resync(&tracker, tracker.update(index(position), &input))?;
            println!("Expense updated.");
            refresh(&tracker)?;
        }
        Command::Delete { position, yes } => {
            let record = selected(&tracker, position)?;
            println!("{}", record);
            if !yes && !confirm("Are you sure you want to delete the selected expense?")? {
                return Ok(());
            }
            let deleted = resync(&tracker, tracker.delete(index(position)))?;
            println!("Deleted: {}", deleted);
            refresh(&tracker)?;
        }
    }

    Ok(())
}

/// Converts a position as shown to the user into a record index
fn index(position: NonZeroUsize) -> usize {
    position.get() - 1
}

/// Prints all records and the totals
fn refresh(tracker: &ExpenseTracker) -> anyhow::Result<()> {
    let records = tracker.records()?;
    println!("{}", view::records_table(&records));
    println!("{}", Totals::compute(&records));
    Ok(())
}

/// Looks up the record the user selected
fn selected(tracker: &ExpenseTracker, position: NonZeroUsize) -> anyhow::Result<Record> {
    let index = index(position);
    let result = match tracker.get(index) {
        Ok(Some(record)) => Ok(record),
        Ok(None) => tracker
            .records()
            .and_then(|records| Err(TrackerError::NotFound { position: index, len: records.len() })),
        Err(err) => Err(err),
    };
    resync(tracker, result)
}

/// Passes results through, but redraws the records when a position went stale
fn resync<T>(tracker: &ExpenseTracker, result: Result<T, TrackerError>) -> anyhow::Result<T> {
    match result {
        Err(TrackerError::NotFound { position, len }) => {
            eprintln!("Selected item no longer exists.");
            refresh(tracker)?;
            Err(anyhow::anyhow!(view::stale_position(position, len)))
        }
        result => Ok(result?),
    }
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
