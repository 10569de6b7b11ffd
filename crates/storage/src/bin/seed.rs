use std::fmt;
use std::path::PathBuf;

use pylearn_core::{Catalog, ProgressTracker};
use storage::repository::{ProgressDocument, Storage};

#[derive(Debug, Clone)]
enum Target {
    Sqlite(String),
    JsonDir(PathBuf),
}

#[derive(Debug, Clone)]
struct Args {
    target: Target,
    completed: u32,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCompleted { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCompleted { raw } => write!(f, "invalid --completed value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut target = std::env::var("PYLEARN_DB_URL").map_or_else(
            |_| {
                Target::JsonDir(
                    std::env::var("PYLEARN_DATA_DIR")
                        .map_or_else(|_| PathBuf::from("pylearn-data"), PathBuf::from),
                )
            },
            Target::Sqlite,
        );
        let mut completed = 5;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    target = Target::Sqlite(value);
                }
                "--data" => {
                    let value = require_value(&mut args, "--data")?;
                    target = Target::JsonDir(PathBuf::from(value));
                }
                "--completed" => {
                    let value = require_value(&mut args, "--completed")?;
                    completed = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidCompleted { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { target, completed })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data <dir>              JSON data directory (default: pylearn-data)");
    eprintln!("  --db <sqlite_url>         Use SQLite instead of JSON files");
    eprintln!("  --completed <n>           Lessons to mark done from the start (default: 5)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  PYLEARN_DATA_DIR, PYLEARN_DB_URL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = match &args.target {
        Target::Sqlite(url) => Storage::sqlite(url).await?,
        Target::JsonDir(dir) => Storage::json_dir(dir),
    };

    let catalog = Catalog::python_course();
    let tracker = ProgressTracker::new(&catalog);
    let mut record = tracker.default_record();

    // Complete lessons in course order, leaving the cursor on the next one.
    let mut done = 0;
    while done < args.completed {
        record.mark_completed();
        done += 1;
        if !tracker.advance(&mut record)? {
            break;
        }
    }

    storage
        .progress
        .save_progress(&ProgressDocument::from_record(&record))
        .await?;

    eprintln!(
        "seeded {done} completed lessons; cursor at {} day {} ({:?})",
        record.current_week, record.current_day, args.target
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
