mod args;
mod render;

use pylearn_core::model::NotificationSettingsDraft;
use services::{AppServices, Clock, ProceedOutcome, ProgressServiceError};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, ArgsError, Backend, Command, RemindUpdate, print_usage};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("PYLEARN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(
        |e| {
            eprintln!("{e}");
            print_usage();
            e
        },
    )?;

    if args.command == Command::Help {
        print_usage();
        return Ok(());
    }

    init_tracing(args.verbose);

    // Storage is opened here so the library crates never see CLI paths.
    let services = match &args.backend {
        Backend::Json(dir) => {
            tracing::debug!(dir = %dir.display(), "using json storage");
            AppServices::new_json(dir, Clock::system())
        }
        Backend::Sqlite(url) => {
            prepare_sqlite_file(url)?;
            AppServices::new_sqlite(url, Clock::system()).await?
        }
    };

    let progress = services.progress();
    let reminders = services.reminders();

    match args.command {
        Command::Status => {
            let record = progress.load_checked().await?;
            let lesson = progress.current_lesson(&record).ok_or_else(|| {
                ProgressServiceError::UnknownLesson {
                    week: record.current_week.clone(),
                    day: record.current_day,
                }
            })?;
            print!(
                "{}",
                render::status(
                    &record,
                    lesson,
                    progress.is_unlocked(&record),
                    progress.is_finished(&record)?,
                    &progress.summary(&record),
                )
            );
            if let Some(quote) = progress.motivational_quote() {
                println!("{quote}");
            }
        }
        Command::Lesson { week, day } => {
            let record = progress.load().await?;
            let week = week.unwrap_or_else(|| record.current_week.clone());
            let day = day.unwrap_or(record.current_day);
            let lesson = progress.catalog().lesson_at(&week, day).ok_or_else(|| {
                ProgressServiceError::UnknownLesson {
                    week: week.clone(),
                    day,
                }
            })?;
            print!(
                "{}",
                render::lesson(&week, day, lesson, record.is_day_completed(&week, day))
            );
        }
        Command::Weeks => {
            let record = progress.load().await?;
            print!("{}", render::weeks(progress.catalog(), &record));
        }
        Command::Complete => {
            let record = progress.complete_current().await?;
            println!(
                "Marked {}, day {} as done.",
                record.current_week, record.current_day
            );
            if let Some(quote) = progress.motivational_quote() {
                println!("{quote}");
            }
        }
        Command::Toggle { week, day } => {
            let week = match week {
                Some(week) => week,
                None => progress.load_checked().await?.current_week,
            };
            let (_, completed) = progress.toggle_day(&week, day).await?;
            let state = if completed { "done" } else { "not done" };
            println!("{week}, day {day} is now {state}.");
        }
        Command::Next => {
            let result = progress.proceed().await?;
            let record = &result.record;
            println!("{}", render::proceed(result.outcome, record));
            if result.outcome == ProceedOutcome::Advanced {
                if let Some(lesson) = progress.current_lesson(record) {
                    print!(
                        "{}",
                        render::lesson(
                            &record.current_week,
                            record.current_day,
                            lesson,
                            progress.is_unlocked(record),
                        )
                    );
                }
            }
        }
        Command::Reset => {
            let record = progress.reset().await?;
            println!(
                "Progress cleared. Back to {}, day {}.",
                record.current_week, record.current_day
            );
        }
        Command::Quote => {
            if let Some(quote) = progress.motivational_quote() {
                println!("{quote}");
            }
        }
        Command::Remind(update) => {
            let current = reminders.load().await?;
            let settings = if update.is_empty() {
                current
            } else {
                reminders.save(apply_update(current.to_draft(), &update)).await?
            };
            let next = reminders.next_reminder(&settings);
            println!("{}", render::reminder(&settings, next.as_ref()));
            if settings.enabled() {
                if let Some(message) = reminders.reminder_message() {
                    println!("{message}");
                }
            }
        }
        Command::Help => print_usage(),
    }

    Ok(())
}

fn apply_update(
    mut draft: NotificationSettingsDraft,
    update: &RemindUpdate,
) -> NotificationSettingsDraft {
    if let Some(enabled) = update.enabled {
        draft.enabled = enabled;
    }
    if let Some((hour, minute)) = update.at {
        draft.hour = hour;
        draft.minute = minute;
    }
    draft
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        if matches!(
            err.downcast_ref::<ProgressServiceError>(),
            Some(ProgressServiceError::Tracker(_))
        ) {
            eprintln!("Stored progress does not match the course; `pylearn reset` starts over.");
        }
        std::process::exit(2);
    }
}
