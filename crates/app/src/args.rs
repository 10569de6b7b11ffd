use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "pylearn-data";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    UnexpectedFlag { flag: &'static str, command: &'static str },
    MissingDay,
    InvalidDay { raw: String },
    InvalidTime { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::UnexpectedFlag { flag, command } => {
                write!(f, "{flag} is not accepted by `{command}`")
            }
            ArgsError::MissingDay => write!(f, "toggle requires --day <n>"),
            ArgsError::InvalidDay { raw } => write!(f, "invalid --day value: {raw}"),
            ArgsError::InvalidTime { raw } => write!(f, "invalid --at value (expected HH:MM): {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Json(PathBuf),
    Sqlite(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemindUpdate {
    pub enabled: Option<bool>,
    pub at: Option<(u32, u32)>,
}

impl RemindUpdate {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.at.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status,
    Lesson { week: Option<String>, day: Option<u32> },
    Weeks,
    Complete,
    Toggle { week: Option<String>, day: u32 },
    Next,
    Reset,
    Quote,
    Remind(RemindUpdate),
    Help,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Status => "status",
            Command::Lesson { .. } => "lesson",
            Command::Weeks => "weeks",
            Command::Complete => "complete",
            Command::Toggle { .. } => "toggle",
            Command::Next => "next",
            Command::Reset => "reset",
            Command::Quote => "quote",
            Command::Remind(_) => "remind",
            Command::Help => "help",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub backend: Backend,
    pub verbose: bool,
    pub command: Command,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  pylearn [--data <dir> | --db <sqlite_url>] [-v] <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  status                        Current lesson and overall progress (default)");
    eprintln!("  lesson [--week <w>] [--day <n>]");
    eprintln!("                                Show a lesson (defaults to the current one)");
    eprintln!("  weeks                         List weeks with completion counts");
    eprintln!("  complete                      Mark the current lesson as done");
    eprintln!("  toggle [--week <w>] --day <n> Flip completion of any lesson");
    eprintln!("  next                          Move on if the current lesson is done");
    eprintln!("  reset                         Start the course over");
    eprintln!("  quote                         Print a motivational quote");
    eprintln!("  remind [--on|--off] [--at HH:MM]");
    eprintln!("                                Show or change the daily reminder");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data {DEFAULT_DATA_DIR}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PYLEARN_DATA_DIR, PYLEARN_DB_URL, PYLEARN_LOG");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_day(raw: String) -> Result<u32, ArgsError> {
    match raw.parse::<u32>() {
        Ok(day) if day > 0 => Ok(day),
        _ => Err(ArgsError::InvalidDay { raw }),
    }
}

fn parse_time(raw: String) -> Result<(u32, u32), ArgsError> {
    let parsed = raw.split_once(':').and_then(|(h, m)| {
        let hour = h.trim().parse::<u32>().ok()?;
        let minute = m.trim().parse::<u32>().ok()?;
        Some((hour, minute))
    });
    parsed.ok_or(ArgsError::InvalidTime { raw })
}

impl Args {
    /// Parse arguments (without the program name); `env` supplies defaults.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut backend = match env("PYLEARN_DB_URL") {
            Some(url) => Backend::Sqlite(normalize_sqlite_url(url)),
            None => Backend::Json(
                env("PYLEARN_DATA_DIR").map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            ),
        };
        let mut verbose = false;
        let mut subcommand: Option<String> = None;
        let mut week: Option<String> = None;
        let mut day: Option<u32> = None;
        let mut remind = RemindUpdate::default();

        let mut args = argv.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => {
                    let value = require_value(&mut args, "--data")?;
                    backend = Backend::Json(PathBuf::from(value));
                }
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    backend = Backend::Sqlite(normalize_sqlite_url(value));
                }
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => subcommand = Some("help".into()),
                "--week" => week = Some(require_value(&mut args, "--week")?),
                "--day" => day = Some(parse_day(require_value(&mut args, "--day")?)?),
                "--on" => remind.enabled = Some(true),
                "--off" => remind.enabled = Some(false),
                "--at" => remind.at = Some(parse_time(require_value(&mut args, "--at")?)?),
                other if other.starts_with('-') => return Err(ArgsError::UnknownArg(arg)),
                _ if subcommand.is_none() => subcommand = Some(arg),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let command = match subcommand.as_deref().unwrap_or("status") {
            "status" => Command::Status,
            "lesson" => Command::Lesson {
                week: week.take(),
                day: day.take(),
            },
            "weeks" => Command::Weeks,
            "complete" => Command::Complete,
            "toggle" => Command::Toggle {
                week: week.take(),
                day: day.take().ok_or(ArgsError::MissingDay)?,
            },
            "next" => Command::Next,
            "reset" => Command::Reset,
            "quote" => Command::Quote,
            "remind" => Command::Remind(std::mem::take(&mut remind)),
            "help" => Command::Help,
            other => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };

        let leftover = if week.is_some() {
            Some("--week")
        } else if day.is_some() {
            Some("--day")
        } else if remind.enabled.is_some() {
            Some(if remind.enabled == Some(true) { "--on" } else { "--off" })
        } else if remind.at.is_some() {
            Some("--at")
        } else {
            None
        };
        if let Some(flag) = leftover {
            return Err(ArgsError::UnexpectedFlag {
                flag,
                command: command.name(),
            });
        }

        Ok(Self {
            backend,
            verbose,
            command,
        })
    }
}

/// Turn `sqlite:path` or a bare path into an absolute `sqlite://` URL.
pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(argv.iter().map(|s| (*s).to_string()), |_| None)
    }

    #[test]
    fn no_arguments_shows_status_from_default_dir() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.command, Command::Status);
        assert_eq!(args.backend, Backend::Json(PathBuf::from(DEFAULT_DATA_DIR)));
        assert!(!args.verbose);
    }

    #[test]
    fn environment_selects_backend() {
        let args = Args::parse(Vec::new(), |key| {
            (key == "PYLEARN_DATA_DIR").then(|| "/tmp/progress".to_string())
        })
        .unwrap();
        assert_eq!(args.backend, Backend::Json(PathBuf::from("/tmp/progress")));

        let args = Args::parse(Vec::new(), |key| {
            (key == "PYLEARN_DB_URL").then(|| "sqlite:///var/lib/pylearn.db".to_string())
        })
        .unwrap();
        assert_eq!(
            args.backend,
            Backend::Sqlite("sqlite:///var/lib/pylearn.db".into())
        );
    }

    #[test]
    fn global_flags_may_follow_the_command() {
        let args = parse(&["next", "--data", "elsewhere", "-v"]).unwrap();
        assert_eq!(args.command, Command::Next);
        assert_eq!(args.backend, Backend::Json(PathBuf::from("elsewhere")));
        assert!(args.verbose);
    }

    #[test]
    fn toggle_needs_a_day() {
        assert_eq!(parse(&["toggle"]), Err(ArgsError::MissingDay));
        let args = parse(&["toggle", "--week", "W", "--day", "2"]).unwrap();
        assert_eq!(
            args.command,
            Command::Toggle {
                week: Some("W".into()),
                day: 2
            }
        );
    }

    #[test]
    fn day_must_be_positive() {
        assert_eq!(
            parse(&["lesson", "--day", "0"]),
            Err(ArgsError::InvalidDay { raw: "0".into() })
        );
    }

    #[test]
    fn remind_parses_switch_and_time() {
        let args = parse(&["remind", "--off", "--at", "07:45"]).unwrap();
        assert_eq!(
            args.command,
            Command::Remind(RemindUpdate {
                enabled: Some(false),
                at: Some((7, 45)),
            })
        );
        assert_eq!(
            parse(&["remind", "--at", "seven"]),
            Err(ArgsError::InvalidTime { raw: "seven".into() })
        );
    }

    #[test]
    fn flags_are_checked_against_the_command() {
        assert_eq!(
            parse(&["next", "--day", "3"]),
            Err(ArgsError::UnexpectedFlag {
                flag: "--day",
                command: "next"
            })
        );
        assert_eq!(
            parse(&["dance"]),
            Err(ArgsError::UnknownCommand("dance".into()))
        );
        assert_eq!(
            parse(&["status", "extra"]),
            Err(ArgsError::UnknownArg("extra".into()))
        );
    }

    #[test]
    fn sqlite_urls_are_made_absolute() {
        assert_eq!(
            normalize_sqlite_url("sqlite::memory:".into()),
            "sqlite::memory:"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite:/data/p.db".into()),
            "sqlite:///data/p.db"
        );
        assert!(normalize_sqlite_url("p.db".into()).starts_with("sqlite:///"));
    }
}
