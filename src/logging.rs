use std::fmt::Display;

use colored::Colorize;
use log::{Level, LevelFilter, Metadata, SetLoggerError};

/// External crates only need to log warnings and errors
const EXTERNAL_LEVEL: LevelFilter = LevelFilter::Warn;

/// Installs the logger. Attendtrack's own crates log up to `level`.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    fern::Dispatch::new()
        .format(move |out, message, record| {
            let target = Target::from_target(record.target());
            let now = chrono::Local::now();

            out.finish(format_args!(
                "{:^5} {} {:^8} {}{}",
                level_to_string(&record.level()),
                now.format("%H:%M:%S").to_string().bright_black(),
                target,
                scope(record.target()),
                message
            ))
        })
        .filter(move |meta| is_enabled(meta, level))
        .chain(std::io::stdout())
        .apply()
}

fn is_enabled(meta: &Metadata, level: LevelFilter) -> bool {
    let limit = if Target::from_target(meta.target()).is_local() {
        level
    } else {
        EXTERNAL_LEVEL
    };

    meta.level() <= limit
}

/// The module inside the crate, e.g. "auth" for `attendtrack_collab::auth`
fn scope(target: &str) -> String {
    match target.split_once("::") {
        Some((_, module)) => format!("{} ", module.dimmed()),
        None => String::new(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Target {
    External(String),
    Main,
    Server,
    Collab,
    Core,
}

impl Target {
    fn from_target(target: &str) -> Self {
        let module = target.split("::").next().unwrap_or_default();

        match module {
            "attendtrack" => Self::Main,
            "attendtrack_core" => Self::Core,
            "attendtrack_server" => Self::Server,
            "attendtrack_collab" => Self::Collab,
            other => Target::External(other.to_string()),
        }
    }

    fn is_local(&self) -> bool {
        !matches!(self, Self::External(_))
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = match self {
            Target::External(x) => x.as_str().clear(),
            Target::Main => "MAIN".bright_cyan(),
            Target::Server => "SERVER".bright_green(),
            Target::Collab => "COLLAB".bright_purple(),
            Target::Core => "CORE".blue(),
        };

        Display::fmt(&result, f)
    }
}

fn level_to_string(level: &Level) -> String {
    match level {
        Level::Error => " ERR ".black().on_red().bold().to_string(),
        Level::Warn => " WRN ".black().on_yellow().bold().to_string(),
        Level::Info => " INF ".black().on_blue().bold().to_string(),
        Level::Debug => " DBG ".white().on_black().to_string(),
        Level::Trace => " TRC ".to_string(),
    }
}
