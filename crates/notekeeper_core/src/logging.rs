//! Logger setup for the notekeeper process.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend once, writing to stderr or to a
//!   rotating file set.
//! - Report panics through the same log stream.
//!
//! # Invariants
//! - A second `init_logging` call with identical settings is a no-op.
//! - A second call with different settings fails and leaves the active
//!   logger untouched.
//! - Setup errors are returned to the caller, never raised as panics.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::fmt::{Display, Formatter};
use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "notekeeper";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 5;
const PANIC_TEXT_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    Stderr,
    Directory(PathBuf),
}

impl Destination {
    fn parse(log_dir: Option<&str>) -> Result<Self, String> {
        let Some(raw) = log_dir.map(str::trim) else {
            return Ok(Self::Stderr);
        };
        if raw.is_empty() {
            return Err("log directory is empty".to_string());
        }
        let dir = PathBuf::from(raw);
        if dir.is_relative() {
            return Err(format!("log directory `{raw}` is not an absolute path"));
        }
        Ok(Self::Directory(dir))
    }

    fn dir(&self) -> Option<&Path> {
        match self {
            Self::Stderr => None,
            Self::Directory(dir) => Some(dir),
        }
    }
}

impl Display for Destination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => f.write_str("stderr"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    level: LevelFilter,
    destination: Destination,
}

struct ActiveLogger {
    settings: Settings,
    _handle: LoggerHandle,
}

/// Starts process logging at `level`.
///
/// `log_dir = None` logs to stderr. `Some(dir)` writes size-rotated files
/// named `notekeeper*.log` under the absolute directory `dir`.
///
/// # Errors
/// - `level` is not one of trace, debug, info, warn (or warning), error.
/// - `log_dir` is empty, relative, or cannot be created.
/// - Logging is already running with other settings.
/// - The backend refuses to start.
pub fn init_logging(level: &str, log_dir: Option<&str>) -> Result<(), String> {
    let wanted = Settings {
        level: parse_level(level)?,
        destination: Destination::parse(log_dir)?,
    };

    let active = ACTIVE.get_or_try_init(|| start(wanted.clone()))?;
    if active.settings == wanted {
        return Ok(());
    }
    Err(format!(
        "logger is running with level={} destination={}; cannot reconfigure to level={} destination={}",
        active.settings.level.as_str().to_ascii_lowercase(),
        active.settings.destination,
        wanted.level.as_str().to_ascii_lowercase(),
        wanted.destination
    ))
}

/// Level and log directory of the running logger, `None` before init.
pub fn logging_status() -> Option<(LevelFilter, Option<PathBuf>)> {
    ACTIVE.get().map(|active| {
        (
            active.settings.level,
            active.settings.destination.dir().map(Path::to_path_buf),
        )
    })
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(settings: Settings) -> Result<ActiveLogger, String> {
    let spec = LogSpecification::builder()
        .default(settings.level)
        .build();
    let logger = Logger::with(spec);

    let logger = match &settings.destination {
        Destination::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format),
        Destination::Directory(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEPT_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
    };
    let handle = logger
        .start()
        .map_err(|err| format!("logger backend did not start: {err}"))?;

    let forward = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        log_panic(panic);
        forward(panic);
    }));

    info!(
        "event=logging_init module=core status=ok level={} destination={} version={} os={}",
        settings.level.as_str().to_ascii_lowercase(),
        settings.destination,
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<LevelFilter, String> {
    let trimmed = level.trim();
    if trimmed.eq_ignore_ascii_case("warning") {
        return Ok(LevelFilter::Warn);
    }
    match trimmed.parse::<LevelFilter>() {
        Ok(LevelFilter::Off) | Err(_) => Err(format!(
            "unknown log level `{trimmed}` (use trace, debug, info, warn or error)"
        )),
        Ok(parsed) => Ok(parsed),
    }
}

fn log_panic(panic: &PanicHookInfo<'_>) {
    let at = match panic.location() {
        Some(location) => format!("{}:{}", location.file(), location.line()),
        None => "unknown".to_string(),
    };
    let payload = panic.payload();
    let text = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string payload>");
    error!(
        "event=panic module=core status=error location={at} message={}",
        single_line(text, PANIC_TEXT_LIMIT)
    );
}

/// Joins `text` onto one line and cuts it at `limit` characters.
fn single_line(text: &str, limit: usize) -> String {
    let joined = text.split(['\r', '\n']).collect::<Vec<_>>().join(" ");
    match joined.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &joined[..cut]),
        None => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, parse_level, single_line, Destination};
    use log::LevelFilter;
    use std::path::PathBuf;

    #[test]
    fn level_names_are_case_insensitive_and_accept_warning() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level(" warning ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("trace").unwrap(), LevelFilter::Trace);
        assert!(parse_level("off").is_err());
        assert!(parse_level("verbose").is_err());
    }

    #[test]
    fn destination_requires_absolute_directory() {
        assert_eq!(Destination::parse(None).unwrap(), Destination::Stderr);
        assert!(Destination::parse(Some("  ")).is_err());
        let err = Destination::parse(Some("logs/dev")).unwrap_err();
        assert!(err.contains("absolute"));
    }

    #[test]
    fn single_line_flattens_and_caps_text() {
        assert_eq!(single_line("a\nb\r\nc", 80), "a b  c");
        assert_eq!(single_line("abcdefgh", 4), "abcd...");
        assert_eq!(single_line("abcd", 4), "abcd");
    }

    #[test]
    fn second_init_must_match_running_settings() {
        // The logger outlives this test, so its directory must too.
        let root = tempfile::Builder::new()
            .prefix("notekeeper-logging")
            .tempdir()
            .unwrap()
            .into_path();
        let log_dir_str = root.join("logs").to_str().unwrap().to_string();
        let other_dir = root.join("other");

        init_logging("info", Some(&log_dir_str)).unwrap();
        init_logging("INFO", Some(&log_dir_str)).unwrap();

        let err = init_logging("debug", Some(&log_dir_str)).unwrap_err();
        assert!(err.contains("cannot reconfigure"));
        let err = init_logging("info", Some(other_dir.to_str().unwrap())).unwrap_err();
        assert!(err.contains("cannot reconfigure"));
        let err = init_logging("info", None).unwrap_err();
        assert!(err.contains("destination=stderr"));

        assert_eq!(
            logging_status(),
            Some((LevelFilter::Info, Some(PathBuf::from(&log_dir_str))))
        );
    }
}
