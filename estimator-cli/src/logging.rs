//! Log output for the terminal estimator.
//!
//! Events go to stderr so they never mix with the wizard's prompts, and
//! optionally to a log file that can be attached after start-up. The level
//! filter is reloadable so `--verbose` and the settings file can change it
//! once the subscriber is installed.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, reload};

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Local wall-clock timestamp, level, source location, then the fields.
struct LocalTimeFormat;

fn level_colour(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LocalTimeFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let level = *meta.level();
        let location = meta
            .file()
            .zip(meta.line())
            .map(|(file, line)| (file.trim_start_matches("src/"), line));

        if writer.has_ansi_escapes() {
            write!(writer, "{DIM}{stamp}{RESET} {}{level:>5}{RESET} ", level_colour(level))?;
            if let Some((file, line)) = location {
                write!(writer, "{CYAN}{file}:{line}{RESET} ")?;
            }
        } else {
            write!(writer, "{stamp} {level:>5} ")?;
            if let Some((file, line)) = location {
                write!(writer, "{file}:{line} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type SharedFile = Arc<Mutex<Option<File>>>;

/// Writer target that discards output until a file is attached.
#[derive(Clone)]
struct LogFile(SharedFile);

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

type ReloadFn = Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>;

static RELOAD_LEVEL: OnceLock<ReloadFn> = OnceLock::new();
static LOG_FILE: OnceLock<SharedFile> = OnceLock::new();

/// `RUST_LOG` when set, otherwise `default_level`.
fn initial_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(default_level: &str) {
    let file: SharedFile = Arc::new(Mutex::new(None));
    let (level_filter, level_handle) = reload::Layer::new(initial_filter(default_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(false)
        .with_writer(LogFile(file.clone()));

    let installed = tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        let _ = LOG_FILE.set(file);
        let _ = RELOAD_LEVEL.set(Box::new(move |filter| {
            level_handle
                .reload(filter)
                .map_err(|e| anyhow!("filter reload failed: {e}"))
        }));
    }
}

/// Replaces the active filter. Accepts a bare level ("debug") or any
/// `EnvFilter` directive.
pub fn set_log_level(level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?;
    match RELOAD_LEVEL.get() {
        Some(reload) => reload(filter),
        None => bail!("logging not yet initialized"),
    }
}

/// Appends log output to `path`, replacing any file attached earlier.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    let Some(slot) = LOG_FILE.get() else {
        bail!("logging not yet initialized");
    };
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(())
}
