//! Run-scoped logging: one file sink plus a console sink.
//!
//! The subscriber is built explicitly and handed back to the caller rather
//! than registered behind the module's back; `init_global` installs it
//! process-wide at most once and errors on a second call.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::{expand_path, RunConfig};
use crate::error::{Error, Result};
use crate::types::RunMode;

/// Keeps the log file handle alive for the lifetime of the run.
pub struct LogGuard {
    path: PathBuf,
    _file: Arc<File>,
}

impl LogGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `MMDD-HHMM`, zero-padded, local clock.
pub fn timestamp() -> String {
    Local::now().format("%m%d-%H%M").to_string()
}

/// File name for a run log. Finetune runs carry the training dataset in
/// the name; every other mode is `{mode}_{model}_{stamp}.log`.
pub fn log_file_name(mode: &RunMode, config: &RunConfig, stamp: &str) -> String {
    if mode.is_finetune() {
        let train_data = config.train_data.as_deref().unwrap_or("unknown");
        format!(
            "{}_{}_{}_{}.log",
            mode.as_str(),
            config.model,
            train_data,
            stamp
        )
    } else {
        format!("{}_{}_{}.log", mode.as_str(), config.model, stamp)
    }
}

/// `<date time> <LEVEL padded to 8> <message>` lines for the file sink.
struct FileFormat;

impl<S, N> FormatEvent<S, N> for FileFormat
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
        write!(
            writer,
            "{} {:<8} ",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            event.metadata().level().as_str()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Bare message wrapped in a fixed ANSI escape for the console sink. The
/// escape is emitted unconditionally; terminals without ANSI support show
/// it as text.
struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
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
        write!(writer, "\x1b[38;20m ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer, "\x1b[0m")
    }
}

/// Build the two-sink subscriber for a run without installing it.
///
/// The log file is created (truncating any previous file at the same
/// path) under the expanded `log_dir`. A missing or unwritable `log_dir`
/// is fatal and propagated; the directory is never created here.
///
/// Minimum severity is `info`, overridable through `RUST_LOG`.
pub fn build(
    config: &RunConfig,
    mode: &RunMode,
) -> Result<(impl Subscriber + Send + Sync, LogGuard)> {
    let log_dir = expand_path(config.log_dir.to_string_lossy());
    let path = log_dir.join(log_file_name(mode, config, &timestamp()));
    let file = Arc::new(File::create(&path)?);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(FileFormat)
        .with_writer(Arc::clone(&file));
    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(ConsoleFormat)
        .with_writer(std::io::stdout);

    let subscriber = Registry::default()
        .with(filter)
        .with(file_layer)
        .with(console_layer);

    Ok((subscriber, LogGuard { path, _file: file }))
}

/// Install the run subscriber process-wide. Calling this twice is an
/// error rather than a second set of duplicate sinks.
pub fn init_global(config: &RunConfig, mode: &RunMode) -> Result<LogGuard> {
    let (subscriber, guard) = build(config, mode)?;
    tracing::subscriber::set_global_default(subscriber).map_err(|_| Error::AlreadyInitialized)?;
    Ok(guard)
}
