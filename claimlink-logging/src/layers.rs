// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{
    appender,
    error::{Error, Result},
    LogFormat, LogOutputDest, CLAIMLINK_LOG_ENV,
};
use std::collections::BTreeMap;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_core::{Event, Level, Subscriber};
use tracing_subscriber::{
    filter::Targets,
    fmt::{
        self as tracing_fmt,
        format::Writer,
        time::{FormatTime, SystemTime},
        FmtContext, FormatEvent, FormatFields,
    },
    layer::Filter,
    registry::LookupSpan,
    reload::{self, Handle},
    Layer, Registry,
};

const MAX_LOG_SIZE: usize = 20 * 1024 * 1024;
const MAX_UNCOMPRESSED_LOG_FILES: usize = 10;
const MAX_LOG_FILES: usize = 100;
// Everything is logged at TRACE
const ALL_CLAIMLINK_LOGS: &str = "all";
// Everything is logged at DEBUG
const VERBOSE_CLAIMLINK_LOGS: &str = "v";

/// Handle that implements functions to change the log level on the fly.
pub struct ReloadHandle(pub(crate) Handle<Box<dyn Filter<Registry> + Send + Sync>, Registry>);

impl ReloadHandle {
    /// Modify the log level to the provided CSV value
    /// Example input: `claimlink=DEBUG,all,claimlink_cli=ERROR`
    ///
    /// Custom keywords will take less precedence if the same target has been manually specified in the CSV.
    /// `claimlink_cli=ERROR` in the above example will be used instead of the TRACE level set by "all" keyword.
    pub fn modify_log_level(&self, logging_value: &str) -> Result<()> {
        let targets: Vec<(String, Level)> = get_logging_targets(logging_value)?;
        self.0.modify(|old_filter| {
            let new_filter: Box<dyn Filter<Registry> + Send + Sync> =
                Box::new(Targets::new().with_targets(targets));
            *old_filter = new_filter;
        })?;

        Ok(())
    }
}

#[derive(Default)]
/// Tracing log formatter setup for easier span viewing
pub(crate) struct LogFormatter;

impl<S, N> FormatEvent<S, N> for LogFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = *event.metadata().level();
        let module = event.metadata().module_path().unwrap_or("<unknown module>");
        let time = SystemTime;

        write!(writer, "[")?;
        time.format_time(&mut writer)?;
        write!(writer, " {level} {module}")?;
        ctx.visit_spans(|span| write!(writer, "/{}", span.name()))?;
        write!(writer, "] ")?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// The different Subscribers composed into a list of layers
#[derive(Default)]
pub(crate) struct TracingLayers {
    pub(crate) layers: Vec<Box<dyn Layer<Registry> + Send + Sync>>,
    pub(crate) log_appender_guard: Option<WorkerGuard>,
}

impl TracingLayers {
    /// Adds the fmt layer, filtered by `CLAIMLINK_LOG` if it is set, else by the default targets.
    pub(crate) fn fmt_layer(
        &mut self,
        default_logging_targets: Vec<(String, Level)>,
        output_dest: &LogOutputDest,
        format: LogFormat,
        max_uncompressed_log_files: Option<usize>,
        max_compressed_log_files: Option<usize>,
        print_updates_to_stdout: bool,
    ) -> Result<ReloadHandle> {
        let targets = match std::env::var(CLAIMLINK_LOG_ENV) {
            Ok(log_val) => {
                if print_updates_to_stdout {
                    println!("Using {CLAIMLINK_LOG_ENV}={log_val}");
                }
                get_logging_targets(&log_val)?
            }
            Err(_) => default_logging_targets,
        };

        if print_updates_to_stdout {
            match output_dest {
                LogOutputDest::Stdout => println!("Logging to stdout"),
                LogOutputDest::Path(path) => println!("Logging to directory: {path:?}"),
                LogOutputDest::Stderr => {}
            }
        }

        self.fmt_layer_with_targets(
            targets,
            output_dest,
            format,
            max_uncompressed_log_files,
            max_compressed_log_files,
        )
    }

    pub(crate) fn fmt_layer_with_targets(
        &mut self,
        targets: Vec<(String, Level)>,
        output_dest: &LogOutputDest,
        format: LogFormat,
        max_uncompressed_log_files: Option<usize>,
        max_compressed_log_files: Option<usize>,
    ) -> Result<ReloadHandle> {
        let layer = match output_dest {
            LogOutputDest::Stdout => match format {
                LogFormat::Json => tracing_fmt::layer().json().flatten_event(true).boxed(),
                LogFormat::Default => tracing_fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .event_format(LogFormatter)
                    .boxed(),
            },
            LogOutputDest::Stderr => match format {
                LogFormat::Json => tracing_fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr)
                    .boxed(),
                LogFormat::Default => tracing_fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .event_format(LogFormatter)
                    .with_writer(std::io::stderr)
                    .boxed(),
            },
            LogOutputDest::Path(path) => {
                std::fs::create_dir_all(path)?;

                let (max_uncompressed_log_files, max_log_files) =
                    log_file_limits(max_uncompressed_log_files, max_compressed_log_files);
                let (file_rotation, worker_guard) = appender::file_rotater(
                    path,
                    MAX_LOG_SIZE,
                    max_uncompressed_log_files,
                    max_log_files,
                );
                self.log_appender_guard = Some(worker_guard);

                match format {
                    LogFormat::Json => tracing_fmt::layer()
                        .json()
                        .flatten_event(true)
                        .with_writer(file_rotation)
                        .boxed(),
                    LogFormat::Default => tracing_fmt::layer()
                        .with_ansi(false)
                        .with_writer(file_rotation)
                        .event_format(LogFormatter)
                        .boxed(),
                }
            }
        };

        let target_filters: Box<dyn Filter<Registry> + Send + Sync> =
            Box::new(Targets::new().with_targets(targets));

        let (filter, reload_handle) = reload::Layer::new(target_filters);

        let layer = layer.with_filter(filter);
        self.layers.push(Box::new(layer));

        Ok(ReloadHandle(reload_handle))
    }
}

/// Returns `(uncompressed, total)` file counts for the rotating appender.
/// The total always covers the uncompressed files.
fn log_file_limits(
    max_uncompressed_log_files: Option<usize>,
    max_compressed_log_files: Option<usize>,
) -> (usize, usize) {
    let uncompressed = max_uncompressed_log_files.unwrap_or(MAX_UNCOMPRESSED_LOG_FILES);
    let total = match max_compressed_log_files {
        Some(compressed) => compressed.saturating_add(uncompressed),
        None => std::cmp::max(uncompressed, MAX_LOG_FILES),
    };
    (uncompressed, total)
}

/// Every crate of the workspace at the given level.
pub(crate) fn claimlink_targets(level: Level) -> Vec<(String, Level)> {
    vec![
        ("claimlink".to_string(), level),
        ("claimlink_cli".to_string(), level),
        ("claimlink_logging".to_string(), level),
    ]
}

/// Parses the logging targets from the env variable (CLAIMLINK_LOG). The crates should be given as a CSV, for e.g.,
/// `export CLAIMLINK_LOG = claimlink=DEBUG, tokio=INFO, all, claimlink_cli=ERROR`
/// Custom keywords will take less precedence if the same target has been manually specified in the CSV.
fn get_logging_targets(logging_env_value: &str) -> Result<Vec<(String, Level)>> {
    let mut targets = BTreeMap::new();
    let mut contains_keyword_all = false;
    let mut contains_keyword_verbose = false;

    for crate_log_level in logging_env_value.split(',').map(str::trim) {
        if crate_log_level.is_empty() {
            continue;
        }
        if crate_log_level == ALL_CLAIMLINK_LOGS {
            contains_keyword_all = true;
            continue;
        } else if crate_log_level == VERBOSE_CLAIMLINK_LOGS {
            contains_keyword_verbose = true;
            continue;
        }

        let mut split = crate_log_level.split('=');
        let crate_name = split.next().ok_or_else(|| {
            Error::LoggingConfiguration("Could not obtain crate name in logging string".to_string())
        })?;
        let log_level = split.next().unwrap_or("trace");
        targets.insert(crate_name.to_string(), get_log_level_from_str(log_level)?);
    }

    let mut to_be_overriden_targets: BTreeMap<String, Level> = if contains_keyword_all {
        claimlink_targets(Level::TRACE).into_iter().collect()
    } else if contains_keyword_verbose {
        claimlink_targets(Level::DEBUG).into_iter().collect()
    } else {
        Default::default()
    };
    to_be_overriden_targets.extend(targets);
    Ok(to_be_overriden_targets.into_iter().collect())
}

fn get_log_level_from_str(log_level: &str) -> Result<Level> {
    match log_level.to_lowercase().as_str() {
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::LoggingConfiguration(format!(
            "Log level {log_level} is not supported"
        ))),
    }
}
