//! Process logging for the blog server.
//!
//! Log records go to size-rotated files under one directory and are mirrored
//! to stderr from `info` up. The logger is installed once; later calls with
//! the same settings are no-ops and calls with other settings are refused.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, LogSpecification, Logger, LoggerHandle, Naming,
    WriteMode,
};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "blog";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    spec: String,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Installs the process logger.
///
/// `spec` is a flexi_logger specification such as `info` or
/// `warn,blog_api=debug`. `log_dir` must be absolute; it is created if missing.
pub fn init_logging(spec: &str, log_dir: &str) -> Result<(), String> {
    let spec = spec.trim().to_ascii_lowercase();
    let parsed =
        LogSpecification::parse(&spec).map_err(|err| format!("invalid log spec `{spec}`: {err}"))?;
    let dir = absolute_dir(log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start_logger(parsed, &spec, &dir))?;
    if active.spec != spec || active.dir != dir {
        return Err(format!(
            "logger already running with `{}` in `{}`; refusing `{}` in `{}`",
            active.spec,
            active.dir.display(),
            spec,
            dir.display()
        ));
    }
    Ok(())
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(parsed: LogSpecification, spec: &str, dir: &Path) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(dir)
        .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;

    let handle = Logger::with(parsed)
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .duplicate_to_stderr(Duplicate::Info)
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("cannot start logger: {err}"))?;

    info!(
        "event=logging_init module=core status=ok spec={spec} log_dir={} version={}",
        dir.display(),
        env!("CARGO_PKG_VERSION")
    );
    Ok(ActiveLogger {
        spec: spec.to_string(),
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

fn absolute_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log directory cannot be empty".to_string());
    }
    let dir = PathBuf::from(trimmed);
    if !dir.is_absolute() {
        return Err(format!("log directory must be absolute, got `{trimmed}`"));
    }
    Ok(dir)
}
