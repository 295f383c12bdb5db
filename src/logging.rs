use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use log::{LevelFilter, Metadata, Record};

/// Environment variable holding the log level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub const LOG_ENV: &str = "GRIDCHASE_LOG";

struct SimpleLogger {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut sink) = self.sink.lock() {
                let _ = writeln!(
                    sink,
                    "[pid {}] {} {} - {}",
                    std::process::id(),
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

/// Level from [`LOG_ENV`], or `default` if the variable is unset or invalid.
pub fn level_from_env(default: LevelFilter) -> LevelFilter {
    env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(default)
}

/// Initialize logging to `file` (appending) or to stderr.
///
/// Calling this twice keeps the first logger.
pub fn init_logging(file: Option<&Path>, default: LevelFilter) -> anyhow::Result<()> {
    let sink: Box<dyn Write + Send> = match file {
        Some(path) => Box::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow::anyhow!("Cannot open log file {}: {}", path.display(), e))?,
        ),
        None => Box::new(io::stderr()),
    };
    let level = level_from_env(default);
    let logger = SimpleLogger {
        sink: Mutex::new(sink),
    };
    let _ = log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level));
    Ok(())
}
