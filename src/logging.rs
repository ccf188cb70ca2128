use std::env;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Environment variable holding the log level of this crate.
pub const LOG_ENV: &str = "BATTLESHIP_LOG";

/// HTTP stack targets are capped at this level whatever `BATTLESHIP_LOG` says.
const DEPENDENCY_LEVEL: Level = Level::Warn;

struct StderrLogger;

fn is_own_target(target: &str) -> bool {
    target.starts_with("battleship_client")
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
            && (is_own_target(metadata.target()) || metadata.level() <= DEPENDENCY_LEVEL)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Send log records to stderr, at the level named by `BATTLESHIP_LOG`
/// (`info` when unset or invalid). Later calls are no-ops.
pub fn init_logging() {
    let level = parse_level(env::var(LOG_ENV).ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
