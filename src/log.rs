//! Logging for the transmission core. This module (re)exports the five logging macros of the
//! `log` facade: `error!`, `warn!`, `info!`, `debug!` and `trace!`. The transmission models emit
//! `trace!` messages per selected host and `debug!` summaries per place.
//!
//! Logging is _disabled_ by default. A `log4rs` console logger is installed the first time the
//! configuration changes:
//!
//!  - `enable_logging()`: turns on all log messages
//!  - `disable_logging()`: turns off all log messages
//!  - `set_log_level(level: LevelFilter)`: enables only log messages with priority at least `level`
//!
//! Per-module filtering is configured with `set_module_filter()` and `remove_module_filter()`:
//!
//! ```rust
//! use ixa_vector_transmission::log::{set_module_filter, set_log_level, LevelFilter};
//!
//! set_log_level(LevelFilter::Info);
//! set_module_filter("ixa_vector_transmission::transmission", LevelFilter::Trace);
//! ```

pub use log::{debug, error, info, trace, warn, LevelFilter};

use crate::HashMap;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::{Config, Handle};
use std::sync::{LazyLock, Mutex, MutexGuard};

// Logging disabled
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Off;
// ISO 8601 timestamp, color coded level tag, module target
const DEFAULT_LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

static LOG_CONFIGURATION: LazyLock<Mutex<LogConfiguration>> = LazyLock::new(Mutex::default);

/// Holds the global level, module-specific levels and a handle to the installed `log4rs` logger.
/// Only one instance exists; the public API consists of free functions that lock it.
struct LogConfiguration {
    /// The level for modules without an explicit filter. `LevelFilter::Off` disables logging.
    global_log_level: LevelFilter,
    module_levels: HashMap<String, LevelFilter>,
    root_handle: Option<Handle>,
}

impl Default for LogConfiguration {
    fn default() -> Self {
        LogConfiguration {
            global_log_level: DEFAULT_LOG_LEVEL,
            module_levels: HashMap::default(),
            root_handle: None,
        }
    }
}

impl LogConfiguration {
    fn build_config(&self) -> Config {
        let encoder = Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN));
        let stdout = ConsoleAppender::builder().encoder(encoder).build();
        let mut builder =
            Config::builder().appender(Appender::builder().build("stdout", Box::new(stdout)));

        for (module, level) in &self.module_levels {
            builder = builder.logger(Logger::builder().build(module.clone(), *level));
        }

        let root = Root::builder()
            .appender("stdout")
            .build(self.global_log_level);
        match builder.build(root) {
            Ok(config) => config,
            Err(e) => panic!("failed to build log config: {e}"),
        }
    }

    /// Installs the logger on first use, otherwise swaps in the new configuration.
    fn apply(&mut self) {
        let config = self.build_config();
        match self.root_handle {
            Some(ref handle) => handle.set_config(config),
            None => match log4rs::init_config(config) {
                Ok(handle) => self.root_handle = Some(handle),
                // Another logger owns the `log` facade; leave it in place.
                Err(e) => eprintln!("could not install logger: {e}"),
            },
        }
    }
}

fn get_log_configuration() -> MutexGuard<'static, LogConfiguration> {
    LOG_CONFIGURATION
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Enables all log messages. Equivalent to `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Disables logging completely. Equivalent to `set_log_level(LevelFilter::Off)`.
pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

/// Sets the global log level.
pub fn set_log_level(level: LevelFilter) {
    let mut configuration = get_log_configuration();
    configuration.global_log_level = level;
    configuration.apply();
}

/// Sets a level filter for the given module path, e.g. `"ixa_vector_transmission::place"`.
pub fn set_module_filter(module_path: &str, level: LevelFilter) {
    let mut configuration = get_log_configuration();
    if configuration.module_levels.get(module_path) == Some(&level) {
        return;
    }
    configuration
        .module_levels
        .insert(module_path.to_string(), level);
    configuration.apply();
}

/// Removes a module-specific filter; the global level applies to the module again.
pub fn remove_module_filter(module_path: &str) {
    let mut configuration = get_log_configuration();
    if configuration.module_levels.remove(module_path).is_some() {
        configuration.apply();
    }
}
