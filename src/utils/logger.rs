//! Logger utility for application-wide logging
//!
//! This module provides a custom logger implementation that works alongside
//! the standard log crate, but adds file output capabilities. Without a log
//! file the console logger from env_logger is installed instead.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Metadata, LevelFilter};

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level recorded
    level: LevelFilter,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    /// * `level` - Most verbose level to record
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str, level: LevelFilter) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level,
        })
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs the strip sizes produced by an encode run
    ///
    /// # Arguments
    ///
    /// * `strips` - Compressed byte count of each strip
    pub fn log_strip_sizes(&self, strips: &[usize]) -> io::Result<()> {
        self.log("Strip byte counts:")?;
        for (index, size) in strips.iter().enumerate() {
            self.log(&format!("  Strip {}: {} bytes", index, size))?;
        }
        Ok(())
    }

    /// Initialize the global logger
    ///
    /// Logs to `log_file` and the console when a path is given, otherwise
    /// to stderr through env_logger (RUST_LOG still overrides the level).
    pub fn init_global_logger(log_file: Option<&str>, level: LevelFilter) -> io::Result<()> {
        match log_file {
            Some(path) => {
                let global_logger = Logger::new(path, level)?;
                if log::set_boxed_logger(Box::new(global_logger)).is_err() {
                    // Logger was already set - this should not happen in normal usage
                    eprintln!("Warning: Global logger was already initialized");
                }
                log::set_max_level(level);
            }
            None => {
                let _ = env_logger::Builder::new()
                    .filter_level(level)
                    .parse_default_env()
                    .try_init();
            }
        }
        Ok(())
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = Logger::log(self, &message);

            // Also print to console
            println!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}
