//! Utility modules for common functionality
//!
//! Logging setup, progress reporting, codec settings files and strip
//! index side files.

pub mod logger;
pub mod progress;
pub mod settings;
pub mod strip_index;
#[cfg(test)]
mod tests;
