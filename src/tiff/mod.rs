//! TIFF compression definitions
//!
//! This module provides the configuration types, constants, validation and
//! error types that every codec in this crate shares.

pub mod errors;
pub mod types;
pub mod constants;
pub mod validation;
pub mod ccitt_codes;
#[cfg(test)]
mod tests;

pub use errors::{CodecError, CodecResult, ConfigField, ErrorKind};
pub use types::{CodecConfig, CompressionLevel, CompressionMethod, FaxOptions, Predictor};
pub use ccitt_codes::{CcittTables, Color};
