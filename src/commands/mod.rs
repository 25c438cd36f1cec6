//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod compress_command;
pub mod decompress_command;
pub mod convert_command;

pub use command_traits::{Command, CommandFactory};
pub use compress_command::CompressCommand;
pub use decompress_command::DecompressCommand;
pub use convert_command::ConvertCommand;

use clap::ArgMatches;
use crate::io::byte_order::ByteOrder;
use crate::utils::logger::Logger;
use crate::utils::settings::CodecSettings;
use crate::tiff::errors::{CodecError, CodecResult};
use crate::tiff::types::{CompressionLevel, CompressionMethod, Predictor};

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct StripcodecCommandFactory;

impl StripcodecCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        StripcodecCommandFactory
    }
}

impl Default for StripcodecCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for StripcodecCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> CodecResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.get_flag("decompress") {
            Ok(Box::new(DecompressCommand::new(args, logger)?))
        } else if args.get_flag("convert") {
            Ok(Box::new(ConvertCommand::new(args, logger)?))
        } else {
            // Default to compress command
            Ok(Box::new(CompressCommand::new(args, logger)?))
        }
    }
}

/// Required string argument
pub(crate) fn required_arg(args: &ArgMatches, name: &str) -> CodecResult<String> {
    args.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| CodecError::GenericError(format!("Missing --{} argument", name)))
}

/// Optional numeric argument
pub(crate) fn parse_arg<T: std::str::FromStr>(args: &ArgMatches, name: &str) -> CodecResult<Option<T>> {
    match args.get_one::<String>(name) {
        None => Ok(None),
        Some(value) => value.parse::<T>()
            .map(Some)
            .map_err(|_| CodecError::GenericError(format!("Invalid value for --{}: {}", name, value))),
    }
}

/// Codec settings from the command line, completed by `--config` if given
pub(crate) fn settings_from_args(args: &ArgMatches) -> CodecResult<CodecSettings> {
    let mut settings = CodecSettings::default();

    settings.method = if let Some(code) = parse_arg::<u16>(args, "compression")? {
        Some(CompressionMethod::from_code(code)?)
    } else if let Some(name) = args.get_one::<String>("method") {
        Some(CompressionMethod::from_name(name)?)
    } else {
        None
    };

    settings.width = parse_arg(args, "width")?;
    settings.bits_per_sample = parse_arg(args, "bits")?;
    settings.samples_per_pixel = parse_arg(args, "samples-per-pixel")?;
    settings.rows_per_strip = parse_arg(args, "rows-per-strip")?;

    if let Some(name) = args.get_one::<String>("predictor") {
        settings.predictor = Some(Predictor::from_name(name)?);
    }
    if let Some(name) = args.get_one::<String>("level") {
        settings.level = Some(CompressionLevel::from_name(name)?);
    }
    if let Some(name) = args.get_one::<String>("byte-order") {
        settings.byte_order = Some(ByteOrder::from_name(name)?);
    }
    if args.get_flag("eol-aligned") {
        settings.eol_byte_aligned = Some(true);
    }

    match args.get_one::<String>("config") {
        Some(path) => Ok(settings.or(CodecSettings::from_file(path)?)),
        None => Ok(settings),
    }
}
