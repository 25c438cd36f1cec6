//! Compression conversion command
//!
//! This module implements the command for re-encoding a compressed
//! strip with a different compression method.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{parse_arg, required_arg, settings_from_args};
use crate::compression::{BufferPool, CompressionConverter};
use crate::tiff::errors::{CodecError, CodecResult};
use crate::tiff::types::{CodecConfig, CompressionMethod};
use crate::utils::logger::Logger;

/// Command for converting strip compression
pub struct ConvertCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Path to the output file
    output_file: String,
    source: CodecConfig,
    target: CodecConfig,
    /// Rows stored in the strip
    height: usize,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ConvertCommand<'a> {
    /// Create a new convert command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ConvertCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CodecResult<Self> {
        let input_file = required_arg(args, "input")?;
        let output_file = required_arg(args, "output")?;
        let source = settings_from_args(args)?.to_config()?;

        let target_name = args.get_one::<String>("target-method")
            .ok_or_else(|| CodecError::GenericError("Missing --target-method for conversion".to_string()))?;
        let target = source.with_method(CompressionMethod::from_name(target_name)?);

        let height = parse_arg::<usize>(args, "height")?
            .ok_or_else(|| CodecError::GenericError("Missing --height for conversion".to_string()))?;

        Ok(ConvertCommand {
            input_file,
            output_file,
            source,
            target,
            height,
            logger,
        })
    }
}

impl<'a> Command for ConvertCommand<'a> {
    fn execute(&self) -> CodecResult<()> {
        info!(
            "Converting file {} to {} with {} compression",
            self.input_file, self.output_file, self.target.method
        );

        let pool = BufferPool::new();
        let converter = CompressionConverter::new(&pool);
        let written = converter.convert_file(
            &self.input_file,
            &self.output_file,
            self.height,
            &self.source,
            &self.target,
        )?;

        info!("Compression conversion successful");
        self.logger.log(&format!("Compression conversion successful ({} bytes)", written))?;

        Ok(())
    }
}
