//! Compression command
//!
//! Reads a file of raw packed rows and writes the compressed strips
//! back to back into the output file. The strip byte counts go to a
//! `.strips` index next to it.

use std::fs;
use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{required_arg, settings_from_args};
use crate::compression::{BufferPool, StripEncoder};
use crate::tiff::errors::{CodecError, CodecResult};
use crate::tiff::types::CodecConfig;
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;
use crate::utils::strip_index::StripIndex;

/// Command for compressing raw rows
pub struct CompressCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Path to the output file
    output_file: String,
    config: CodecConfig,
    rows_per_strip: Option<u32>,
    /// Encode strips on the rayon pool
    parallel: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> CompressCommand<'a> {
    /// Create a new compress command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new CompressCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CodecResult<Self> {
        let input_file = required_arg(args, "input")?;
        let output_file = required_arg(args, "output")?;
        let settings = settings_from_args(args)?;
        let config = settings.to_config()?;

        info!("Using compression: {}", config);

        Ok(CompressCommand {
            input_file,
            output_file,
            config,
            rows_per_strip: settings.rows_per_strip,
            parallel: args.get_flag("parallel"),
            logger,
        })
    }
}

impl<'a> Command for CompressCommand<'a> {
    fn execute(&self) -> CodecResult<()> {
        let image = fs::read(&self.input_file)?;
        let row_bytes = self.config.row_bytes();
        if image.len() % row_bytes != 0 {
            return Err(CodecError::GenericError(format!(
                "{} holds {} bytes, not a whole number of {} byte rows",
                self.input_file, image.len(), row_bytes)));
        }
        let height = (image.len() / row_bytes) as u32;

        info!("Compressing {} rows from {} into {}", height, self.input_file, self.output_file);

        let pool = BufferPool::new();
        let progress = ProgressTracker::new(height as u64, self.config.method.name());
        let encoder = StripEncoder::new(self.config, &pool)
            .rows_per_strip(self.rows_per_strip)
            .with_progress(&progress);

        let strips = if self.parallel {
            encoder.encode_parallel(&image, height)?
        } else {
            encoder.encode(&image, height)?
        };
        progress.finish();

        let sizes: Vec<usize> = strips.iter().map(|s| s.len()).collect();
        fs::write(&self.output_file, strips.concat())?;
        StripIndex::new(self.rows_per_strip, sizes.clone()).store_for(&self.output_file)?;
        self.logger.log_strip_sizes(&sizes)?;

        info!("Wrote {} strip(s), {} bytes from {}", strips.len(), sizes.iter().sum::<usize>(), image.len());
        Ok(())
    }
}
