//! Decompression command
//!
//! Decodes a compressed file back into raw rows. When the file has a
//! `.strips` index the strips are cut apart and decoded one by one,
//! otherwise the whole file is read as a single strip.

use std::fs;
use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{parse_arg, required_arg, settings_from_args};
use crate::compression::{BufferPool, CompressorFactory, StripEncoder};
use crate::tiff::errors::{CodecError, CodecResult, ConfigField};
use crate::tiff::types::CodecConfig;
use crate::utils::logger::Logger;
use crate::utils::strip_index::StripIndex;

/// Command for decompressing strips
pub struct DecompressCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Path to the output file
    output_file: String,
    config: CodecConfig,
    /// Rows in the image
    height: usize,
    rows_per_strip: Option<u32>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> DecompressCommand<'a> {
    /// Create a new decompress command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new DecompressCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CodecResult<Self> {
        let input_file = required_arg(args, "input")?;
        let output_file = required_arg(args, "output")?;
        let settings = settings_from_args(args)?;
        let config = settings.to_config()?;
        let height = parse_arg::<usize>(args, "height")?
            .ok_or_else(|| CodecError::GenericError("Missing --height for decompression".to_string()))?;

        Ok(DecompressCommand {
            input_file,
            output_file,
            config,
            height,
            rows_per_strip: settings.rows_per_strip,
            logger,
        })
    }
}

impl<'a> Command for DecompressCommand<'a> {
    fn execute(&self) -> CodecResult<()> {
        info!("Decompressing {} rows of {} from {}", self.height, self.config.method, self.input_file);

        let data = fs::read(&self.input_file)?;
        let rows = match StripIndex::load_for(&self.input_file)? {
            Some(index) => {
                if self.rows_per_strip.is_some() && self.rows_per_strip != index.rows_per_strip {
                    return Err(CodecError::config(ConfigField::RowsPerStrip, format!(
                        "--rows-per-strip {:?} does not match the strip index ({:?})",
                        self.rows_per_strip, index.rows_per_strip)));
                }
                let height = u32::try_from(self.height)
                    .map_err(|_| CodecError::GenericError(format!("{} rows is too tall", self.height)))?;
                let strips = index.split(&data)?;
                info!("Decoding {} strip(s)", strips.len());

                let pool = BufferPool::new();
                StripEncoder::new(self.config, &pool)
                    .rows_per_strip(index.rows_per_strip)
                    .decode(&strips, height)?
            }
            None if self.rows_per_strip.is_some() => {
                return Err(CodecError::GenericError(format!(
                    "{} has no strip index, cannot split it into strips", self.input_file)));
            }
            None => CompressorFactory::create_decoder(&self.config)?.decompress(&data, self.height)?,
        };
        fs::write(&self.output_file, &rows)?;

        self.logger.log(&format!("Decompressed {} bytes into {} bytes", data.len(), rows.len()))?;
        Ok(())
    }
}
