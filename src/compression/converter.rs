//! Compression conversion functionality

use std::fs;
use log::info;

use crate::tiff::errors::{CodecError, CodecResult, ConfigField};
use crate::tiff::types::CodecConfig;
use super::factory::CompressorFactory;
use super::handler::RowCompressor;
use super::pool::BufferPool;

/// Converter for changing the compression of a strip
pub struct CompressionConverter<'a> {
    pool: &'a BufferPool,
}

impl<'a> CompressionConverter<'a> {
    /// Create a new compression converter
    pub fn new(pool: &'a BufferPool) -> Self {
        CompressionConverter { pool }
    }

    /// Convert a single strip of `rows` rows between configurations
    ///
    /// Both configurations must describe the same row geometry.
    pub fn convert_strip(
        &self,
        data: &[u8],
        rows: usize,
        source: &CodecConfig,
        target: &CodecConfig,
    ) -> CodecResult<Vec<u8>> {
        if source.row_width_in_samples != target.row_width_in_samples
            || source.bits_per_sample != target.bits_per_sample {
            return Err(CodecError::config(
                ConfigField::RowWidth,
                format!(
                    "cannot convert {} x {}-bit rows into {} x {}-bit rows",
                    source.row_width_in_samples, source.bits_per_sample,
                    target.row_width_in_samples, target.bits_per_sample,
                ),
            ));
        }

        let decoder = CompressorFactory::create_decoder(source)?;
        let mut compressor = CompressorFactory::create(target, Vec::with_capacity(data.len()), self.pool)?;

        info!("Converting strip from {} to {} compression", decoder.name(), compressor.name());

        // Decompress with source codec
        let decompressed = decoder.decompress(data, rows)?;

        // Compress with target codec
        compressor.compress_rows(&decompressed)?;
        compressor.finish()
    }

    /// Convert a file holding one compressed strip
    pub fn convert_file(
        &self,
        input_path: &str,
        output_path: &str,
        rows: usize,
        source: &CodecConfig,
        target: &CodecConfig,
    ) -> CodecResult<usize> {
        info!("Converting file {} to {} with {} compression", input_path, output_path, target.method);

        let data = fs::read(input_path)?;
        let converted = self.convert_strip(&data, rows, source, target)?;
        fs::write(output_path, &converted)?;

        info!("Converted {} bytes into {} bytes", data.len(), converted.len());
        Ok(converted.len())
    }
}
