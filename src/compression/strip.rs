//! Strip-level encoding driver
//!
//! Splits an image into strips and runs one codec session per strip. A
//! session never outlives its strip, so LZW dictionaries and fax bitstreams
//! restart at every strip boundary. Asking for a single strip keeps one
//! session, and one dictionary, for the whole image.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;

use crate::tiff::errors::{CodecError, CodecResult, ConfigField};
use crate::tiff::types::CodecConfig;
use crate::utils::progress::ProgressTracker;
use super::factory::CompressorFactory;
use super::handler::RowCompressor;
use super::pool::BufferPool;

/// Cooperative cancellation flag, checked between rows
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; sessions stop before their next row
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Encodes whole images strip by strip
pub struct StripEncoder<'a> {
    config: CodecConfig,
    pool: &'a BufferPool,
    /// None keeps the whole image in one strip
    rows_per_strip: Option<u32>,
    cancel: Option<&'a CancellationToken>,
    progress: Option<&'a ProgressTracker>,
}

impl<'a> StripEncoder<'a> {
    pub fn new(config: CodecConfig, pool: &'a BufferPool) -> Self {
        StripEncoder {
            config,
            pool,
            rows_per_strip: None,
            cancel: None,
            progress: None,
        }
    }

    /// Rows per strip; `None` encodes the image as a single strip
    pub fn rows_per_strip(mut self, rows: Option<u32>) -> Self {
        self.rows_per_strip = rows;
        self
    }

    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Advance `progress` by one for every encoded row
    pub fn with_progress(mut self, progress: &'a ProgressTracker) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Row ranges of each strip for an image of `height` rows
    pub fn strip_ranges(&self, height: u32) -> CodecResult<Vec<Range<usize>>> {
        let height = height as usize;
        match self.rows_per_strip {
            None => Ok(vec![0..height]),
            Some(0) => Err(CodecError::config(ConfigField::RowsPerStrip, "strips must hold at least one row")),
            Some(rows) => {
                let rows = rows as usize;
                if height == 0 {
                    return Ok(vec![0..0]);
                }
                Ok((0..height).step_by(rows).map(|start| start..(start + rows).min(height)).collect())
            }
        }
    }

    fn check_image(&self, image: &[u8], height: u32) -> CodecResult<()> {
        let expected = height as usize * self.config.row_bytes();
        if image.len() != expected {
            return Err(CodecError::RowLengthMismatch { expected, actual: image.len() });
        }
        Ok(())
    }

    /// Run one codec session over `rows`
    fn encode_strip(&self, rows: &[u8]) -> CodecResult<Vec<u8>> {
        let row_bytes = self.config.row_bytes();
        let mut compressor = CompressorFactory::create(&self.config, Vec::with_capacity(rows.len() / 2), self.pool)?;

        for row in rows.chunks(row_bytes) {
            if self.cancel.is_some_and(|token| token.is_cancelled()) {
                debug!("{} session cancelled", compressor.name());
                // Dropping the compressor hands its scratch back to the pool
                return Err(CodecError::Cancelled);
            }
            compressor.compress_row(row)?;
            if let Some(progress) = self.progress {
                progress.increment(1);
            }
        }

        compressor.finish()
    }

    fn strip_bytes<'b>(&self, image: &'b [u8], range: &Range<usize>) -> &'b [u8] {
        let row_bytes = self.config.row_bytes();
        &image[range.start * row_bytes..range.end * row_bytes]
    }

    /// Encode `height` rows, strip after strip
    pub fn encode(&self, image: &[u8], height: u32) -> CodecResult<Vec<Vec<u8>>> {
        self.check_image(image, height)?;
        let ranges = self.strip_ranges(height)?;
        info!("Encoding {} rows into {} {} strip(s)", height, ranges.len(), self.config.method);

        ranges.iter()
            .map(|range| self.encode_strip(self.strip_bytes(image, range)))
            .collect()
    }

    /// Encode strips concurrently, each with its own codec and scratch
    pub fn encode_parallel(&self, image: &[u8], height: u32) -> CodecResult<Vec<Vec<u8>>> {
        self.check_image(image, height)?;
        let ranges = self.strip_ranges(height)?;
        info!("Encoding {} rows into {} {} strip(s) in parallel", height, ranges.len(), self.config.method);

        ranges.par_iter()
            .map(|range| self.encode_strip(self.strip_bytes(image, range)))
            .collect()
    }

    /// Decode strips produced by [`encode`](Self::encode) with the same settings
    pub fn decode(&self, strips: &[Vec<u8>], height: u32) -> CodecResult<Vec<u8>> {
        let ranges = self.strip_ranges(height)?;
        if ranges.len() != strips.len() {
            return Err(CodecError::MalformedData(format!(
                "expected {} strips for {} rows, got {}", ranges.len(), height, strips.len())));
        }

        let decoder = CompressorFactory::create_decoder(&self.config)?;
        let mut image = Vec::with_capacity(height as usize * self.config.row_bytes());
        for (strip, range) in strips.iter().zip(&ranges) {
            image.extend_from_slice(&decoder.decompress(strip, range.len())?);
        }
        Ok(image)
    }
}
