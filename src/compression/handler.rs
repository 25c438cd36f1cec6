//! Codec contracts shared by every compression method

use std::io::Write;

use crate::tiff::errors::{CodecError, CodecResult};
use crate::tiff::types::CompressionMethod;

/// Row-at-a-time compressor bound to a sink
///
/// Rows must be pushed top to bottom. `finish` drains trailing state and
/// hands the sink back; it consumes the codec, so no row can follow it.
/// Any error ends the session and leaves the sink contents unusable.
pub trait RowCompressor {
    /// Destination the compressed bytes are written to
    type Sink: Write;

    /// Compress exactly one row
    fn compress_row(&mut self, row: &[u8]) -> CodecResult<()>;

    /// Compress a whole number of consecutive rows
    fn compress_rows(&mut self, rows: &[u8]) -> CodecResult<()> {
        let row_bytes = self.row_bytes();
        if rows.len() % row_bytes != 0 {
            return Err(CodecError::RowLengthMismatch {
                expected: (rows.len() / row_bytes + 1) * row_bytes,
                actual: rows.len(),
            });
        }
        for row in rows.chunks(row_bytes) {
            self.compress_row(row)?;
        }
        Ok(())
    }

    /// Flush trailing state and return the sink
    fn finish(self) -> CodecResult<Self::Sink>;

    /// Bytes expected per row
    fn row_bytes(&self) -> usize;

    /// Get the name of this compression method
    fn name(&self) -> &'static str {
        self.method().name()
    }

    /// Method this codec implements
    fn method(&self) -> CompressionMethod;
}

/// Whole-strip decompressor
pub trait StripDecompressor: Send + Sync {
    /// Decode `rows` rows from one compressed strip
    ///
    /// Returns exactly `rows * row_bytes` bytes of packed samples.
    fn decompress(&self, data: &[u8], rows: usize) -> CodecResult<Vec<u8>>;

    /// Get the name of this compression method
    fn name(&self) -> &'static str {
        self.method().name()
    }

    /// Method this decoder implements
    fn method(&self) -> CompressionMethod;
}
