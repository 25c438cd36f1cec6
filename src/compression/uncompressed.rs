//! Uncompressed rows (compression code 1)

use std::io::Write;

use crate::tiff::errors::{CodecError, CodecResult};
use crate::tiff::types::CompressionMethod;
use crate::tiff::validation::validate_row_length;
use super::handler::{RowCompressor, StripDecompressor};

/// Writes rows to the sink unchanged
pub struct NoCompressor<W: Write> {
    sink: W,
    row_bytes: usize,
}

impl<W: Write> NoCompressor<W> {
    pub fn new(sink: W, row_bytes: usize) -> Self {
        NoCompressor { sink, row_bytes }
    }
}

impl<W: Write> RowCompressor for NoCompressor<W> {
    type Sink = W;

    fn compress_row(&mut self, row: &[u8]) -> CodecResult<()> {
        validate_row_length(self.row_bytes, row.len())?;
        self.sink.write_all(row)?;
        Ok(())
    }

    fn finish(mut self) -> CodecResult<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    fn method(&self) -> CompressionMethod {
        CompressionMethod::None
    }
}

/// Copies the stored rows out of an uncompressed strip
pub struct UncompressedDecoder {
    row_bytes: usize,
}

impl UncompressedDecoder {
    pub fn new(row_bytes: usize) -> Self {
        UncompressedDecoder { row_bytes }
    }
}

impl StripDecompressor for UncompressedDecoder {
    fn decompress(&self, data: &[u8], rows: usize) -> CodecResult<Vec<u8>> {
        let expected = rows * self.row_bytes;
        if data.len() < expected {
            return Err(CodecError::TruncatedData { expected, actual: data.len() });
        }
        Ok(data[..expected].to_vec())
    }

    fn method(&self) -> CompressionMethod {
        CompressionMethod::None
    }
}
