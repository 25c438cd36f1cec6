//! Adobe Deflate (zlib) coding (compression code 8)
//!
//! Rows are fed into a single zlib stream that spans the whole strip.

use std::io::{Read, Write};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::{debug, warn};

use crate::tiff::errors::{CodecError, CodecResult};
use crate::tiff::types::{CompressionLevel, CompressionMethod};
use crate::tiff::validation::validate_row_length;
use super::handler::{RowCompressor, StripDecompressor};
use super::pool::{BufferPool, PooledBuffer};
use super::predictor::HorizontalPredictor;

/// Map a level hint onto zlib's scale
pub fn zlib_level(level: CompressionLevel) -> Compression {
    match level {
        CompressionLevel::Default => Compression::default(),
        CompressionLevel::Fastest => Compression::fast(),
        CompressionLevel::Best => Compression::best(),
        CompressionLevel::Level(n) => Compression::new(n.min(9) as u32),
    }
}

/// Deflate compressor
pub struct DeflateCompressor<W: Write> {
    encoder: ZlibEncoder<W>,
    predictor: Option<HorizontalPredictor>,
    /// Differenced copy of the current row; only leased with a predictor
    scratch: Option<PooledBuffer>,
    row_bytes: usize,
}

impl<W: Write> DeflateCompressor<W> {
    pub fn new(
        sink: W,
        pool: &BufferPool,
        row_bytes: usize,
        predictor: Option<HorizontalPredictor>,
        level: CompressionLevel,
    ) -> CodecResult<Self> {
        let scratch = match predictor {
            Some(_) => Some(pool.acquire(row_bytes)?),
            None => None,
        };
        let compression = zlib_level(level);
        debug!("Deflate compressor ready for {} byte rows at level {}", row_bytes, compression.level());

        Ok(DeflateCompressor {
            encoder: ZlibEncoder::new(sink, compression),
            predictor,
            scratch,
            row_bytes,
        })
    }
}

impl<W: Write> RowCompressor for DeflateCompressor<W> {
    type Sink = W;

    fn compress_row(&mut self, row: &[u8]) -> CodecResult<()> {
        validate_row_length(self.row_bytes, row.len())?;

        match (&self.predictor, &mut self.scratch) {
            (Some(predictor), Some(scratch)) => {
                scratch.clear();
                scratch.extend_from_slice(row);
                predictor.difference(&mut scratch[..]);
                self.encoder.write_all(&scratch[..])?;
            }
            _ => self.encoder.write_all(row)?,
        }
        Ok(())
    }

    fn finish(self) -> CodecResult<W> {
        let mut sink = self.encoder.finish()?;
        sink.flush()?;
        Ok(sink)
    }

    fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    fn method(&self) -> CompressionMethod {
        CompressionMethod::Deflate
    }
}

/// Deflate decoder
pub struct DeflateDecoder {
    row_bytes: usize,
    predictor: Option<HorizontalPredictor>,
}

impl DeflateDecoder {
    pub fn new(row_bytes: usize, predictor: Option<HorizontalPredictor>) -> Self {
        DeflateDecoder { row_bytes, predictor }
    }
}

impl StripDecompressor for DeflateDecoder {
    fn decompress(&self, data: &[u8], rows: usize) -> CodecResult<Vec<u8>> {
        let expected = rows * self.row_bytes;
        let mut output = Vec::with_capacity(expected);

        let decoder = ZlibDecoder::new(data);
        if let Err(e) = decoder.take(expected as u64).read_to_end(&mut output) {
            warn!("Deflate decompression error: {}", e);
            return Err(CodecError::MalformedData(format!("zlib stream: {}", e)));
        }

        if output.len() < expected {
            return Err(CodecError::TruncatedData { expected, actual: output.len() });
        }

        if let Some(predictor) = &self.predictor {
            predictor.accumulate_rows(&mut output, self.row_bytes);
        }
        debug!("Deflate decoded {} rows from {} bytes", rows, data.len());
        Ok(output)
    }

    fn method(&self) -> CompressionMethod {
        CompressionMethod::Deflate
    }
}
