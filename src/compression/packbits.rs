//! PackBits run-length coding (compression code 32773)
//!
//! Every row is packed on its own, so a packet never spans two rows.

use std::io::Write;
use log::debug;

use crate::tiff::constants::packbits::{MAX_PACKET, MIN_REPEAT, NOOP_HEADER};
use crate::tiff::errors::{CodecError, CodecResult};
use crate::tiff::types::CompressionMethod;
use crate::tiff::validation::validate_row_length;
use super::handler::{RowCompressor, StripDecompressor};
use super::pool::{BufferPool, PooledBuffer};

/// Worst-case packed size of a row: one header per 128 literal bytes
pub fn max_packed_len(row_bytes: usize) -> usize {
    row_bytes + (row_bytes + MAX_PACKET - 1) / MAX_PACKET
}

/// Whether a repeat packet should start at `i`
#[inline]
fn repeat_starts_at(row: &[u8], i: usize) -> bool {
    i + MIN_REPEAT <= row.len() && row[i] == row[i + 1] && row[i] == row[i + 2]
}

/// Pack one row, appending packets to `out`
pub fn pack_row(row: &[u8], out: &mut Vec<u8>) {
    let n = row.len();
    let mut i = 0;

    while i < n {
        if repeat_starts_at(row, i) {
            let value = row[i];
            let mut run = MIN_REPEAT;
            while run < MAX_PACKET && i + run < n && row[i + run] == value {
                run += 1;
            }
            out.push((1 - run as i16) as i8 as u8);
            out.push(value);
            i += run;
            continue;
        }

        // Pairs stay in the literal: a two-byte repeat packet saves nothing
        let start = i;
        while i < n && i - start < MAX_PACKET && !repeat_starts_at(row, i) {
            i += 1;
        }
        out.push((i - start - 1) as u8);
        out.extend_from_slice(&row[start..i]);
    }
}

/// Unpack packets from `data` starting at `*pos` until `row` is full
pub fn unpack_row(data: &[u8], pos: &mut usize, row: &mut [u8]) -> CodecResult<()> {
    let mut filled = 0;

    while filled < row.len() {
        let header = match data.get(*pos) {
            Some(&b) => b as i8,
            None => return Err(CodecError::TruncatedData { expected: *pos + 1, actual: data.len() }),
        };
        *pos += 1;

        if header == NOOP_HEADER {
            continue;
        }

        if header >= 0 {
            let count = header as usize + 1;
            if filled + count > row.len() {
                return Err(CodecError::MalformedData(format!(
                    "literal packet of {} bytes crosses the row boundary at {}", count, row.len())));
            }
            let end = *pos + count;
            if end > data.len() {
                return Err(CodecError::TruncatedData { expected: end, actual: data.len() });
            }
            row[filled..filled + count].copy_from_slice(&data[*pos..end]);
            *pos = end;
            filled += count;
        } else {
            let count = (1 - header as i16) as usize;
            if filled + count > row.len() {
                return Err(CodecError::MalformedData(format!(
                    "repeat packet of {} bytes crosses the row boundary at {}", count, row.len())));
            }
            let value = match data.get(*pos) {
                Some(&b) => b,
                None => return Err(CodecError::TruncatedData { expected: *pos + 1, actual: data.len() }),
            };
            *pos += 1;
            row[filled..filled + count].fill(value);
            filled += count;
        }
    }

    Ok(())
}

/// PackBits compressor
pub struct PackBitsCompressor<W: Write> {
    sink: W,
    /// Packed form of the current row
    scratch: PooledBuffer,
    row_bytes: usize,
}

impl<W: Write> PackBitsCompressor<W> {
    pub fn new(sink: W, pool: &BufferPool, row_bytes: usize) -> CodecResult<Self> {
        let scratch = pool.acquire(max_packed_len(row_bytes))?;
        debug!("PackBits compressor ready for {} byte rows", row_bytes);
        Ok(PackBitsCompressor { sink, scratch, row_bytes })
    }
}

impl<W: Write> RowCompressor for PackBitsCompressor<W> {
    type Sink = W;

    fn compress_row(&mut self, row: &[u8]) -> CodecResult<()> {
        validate_row_length(self.row_bytes, row.len())?;
        self.scratch.clear();
        pack_row(row, &mut self.scratch);
        self.sink.write_all(&self.scratch)?;
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
        CompressionMethod::PackBits
    }
}

/// PackBits decoder
pub struct PackBitsDecoder {
    row_bytes: usize,
}

impl PackBitsDecoder {
    pub fn new(row_bytes: usize) -> Self {
        PackBitsDecoder { row_bytes }
    }
}

impl StripDecompressor for PackBitsDecoder {
    fn decompress(&self, data: &[u8], rows: usize) -> CodecResult<Vec<u8>> {
        let mut output = vec![0u8; rows * self.row_bytes];
        let mut pos = 0;
        if self.row_bytes > 0 {
            for row in output.chunks_mut(self.row_bytes) {
                unpack_row(data, &mut pos, row)?;
            }
        }
        debug!("PackBits decoded {} rows from {} of {} bytes", rows, pos, data.len());
        Ok(output)
    }

    fn method(&self) -> CompressionMethod {
        CompressionMethod::PackBits
    }
}
