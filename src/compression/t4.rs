//! CCITT T.4 one-dimensional coding (compression codes 2 and 3)
//!
//! Rows are 1-bit packed, MSB first, with 0 meaning white. Each row is a
//! sequence of alternating runs starting with white; a row that begins with
//! black opens with a zero-length white run. Runs of 64 or more pixels are
//! written as a makeup code followed by a terminating code.
//!
//! Modified Huffman rows carry no EOL and each starts on a byte boundary.
//! Group 3 streams open with an EOL and put another EOL after every row.

use std::io::Write;
use log::debug;

use crate::io::bit_reader::MsbBitReader;
use crate::io::bit_writer::MsbBitWriter;
use crate::tiff::ccitt_codes::{CcittTables, Color};
use crate::tiff::constants::fax::{EOL_BITS, EOL_CODE, MAX_CODE_BITS, MAX_MAKEUP_RUN, MAX_TERMINATING_RUN};
use crate::tiff::errors::{CodecError, CodecResult};
use crate::tiff::types::{CompressionMethod, FaxOptions};
use crate::tiff::validation::validate_row_length;
use super::handler::{RowCompressor, StripDecompressor};
use super::pool::BufferPool;

/// Row framing of the bitstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum T4Framing {
    /// TIFF compression 2: no EOL, byte-aligned rows
    ModifiedHuffman,
    /// TIFF compression 3: EOL-delimited rows
    Group3 { eol_byte_aligned: bool },
}

impl T4Framing {
    /// Framing for a bilevel method
    pub fn for_method(method: CompressionMethod, fax: FaxOptions) -> Self {
        match method {
            CompressionMethod::CcittGroup3Fax => T4Framing::Group3 { eol_byte_aligned: fax.eol_byte_aligned },
            _ => T4Framing::ModifiedHuffman,
        }
    }

    fn method(&self) -> CompressionMethod {
        match self {
            T4Framing::ModifiedHuffman => CompressionMethod::ModifiedHuffman,
            T4Framing::Group3 { .. } => CompressionMethod::CcittGroup3Fax,
        }
    }
}

#[inline]
fn is_black(row: &[u8], x: usize) -> bool {
    (row[x / 8] >> (7 - x % 8)) & 1 == 1
}

/// Length of the run of `color` pixels starting at `start`
fn run_length(row: &[u8], start: usize, width: usize, color: Color) -> usize {
    let black = color == Color::Black;
    let solid = if black { 0xFF } else { 0x00 };
    let mut x = start;

    while x < width {
        if x % 8 == 0 && x + 8 <= width && row[x / 8] == solid {
            x += 8;
            continue;
        }
        if is_black(row, x) != black {
            break;
        }
        x += 1;
    }

    x - start
}

/// Split a run into its makeup and terminating parts
///
/// Runs above 2623 repeat the 2560 makeup code.
pub fn run_codes(run: u32) -> Vec<u32> {
    let mut parts = Vec::with_capacity(2);
    let mut remaining = run;
    while remaining > MAX_TERMINATING_RUN {
        let makeup = (remaining / 64 * 64).min(MAX_MAKEUP_RUN);
        parts.push(makeup);
        remaining -= makeup;
    }
    parts.push(remaining);
    parts
}

/// Modified Huffman / Group 3 compressor
pub struct T4Compressor<W: Write> {
    sink: W,
    writer: MsbBitWriter,
    tables: &'static CcittTables,
    framing: T4Framing,
    /// Pixels per row
    width: usize,
    row_bytes: usize,
    started: bool,
}

impl<W: Write> T4Compressor<W> {
    pub fn new(sink: W, pool: &BufferPool, width: usize, framing: T4Framing) -> CodecResult<Self> {
        // Worst case alternates colors every pixel; no code exceeds 13 bits
        let output = pool.acquire(((width + 2) * MAX_CODE_BITS as usize) / 8 + 4)?;
        debug!("T.4 compressor ready for {} pixel rows ({:?})", width, framing);

        Ok(T4Compressor {
            sink,
            writer: MsbBitWriter::new(output),
            tables: CcittTables::global(),
            framing,
            width,
            row_bytes: (width + 7) / 8,
            started: false,
        })
    }

    fn write_eol(&mut self, byte_aligned: bool) {
        if byte_aligned {
            // Fill so the EOL's final bit is the last bit of a byte
            let pending = self.writer.pending_bits();
            let fill = (8 - (pending + EOL_BITS) % 8) % 8;
            self.writer.write_bits(0, fill);
        }
        self.writer.write_bits(EOL_CODE, EOL_BITS);
    }

    fn write_run(&mut self, color: Color, run: usize) -> CodecResult<()> {
        for part in run_codes(run as u32) {
            let code = self.tables.code_for(color, part).ok_or_else(|| {
                CodecError::GenericError(format!("No {:?} code for run length {}", color, part))
            })?;
            self.writer.write_bits(code.bits as u32, code.length);
        }
        Ok(())
    }

    fn encode_row(&mut self, row: &[u8]) -> CodecResult<()> {
        let mut color = Color::White;
        let mut x = 0;

        while x < self.width {
            let run = run_length(row, x, self.width, color);
            self.write_run(color, run)?;
            x += run;
            color = color.toggle();
        }
        Ok(())
    }
}

impl<W: Write> RowCompressor for T4Compressor<W> {
    type Sink = W;

    fn compress_row(&mut self, row: &[u8]) -> CodecResult<()> {
        validate_row_length(self.row_bytes, row.len())?;

        if let T4Framing::Group3 { eol_byte_aligned } = self.framing {
            if !self.started {
                self.write_eol(eol_byte_aligned);
            }
        }
        self.started = true;

        self.encode_row(row)?;

        match self.framing {
            T4Framing::ModifiedHuffman => self.writer.pad_to_byte(),
            T4Framing::Group3 { eol_byte_aligned } => self.write_eol(eol_byte_aligned),
        }

        self.writer.drain_to(&mut self.sink)?;
        Ok(())
    }

    fn finish(mut self) -> CodecResult<W> {
        self.writer.flush_to(&mut self.sink)?;
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    fn method(&self) -> CompressionMethod {
        self.framing.method()
    }
}

/// Modified Huffman / Group 3 decoder
pub struct T4Decoder {
    tables: &'static CcittTables,
    framing: T4Framing,
    width: usize,
    row_bytes: usize,
}

impl T4Decoder {
    pub fn new(width: usize, framing: T4Framing) -> Self {
        T4Decoder {
            tables: CcittTables::global(),
            framing,
            width,
            row_bytes: (width + 7) / 8,
        }
    }

    /// Consume optional fill bits and one EOL code
    fn skip_eol(reader: &mut MsbBitReader<'_>) -> CodecResult<()> {
        let position = reader.bits_read();
        let mut zeros = 0u32;
        while !reader.read_bit()? {
            zeros += 1;
        }
        if zeros < (EOL_BITS - 1) as u32 {
            return Err(CodecError::MalformedData(format!(
                "expected EOL at bit {}, found {} zero bits", position, zeros)));
        }
        Ok(())
    }

    /// Read one terminating or makeup code of `color`
    fn read_code(&self, reader: &mut MsbBitReader<'_>, color: Color) -> CodecResult<u32> {
        let position = reader.bits_read();
        let mut bits = 0u16;
        for length in 1..=MAX_CODE_BITS {
            bits = (bits << 1) | reader.read_bit()? as u16;
            if let Some(run) = self.tables.run_for(color, length, bits) {
                return Ok(run);
            }
        }
        Err(CodecError::InvalidCode { code: bits as u32, position })
    }

    /// Read makeup codes up to and including a terminating code
    fn read_run(&self, reader: &mut MsbBitReader<'_>, color: Color) -> CodecResult<usize> {
        let mut total = 0usize;
        loop {
            let run = self.read_code(reader, color)?;
            total += run as usize;
            if run <= MAX_TERMINATING_RUN {
                return Ok(total);
            }
        }
    }

    /// Decode runs into one zeroed row, returning the run lengths
    pub fn decode_row(&self, reader: &mut MsbBitReader<'_>, row: &mut [u8]) -> CodecResult<Vec<usize>> {
        let mut runs = Vec::new();
        let mut color = Color::White;
        let mut x = 0;

        while x < self.width {
            let run = self.read_run(reader, color)?;
            if x + run > self.width {
                return Err(CodecError::MalformedData(format!(
                    "run of {} at pixel {} overflows row width {}", run, x, self.width)));
            }
            if color == Color::Black {
                for px in x..x + run {
                    row[px / 8] |= 0x80 >> (px % 8);
                }
            }
            runs.push(run);
            x += run;
            color = color.toggle();
        }

        Ok(runs)
    }
}

impl StripDecompressor for T4Decoder {
    fn decompress(&self, data: &[u8], rows: usize) -> CodecResult<Vec<u8>> {
        let mut output = vec![0u8; rows * self.row_bytes];
        let mut reader = MsbBitReader::new(data);

        for row in output.chunks_mut(self.row_bytes.max(1)).take(rows) {
            if let T4Framing::Group3 { .. } = self.framing {
                Self::skip_eol(&mut reader)?;
            }
            self.decode_row(&mut reader, row)?;
            if self.framing == T4Framing::ModifiedHuffman {
                reader.align_to_byte();
            }
        }

        debug!("T.4 decoded {} rows from {} bytes", rows, data.len());
        Ok(output)
    }

    fn method(&self) -> CompressionMethod {
        self.framing.method()
    }
}
