//! TIFF LZW coding (compression code 5)
//!
//! Codes are 9 to 12 bits wide, packed MSB first. The encoder widens one
//! code earlier than generic LZW ("early change"): once it has assigned code
//! 2^n - 1 every later code is written n + 1 bits wide. The dictionary lives
//! for the whole strip and only shrinks on a Clear code.

use std::collections::HashMap;
use std::io::Write;
use log::debug;

use crate::io::bit_reader::MsbBitReader;
use crate::io::bit_writer::MsbBitWriter;
use crate::tiff::constants::lzw::{CLEAR_CODE, EOI_CODE, FIRST_CODE, MAX_BITS, MIN_BITS, TABLE_FULL, TABLE_SIZE};
use crate::tiff::errors::{CodecError, CodecResult};
use crate::tiff::types::CompressionMethod;
use crate::tiff::validation::validate_row_length;
use super::handler::{RowCompressor, StripDecompressor};
use super::pool::{BufferPool, PooledBuffer};
use super::predictor::HorizontalPredictor;

/// Largest code representable in `width` bits
#[inline]
fn max_code(width: u8) -> u16 {
    (1u16 << width) - 1
}

/// Dictionary coder state carried across rows
#[derive(Debug)]
struct LzwEncoderState {
    writer: MsbBitWriter,
    /// (prefix code << 8 | next byte) -> assigned code
    dictionary: HashMap<u32, u16>,
    next_code: u16,
    code_width: u8,
    /// Code for the longest match seen so far, not yet emitted
    prefix: Option<u16>,
    started: bool,
}

impl LzwEncoderState {
    fn new(writer: MsbBitWriter) -> Self {
        LzwEncoderState {
            writer,
            dictionary: HashMap::with_capacity(TABLE_SIZE),
            next_code: FIRST_CODE,
            code_width: MIN_BITS,
            prefix: None,
            started: false,
        }
    }

    #[inline]
    fn emit(&mut self, code: u16) {
        debug_assert!(code <= max_code(MAX_BITS));
        self.writer.write_bits(code as u32, self.code_width);
    }

    fn reset_table(&mut self) {
        self.dictionary.clear();
        self.next_code = FIRST_CODE;
        self.code_width = MIN_BITS;
    }

    fn start(&mut self) {
        if !self.started {
            self.emit(CLEAR_CODE);
            self.started = true;
        }
    }

    fn encode(&mut self, data: &[u8]) {
        self.start();

        for &byte in data {
            let prefix = match self.prefix {
                Some(code) => code,
                None => {
                    self.prefix = Some(byte as u16);
                    continue;
                }
            };

            let key = (prefix as u32) << 8 | byte as u32;
            if let Some(&code) = self.dictionary.get(&key) {
                self.prefix = Some(code);
                continue;
            }

            self.emit(prefix);
            self.dictionary.insert(key, self.next_code);
            self.next_code += 1;

            if self.next_code == TABLE_FULL {
                self.emit(CLEAR_CODE);
                self.reset_table();
            } else if self.next_code > max_code(self.code_width) {
                self.code_width += 1;
            }

            self.prefix = Some(byte as u16);
        }
    }

    fn finish(&mut self) {
        self.start();

        if let Some(prefix) = self.prefix.take() {
            self.emit(prefix);
            // The decoder adds an entry for this code before it reads EOI
            let next = self.next_code + 1;
            if next == TABLE_FULL {
                self.emit(CLEAR_CODE);
                self.code_width = MIN_BITS;
            } else if next > max_code(self.code_width) {
                self.code_width += 1;
            }
        }

        self.emit(EOI_CODE);
        self.writer.pad_to_byte();
    }
}

/// TIFF LZW compressor
pub struct LzwCompressor<W: Write> {
    sink: W,
    state: LzwEncoderState,
    predictor: Option<HorizontalPredictor>,
    /// Differenced copy of the current row; only leased with a predictor
    scratch: Option<PooledBuffer>,
    row_bytes: usize,
}

impl<W: Write> LzwCompressor<W> {
    pub fn new(sink: W, pool: &BufferPool, row_bytes: usize, predictor: Option<HorizontalPredictor>) -> CodecResult<Self> {
        // Every input byte produces at most one 12-bit code, plus Clear/EOI
        let output = pool.acquire((row_bytes + 4) * 2)?;
        let scratch = match predictor {
            Some(_) => Some(pool.acquire(row_bytes)?),
            None => None,
        };
        debug!("LZW compressor ready for {} byte rows (predictor: {})", row_bytes, predictor.is_some());

        Ok(LzwCompressor {
            sink,
            state: LzwEncoderState::new(MsbBitWriter::new(output)),
            predictor,
            scratch,
            row_bytes,
        })
    }

    /// Width in bits of the next code the encoder will emit
    pub fn code_width(&self) -> u8 {
        self.state.code_width
    }

    /// Number of dictionary entries, literal and control codes included
    pub fn table_len(&self) -> usize {
        self.state.next_code as usize
    }
}

impl<W: Write> RowCompressor for LzwCompressor<W> {
    type Sink = W;

    fn compress_row(&mut self, row: &[u8]) -> CodecResult<()> {
        validate_row_length(self.row_bytes, row.len())?;

        match (&self.predictor, &mut self.scratch) {
            (Some(predictor), Some(scratch)) => {
                scratch.clear();
                scratch.extend_from_slice(row);
                predictor.difference(&mut scratch[..]);
                self.state.encode(&scratch[..]);
            }
            _ => self.state.encode(row),
        }

        self.state.writer.drain_to(&mut self.sink)?;
        Ok(())
    }

    fn finish(mut self) -> CodecResult<W> {
        self.state.finish();
        self.state.writer.drain_to(&mut self.sink)?;
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    fn method(&self) -> CompressionMethod {
        CompressionMethod::Lzw
    }
}

/// TIFF LZW decoder
pub struct LzwDecoder {
    row_bytes: usize,
    predictor: Option<HorizontalPredictor>,
}

impl LzwDecoder {
    pub fn new(row_bytes: usize, predictor: Option<HorizontalPredictor>) -> Self {
        LzwDecoder { row_bytes, predictor }
    }

    fn initial_table() -> Vec<Vec<u8>> {
        let mut table: Vec<Vec<u8>> = Vec::with_capacity(TABLE_SIZE);
        table.extend((0..=255u8).map(|b| vec![b]));
        // Clear and EOI hold no string
        table.push(Vec::new());
        table.push(Vec::new());
        table
    }

    /// Decode codes until EOI, end of data or `limit` output bytes
    fn decode_codes(&self, data: &[u8], limit: usize) -> CodecResult<Vec<u8>> {
        let mut output = Vec::with_capacity(limit);
        let mut reader = MsbBitReader::new(data);
        let mut table = Self::initial_table();
        let mut width = MIN_BITS;
        let mut previous: Option<u16> = None;

        while output.len() < limit {
            let position = reader.bits_read();
            let code = reader.read_bits(width)? as u16;

            if code == EOI_CODE {
                break;
            }
            if code == CLEAR_CODE {
                table.truncate(FIRST_CODE as usize);
                width = MIN_BITS;
                previous = None;
                continue;
            }

            match previous {
                None => {
                    if code > 255 {
                        return Err(CodecError::InvalidCode { code: code as u32, position });
                    }
                    output.push(code as u8);
                }
                Some(prev) => {
                    let entry = if (code as usize) < table.len() {
                        table[code as usize].clone()
                    } else if code as usize == table.len() {
                        // KwKwK case: the code being defined right now
                        let mut entry = table[prev as usize].clone();
                        entry.push(entry[0]);
                        entry
                    } else {
                        return Err(CodecError::InvalidCode { code: code as u32, position });
                    };

                    if table.len() < TABLE_SIZE {
                        let mut added = table[prev as usize].clone();
                        added.push(entry[0]);
                        table.push(added);
                    }
                    output.extend_from_slice(&entry);
                }
            }
            previous = Some(code);

            // Mirrors the encoder's early change, one entry behind it
            if width < MAX_BITS && table.len() + 1 >= 1 << width {
                width += 1;
            }
        }

        Ok(output)
    }
}

impl StripDecompressor for LzwDecoder {
    fn decompress(&self, data: &[u8], rows: usize) -> CodecResult<Vec<u8>> {
        let expected = rows * self.row_bytes;
        let mut output = self.decode_codes(data, expected)?;

        if output.len() < expected {
            return Err(CodecError::TruncatedData { expected, actual: output.len() });
        }
        output.truncate(expected);

        if let Some(predictor) = &self.predictor {
            predictor.accumulate_rows(&mut output, self.row_bytes);
        }
        debug!("LZW decoded {} rows from {} bytes", rows, data.len());
        Ok(output)
    }

    fn method(&self) -> CompressionMethod {
        CompressionMethod::Lzw
    }
}
