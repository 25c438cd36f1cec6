//! MSB-first bit reader for the decoders

use crate::tiff::errors::{CodecError, CodecResult};

/// MSB-first bit reader over a byte slice
#[derive(Debug)]
pub struct MsbBitReader<'a> {
    /// Input data
    data: &'a [u8],
    /// Next byte to load
    byte_pos: usize,
    /// Bit buffer (right-aligned)
    buffer: u32,
    /// Number of valid bits in buffer
    bits_in_buffer: u8,
    /// Total bits consumed
    total_bits_read: u64,
}

impl<'a> MsbBitReader<'a> {
    /// Create a new reader at the first bit of `data`
    pub fn new(data: &'a [u8]) -> Self {
        MsbBitReader {
            data,
            byte_pos: 0,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    #[inline]
    fn fill_buffer(&mut self, count: u8) -> CodecResult<()> {
        while self.bits_in_buffer < count && self.byte_pos < self.data.len() {
            self.buffer = (self.buffer << 8) | self.data[self.byte_pos] as u32;
            self.byte_pos += 1;
            self.bits_in_buffer += 8;
        }

        if self.bits_in_buffer < count {
            return Err(CodecError::TruncatedData {
                expected: ((self.total_bits_read + count as u64 + 7) / 8) as usize,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Read up to 24 bits
    pub fn read_bits(&mut self, count: u8) -> CodecResult<u32> {
        if count == 0 || count > 24 {
            return Err(CodecError::GenericError(format!("Invalid bit width: {}", count)));
        }
        self.fill_buffer(count)?;

        let shift = self.bits_in_buffer - count;
        let value = (self.buffer >> shift) & ((1u32 << count) - 1);
        self.bits_in_buffer -= count;
        self.buffer &= (1u32 << self.bits_in_buffer) - 1;
        self.total_bits_read += count as u64;

        Ok(value)
    }

    /// Read a single bit
    pub fn read_bit(&mut self) -> CodecResult<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Skip to the start of the next byte
    pub fn align_to_byte(&mut self) {
        let skip = self.bits_in_buffer % 8;
        self.bits_in_buffer -= skip;
        self.buffer &= (1u32 << self.bits_in_buffer) - 1;
        self.total_bits_read += skip as u64;
    }

    /// Total bits consumed
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }
}
