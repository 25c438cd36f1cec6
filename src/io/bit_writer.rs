//! MSB-first bit writer
//!
//! Codes are packed most significant bit first. Complete bytes collect in a
//! pooled buffer and are drained to the sink by the owning codec; the partial
//! byte stays in the accumulator until more bits arrive or the stream is padded.

use std::io::{self, Write};

use crate::compression::pool::PooledBuffer;

/// Widest value a single `write_bits` call accepts
pub const MAX_WRITE_BITS: u8 = 24;

/// MSB-first bit writer over a pooled byte buffer
#[derive(Debug)]
pub struct MsbBitWriter {
    /// Completed bytes not yet drained
    output: PooledBuffer,
    /// Bit accumulator (right-aligned)
    buffer: u32,
    /// Number of valid bits in the accumulator, always below 8 between calls
    bits_in_buffer: u8,
}

impl MsbBitWriter {
    /// Create a writer collecting bytes into `output`
    pub fn new(mut output: PooledBuffer) -> Self {
        output.clear();
        MsbBitWriter {
            output,
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Write the low `count` bits of `value`, most significant first
    pub fn write_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= MAX_WRITE_BITS, "bit count {} too wide", count);
        if count == 0 {
            return;
        }

        self.buffer = (self.buffer << count) | (value & ((1u32 << count) - 1));
        self.bits_in_buffer += count;

        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }
        self.buffer &= (1u32 << self.bits_in_buffer) - 1;
    }

    /// Pad the partial byte with zero bits
    pub fn pad_to_byte(&mut self) {
        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            self.write_bits(0, padding);
        }
    }

    /// Bits held in the partial byte
    pub fn pending_bits(&self) -> u8 {
        self.bits_in_buffer
    }

    /// Write completed bytes to `sink`, keeping the partial byte
    pub fn drain_to<W: Write>(&mut self, sink: &mut W) -> io::Result<()> {
        if !self.output.is_empty() {
            sink.write_all(&self.output)?;
            self.output.clear();
        }
        Ok(())
    }

    /// Pad to a byte boundary and write everything to `sink`
    pub fn flush_to<W: Write>(&mut self, sink: &mut W) -> io::Result<()> {
        self.pad_to_byte();
        self.drain_to(sink)
    }
}
