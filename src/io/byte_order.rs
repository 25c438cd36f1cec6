//! Byte order handling for multi-byte samples
//!
//! This module implements the Strategy pattern for reading and writing
//! 16, 32 and 64-bit samples stored in either byte order inside a row.

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};

use crate::tiff::errors::{CodecError, CodecResult};

/// Byte order of the samples in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    #[default]
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

static LITTLE_ENDIAN_HANDLER: LittleEndianHandler = LittleEndianHandler;
static BIG_ENDIAN_HANDLER: BigEndianHandler = BigEndianHandler;

impl ByteOrder {
    /// Detects the byte order from a TIFF header marker
    pub fn from_marker(marker: [u8; 2]) -> CodecResult<Self> {
        match &marker {
            b"II" => Ok(ByteOrder::LittleEndian),
            b"MM" => Ok(ByteOrder::BigEndian),
            _ => Err(CodecError::GenericError(format!("Invalid byte order marker: {:02x?}", marker))),
        }
    }

    /// Parse a user-facing name ("little", "big", "II", "MM")
    pub fn from_name(name: &str) -> CodecResult<Self> {
        match name.to_lowercase().as_str() {
            "little" | "le" | "ii" => Ok(ByteOrder::LittleEndian),
            "big" | "be" | "mm" => Ok(ByteOrder::BigEndian),
            _ => Err(CodecError::GenericError(format!("Unknown byte order: {}", name))),
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Returns the handler for this byte order
    pub fn handler(&self) -> &'static dyn ByteOrderHandler {
        match self {
            ByteOrder::LittleEndian => &LITTLE_ENDIAN_HANDLER,
            ByteOrder::BigEndian => &BIG_ENDIAN_HANDLER,
        }
    }
}

/// Trait for byte order handling strategies
///
/// Every method reads or writes at the start of `buf`, which must be
/// at least as long as the value.
pub trait ByteOrderHandler: Send + Sync {
    fn read_u16(&self, buf: &[u8]) -> u16;
    fn read_u32(&self, buf: &[u8]) -> u32;
    fn read_u64(&self, buf: &[u8]) -> u64;
    fn write_u16(&self, buf: &mut [u8], value: u16);
    fn write_u32(&self, buf: &mut [u8], value: u32);
    fn write_u64(&self, buf: &mut [u8], value: u64);
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_u16(&self, buf: &[u8]) -> u16 {
        LittleEndian::read_u16(buf)
    }

    fn read_u32(&self, buf: &[u8]) -> u32 {
        LittleEndian::read_u32(buf)
    }

    fn read_u64(&self, buf: &[u8]) -> u64 {
        LittleEndian::read_u64(buf)
    }

    fn write_u16(&self, buf: &mut [u8], value: u16) {
        LittleEndian::write_u16(buf, value)
    }

    fn write_u32(&self, buf: &mut [u8], value: u32) {
        LittleEndian::write_u32(buf, value)
    }

    fn write_u64(&self, buf: &mut [u8], value: u64) {
        LittleEndian::write_u64(buf, value)
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_u16(&self, buf: &[u8]) -> u16 {
        BigEndian::read_u16(buf)
    }

    fn read_u32(&self, buf: &[u8]) -> u32 {
        BigEndian::read_u32(buf)
    }

    fn read_u64(&self, buf: &[u8]) -> u64 {
        BigEndian::read_u64(buf)
    }

    fn write_u16(&self, buf: &mut [u8], value: u16) {
        BigEndian::write_u16(buf, value)
    }

    fn write_u32(&self, buf: &mut [u8], value: u32) {
        BigEndian::write_u32(buf, value)
    }

    fn write_u64(&self, buf: &mut [u8], value: u64) {
        BigEndian::write_u64(buf, value)
    }
}
