//! Low-level I/O helpers
//!
//! Byte order handling for multi-byte samples and MSB-first bit packing
//! shared by the LZW and CCITT codecs.

pub mod byte_order;
pub mod bit_writer;
pub mod bit_reader;
