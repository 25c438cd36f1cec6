//! Compression handling for TIFF strips
//!
//! This module implements the row codecs for each compression method, the
//! factory that selects and configures them, and the drivers built on top.

pub mod pool;
pub mod predictor;
mod handler;
mod uncompressed;
mod packbits;
mod lzw;
mod deflate;
mod t4;
mod factory;
mod strip;
mod converter;
#[cfg(test)]
mod tests;

pub use handler::{RowCompressor, StripDecompressor};
pub use uncompressed::{NoCompressor, UncompressedDecoder};
pub use packbits::{pack_row, unpack_row, PackBitsCompressor, PackBitsDecoder};
pub use lzw::{LzwCompressor, LzwDecoder};
pub use deflate::{DeflateCompressor, DeflateDecoder};
pub use t4::{run_codes, T4Compressor, T4Decoder, T4Framing};
pub use factory::{Compressor, CompressorFactory};
pub use strip::{CancellationToken, StripEncoder};
pub use converter::CompressionConverter;
pub use pool::{BufferPool, PooledBuffer};
pub use predictor::HorizontalPredictor;
