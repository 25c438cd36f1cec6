//! Factory for creating codecs
//!
//! [`CompressorFactory::create`] is the only way to build a compressor. It
//! validates the configuration first, so every combination error surfaces
//! before a byte reaches the sink.

use std::io::Write;
use log::debug;

use crate::tiff::errors::CodecResult;
use crate::tiff::types::{CodecConfig, CompressionMethod, Predictor};
use crate::tiff::validation::validate_config;
use super::deflate::{DeflateCompressor, DeflateDecoder};
use super::handler::{RowCompressor, StripDecompressor};
use super::lzw::{LzwCompressor, LzwDecoder};
use super::packbits::{PackBitsCompressor, PackBitsDecoder};
use super::pool::BufferPool;
use super::predictor::HorizontalPredictor;
use super::t4::{T4Compressor, T4Decoder, T4Framing};
use super::uncompressed::{NoCompressor, UncompressedDecoder};

/// A compressor for one of the supported methods
pub enum Compressor<W: Write> {
    None(NoCompressor<W>),
    PackBits(PackBitsCompressor<W>),
    Deflate(DeflateCompressor<W>),
    Lzw(LzwCompressor<W>),
    T4(T4Compressor<W>),
}

impl<W: Write> RowCompressor for Compressor<W> {
    type Sink = W;

    fn compress_row(&mut self, row: &[u8]) -> CodecResult<()> {
        match self {
            Compressor::None(c) => c.compress_row(row),
            Compressor::PackBits(c) => c.compress_row(row),
            Compressor::Deflate(c) => c.compress_row(row),
            Compressor::Lzw(c) => c.compress_row(row),
            Compressor::T4(c) => c.compress_row(row),
        }
    }

    fn finish(self) -> CodecResult<W> {
        match self {
            Compressor::None(c) => c.finish(),
            Compressor::PackBits(c) => c.finish(),
            Compressor::Deflate(c) => c.finish(),
            Compressor::Lzw(c) => c.finish(),
            Compressor::T4(c) => c.finish(),
        }
    }

    fn row_bytes(&self) -> usize {
        match self {
            Compressor::None(c) => c.row_bytes(),
            Compressor::PackBits(c) => c.row_bytes(),
            Compressor::Deflate(c) => c.row_bytes(),
            Compressor::Lzw(c) => c.row_bytes(),
            Compressor::T4(c) => c.row_bytes(),
        }
    }

    fn method(&self) -> CompressionMethod {
        match self {
            Compressor::None(c) => c.method(),
            Compressor::PackBits(c) => c.method(),
            Compressor::Deflate(c) => c.method(),
            Compressor::Lzw(c) => c.method(),
            Compressor::T4(c) => c.method(),
        }
    }
}

/// Factory for creating codecs
pub struct CompressorFactory;

impl CompressorFactory {
    fn predictor_for(config: &CodecConfig) -> CodecResult<Option<HorizontalPredictor>> {
        match config.predictor {
            Predictor::None => Ok(None),
            Predictor::HorizontalDifferencing => Ok(Some(HorizontalPredictor::from_config(config)?)),
        }
    }

    /// Create a compressor writing to `sink`, with scratch leased from `pool`
    pub fn create<W: Write>(config: &CodecConfig, sink: W, pool: &BufferPool) -> CodecResult<Compressor<W>> {
        validate_config(config)?;
        let row_bytes = config.row_bytes();
        debug!("Creating compressor: {}", config);

        let compressor = match config.method {
            CompressionMethod::None => Compressor::None(NoCompressor::new(sink, row_bytes)),
            CompressionMethod::PackBits => Compressor::PackBits(PackBitsCompressor::new(sink, pool, row_bytes)?),
            CompressionMethod::Deflate => Compressor::Deflate(DeflateCompressor::new(
                sink, pool, row_bytes, Self::predictor_for(config)?, config.compression_level)?),
            CompressionMethod::Lzw => Compressor::Lzw(LzwCompressor::new(
                sink, pool, row_bytes, Self::predictor_for(config)?)?),
            CompressionMethod::CcittGroup3Fax | CompressionMethod::ModifiedHuffman => {
                let framing = T4Framing::for_method(config.method, config.fax);
                Compressor::T4(T4Compressor::new(sink, pool, config.row_width_in_samples as usize, framing)?)
            }
        };

        Ok(compressor)
    }

    /// Create the decoder matching `config`
    pub fn create_decoder(config: &CodecConfig) -> CodecResult<Box<dyn StripDecompressor>> {
        validate_config(config)?;
        let row_bytes = config.row_bytes();

        let decoder: Box<dyn StripDecompressor> = match config.method {
            CompressionMethod::None => Box::new(UncompressedDecoder::new(row_bytes)),
            CompressionMethod::PackBits => Box::new(PackBitsDecoder::new(row_bytes)),
            CompressionMethod::Deflate => Box::new(DeflateDecoder::new(row_bytes, Self::predictor_for(config)?)),
            CompressionMethod::Lzw => Box::new(LzwDecoder::new(row_bytes, Self::predictor_for(config)?)),
            CompressionMethod::CcittGroup3Fax | CompressionMethod::ModifiedHuffman => {
                let framing = T4Framing::for_method(config.method, config.fax);
                Box::new(T4Decoder::new(config.row_width_in_samples as usize, framing))
            }
        };

        Ok(decoder)
    }

    /// Get a method by name
    pub fn method_by_name(name: &str) -> CodecResult<CompressionMethod> {
        CompressionMethod::from_name(name)
    }

    /// Get all available methods
    pub fn available_methods() -> Vec<CompressionMethod> {
        CompressionMethod::ALL.to_vec()
    }
}
