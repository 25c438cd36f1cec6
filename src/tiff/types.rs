//! Core codec configuration types

use std::fmt;

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::{compression, predictor};
use crate::tiff::errors::{CodecError, CodecResult};

/// Compression method for a strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
    None,
    PackBits,
    Deflate,
    Lzw,
    CcittGroup3Fax,
    ModifiedHuffman,
}

impl CompressionMethod {
    /// All supported methods
    pub const ALL: [CompressionMethod; 6] = [
        CompressionMethod::None,
        CompressionMethod::PackBits,
        CompressionMethod::Deflate,
        CompressionMethod::Lzw,
        CompressionMethod::CcittGroup3Fax,
        CompressionMethod::ModifiedHuffman,
    ];

    /// Value written to the Compression tag
    pub fn code(&self) -> u16 {
        match self {
            CompressionMethod::None => compression::NONE,
            CompressionMethod::PackBits => compression::PACKBITS,
            CompressionMethod::Deflate => compression::ADOBE_DEFLATE,
            CompressionMethod::Lzw => compression::LZW,
            CompressionMethod::CcittGroup3Fax => compression::CCITT_GROUP3_FAX,
            CompressionMethod::ModifiedHuffman => compression::CCITT_MODIFIED_HUFFMAN,
        }
    }

    /// Resolve a Compression tag value
    pub fn from_code(code: u16) -> CodecResult<Self> {
        match code {
            compression::NONE => Ok(CompressionMethod::None),
            compression::PACKBITS => Ok(CompressionMethod::PackBits),
            compression::ADOBE_DEFLATE | compression::DEFLATE => Ok(CompressionMethod::Deflate),
            compression::LZW => Ok(CompressionMethod::Lzw),
            compression::CCITT_GROUP3_FAX => Ok(CompressionMethod::CcittGroup3Fax),
            compression::CCITT_MODIFIED_HUFFMAN => Ok(CompressionMethod::ModifiedHuffman),
            _ => Err(CodecError::UnsupportedCompression(code.to_string())),
        }
    }

    /// Resolve a method from a user-facing name
    pub fn from_name(name: &str) -> CodecResult<Self> {
        match name.to_lowercase().as_str() {
            "none" | "uncompressed" => Ok(CompressionMethod::None),
            "packbits" | "rle" => Ok(CompressionMethod::PackBits),
            "deflate" | "zip" | "adobe deflate" => Ok(CompressionMethod::Deflate),
            "lzw" => Ok(CompressionMethod::Lzw),
            "g3" | "fax3" | "ccitt" | "ccittgroup3fax" => Ok(CompressionMethod::CcittGroup3Fax),
            "mh" | "huffman" | "modifiedhuffman" => Ok(CompressionMethod::ModifiedHuffman),
            _ => Err(CodecError::UnsupportedCompression(name.to_string())),
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            CompressionMethod::None => "Uncompressed",
            CompressionMethod::PackBits => "PackBits",
            CompressionMethod::Deflate => "Adobe Deflate",
            CompressionMethod::Lzw => "LZW",
            CompressionMethod::CcittGroup3Fax => "CCITT Group 3",
            CompressionMethod::ModifiedHuffman => "CCITT Modified Huffman",
        }
    }

    /// Whether a predictor may precede this method
    pub fn supports_predictor(&self) -> bool {
        matches!(self, CompressionMethod::Deflate | CompressionMethod::Lzw)
    }

    /// Whether this method only encodes 1-bit samples
    pub fn is_bilevel(&self) -> bool {
        matches!(self, CompressionMethod::CcittGroup3Fax | CompressionMethod::ModifiedHuffman)
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Reversible transform applied to each row before compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Predictor {
    #[default]
    None,
    HorizontalDifferencing,
}

impl Predictor {
    /// Value written to the Predictor tag
    pub fn code(&self) -> u16 {
        match self {
            Predictor::None => predictor::NONE,
            Predictor::HorizontalDifferencing => predictor::HORIZONTAL,
        }
    }

    /// Resolve a predictor from a user-facing name
    pub fn from_name(name: &str) -> CodecResult<Self> {
        match name.to_lowercase().as_str() {
            "none" | "1" => Ok(Predictor::None),
            "horizontal" | "2" => Ok(Predictor::HorizontalDifferencing),
            _ => Err(CodecError::GenericError(format!("Unknown predictor: {}", name))),
        }
    }
}

/// Deflate strength hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Method default; the only valid value for non-deflate methods
    #[default]
    Default,
    Fastest,
    Best,
    /// Explicit zlib level 0-9
    Level(u8),
}

impl CompressionLevel {
    /// Parse "default", "fastest", "best" or a number
    pub fn from_name(name: &str) -> CodecResult<Self> {
        match name.to_lowercase().as_str() {
            "default" => Ok(CompressionLevel::Default),
            "fastest" | "fast" => Ok(CompressionLevel::Fastest),
            "best" => Ok(CompressionLevel::Best),
            other => other.parse::<u8>()
                .map(CompressionLevel::Level)
                .map_err(|_| CodecError::GenericError(format!("Invalid compression level: {}", name))),
        }
    }
}

/// Options for CCITT Group 3 framing (the T4Options tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaxOptions {
    /// Insert fill bits so every EOL code ends on a byte boundary
    pub eol_byte_aligned: bool,
}

/// Immutable configuration for one compression session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    pub method: CompressionMethod,
    pub predictor: Predictor,
    pub compression_level: CompressionLevel,
    /// Samples in one row, all components included
    pub row_width_in_samples: u32,
    pub bits_per_sample: u16,
    /// Interleaved components per pixel; the predictor stride
    pub samples_per_pixel: u16,
    /// Byte order of multi-byte samples
    pub byte_order: ByteOrder,
    pub fax: FaxOptions,
}

impl CodecConfig {
    /// Create a configuration with no predictor and the default level
    pub fn new(method: CompressionMethod, row_width_in_samples: u32, bits_per_sample: u16) -> Self {
        CodecConfig {
            method,
            predictor: Predictor::None,
            compression_level: CompressionLevel::Default,
            row_width_in_samples,
            bits_per_sample,
            samples_per_pixel: 1,
            byte_order: ByteOrder::LittleEndian,
            fax: FaxOptions::default(),
        }
    }

    pub fn with_predictor(mut self, predictor: Predictor) -> Self {
        self.predictor = predictor;
        self
    }

    pub fn with_compression_level(mut self, level: CompressionLevel) -> Self {
        self.compression_level = level;
        self
    }

    pub fn with_samples_per_pixel(mut self, samples_per_pixel: u16) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_fax_options(mut self, fax: FaxOptions) -> Self {
        self.fax = fax;
        self
    }

    /// Same geometry, different method; predictor, level and fax options reset
    pub fn with_method(self, method: CompressionMethod) -> Self {
        CodecConfig {
            method,
            predictor: Predictor::None,
            compression_level: CompressionLevel::Default,
            fax: FaxOptions::default(),
            ..self
        }
    }

    /// Bytes in one packed row
    pub fn row_bytes(&self) -> usize {
        (self.row_width_in_samples as usize * self.bits_per_sample as usize + 7) / 8
    }
}

impl fmt::Display for CodecConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} samples x {} bits, {} per pixel, predictor {:?}, level {:?})",
               self.method, self.row_width_in_samples, self.bits_per_sample,
               self.samples_per_pixel, self.predictor, self.compression_level)
    }
}
