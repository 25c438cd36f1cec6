//! Custom error types for strip compression

use std::fmt;
use std::io;

/// Broad classes of codec failures
///
/// Callers use this to decide what to do with a failed session: configuration
/// errors are programming mistakes, encode/decode errors invalidate the strip,
/// resource errors may be worth retrying with a larger pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid method/predictor/level/bit-depth combination
    Configuration,
    /// Data-dependent failure while compressing
    Encode,
    /// Malformed or truncated compressed data
    Decode,
    /// Scratch memory could not be obtained
    Resource,
    /// The sink or source failed
    Io,
    /// The session was cancelled between rows
    Cancelled,
}

/// Configuration field that violated a combination rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Method,
    Predictor,
    CompressionLevel,
    BitsPerSample,
    RowWidth,
    SamplesPerPixel,
    FaxOptions,
    RowsPerStrip,
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigField::Method => "method",
            ConfigField::Predictor => "predictor",
            ConfigField::CompressionLevel => "compression level",
            ConfigField::BitsPerSample => "bits per sample",
            ConfigField::RowWidth => "row width",
            ConfigField::SamplesPerPixel => "samples per pixel",
            ConfigField::FaxOptions => "fax options",
            ConfigField::RowsPerStrip => "rows per strip",
        };
        write!(f, "{}", name)
    }
}

/// Codec error types
#[derive(Debug)]
pub enum CodecError {
    /// I/O error from the sink or a source file
    IoError(io::Error),
    /// Invalid codec configuration
    InvalidConfig { field: ConfigField, reason: String },
    /// Unknown compression code or name
    UnsupportedCompression(String),
    /// Codec cannot handle the configured sample depth
    UnsupportedBitDepth { method: &'static str, bits_per_sample: u16 },
    /// Row does not have the configured length
    RowLengthMismatch { expected: usize, actual: usize },
    /// Compressed stream contains a code the decoder cannot resolve
    InvalidCode { code: u32, position: u64 },
    /// Compressed stream is structurally wrong
    MalformedData(String),
    /// Compressed stream ended early
    TruncatedData { expected: usize, actual: usize },
    /// Scratch memory could not be obtained from the pool
    ResourceExhausted { requested: usize, available: usize },
    /// Session cancelled between rows
    Cancelled,
    /// Generic error with message
    GenericError(String),
}

impl CodecError {
    /// Shorthand for a configuration error on `field`
    pub fn config(field: ConfigField, reason: impl Into<String>) -> Self {
        CodecError::InvalidConfig { field, reason: reason.into() }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::IoError(_) => ErrorKind::Io,
            CodecError::InvalidConfig { .. } | CodecError::UnsupportedCompression(_) => ErrorKind::Configuration,
            CodecError::UnsupportedBitDepth { .. } | CodecError::RowLengthMismatch { .. } => ErrorKind::Encode,
            CodecError::InvalidCode { .. } | CodecError::MalformedData(_) | CodecError::TruncatedData { .. } => ErrorKind::Decode,
            CodecError::ResourceExhausted { .. } => ErrorKind::Resource,
            CodecError::Cancelled => ErrorKind::Cancelled,
            CodecError::GenericError(_) => ErrorKind::Encode,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::IoError(e) => write!(f, "I/O error: {}", e),
            CodecError::InvalidConfig { field, reason } => write!(f, "Invalid {}: {}", field, reason),
            CodecError::UnsupportedCompression(c) => write!(f, "Unsupported compression method: {}", c),
            CodecError::UnsupportedBitDepth { method, bits_per_sample } =>
                write!(f, "{} does not support {} bits per sample", method, bits_per_sample),
            CodecError::RowLengthMismatch { expected, actual } =>
                write!(f, "Row length mismatch: expected {} bytes, got {}", expected, actual),
            CodecError::InvalidCode { code, position } =>
                write!(f, "Invalid code {} at bit {}", code, position),
            CodecError::MalformedData(msg) => write!(f, "Malformed compressed data: {}", msg),
            CodecError::TruncatedData { expected, actual } =>
                write!(f, "Truncated data: expected {} bytes, got {}", expected, actual),
            CodecError::ResourceExhausted { requested, available } =>
                write!(f, "Scratch pool exhausted: requested {} bytes, {} available", requested, available),
            CodecError::Cancelled => write!(f, "Compression session cancelled"),
            CodecError::GenericError(msg) => write!(f, "Codec error: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(error: io::Error) -> Self {
        CodecError::IoError(error)
    }
}

impl From<String> for CodecError {
    fn from(msg: String) -> Self {
        CodecError::GenericError(msg)
    }
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
