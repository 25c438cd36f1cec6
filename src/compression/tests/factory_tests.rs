use crate::compression::{BufferPool, CompressorFactory, RowCompressor};
use crate::tiff::errors::{CodecError, ConfigField, ErrorKind};
use crate::tiff::types::{CodecConfig, CompressionLevel, CompressionMethod, FaxOptions, Predictor};
use super::test_utils::{assert_round_trip, lcg_bytes, lcg_symbols};

fn config_error(config: &CodecConfig) -> CodecError {
    let pool = BufferPool::new();
    CompressorFactory::create(config, Vec::new(), &pool).err().unwrap()
}

#[test]
fn test_deflate_defaults_accepted() {
    let pool = BufferPool::new();
    let config = CodecConfig::new(CompressionMethod::Deflate, 64, 8);
    let compressor = CompressorFactory::create(&config, Vec::new(), &pool).unwrap();
    assert_eq!(compressor.method(), CompressionMethod::Deflate);
    assert_eq!(compressor.row_bytes(), 64);
}

#[test]
fn test_packbits_with_predictor_rejected() {
    let config = CodecConfig::new(CompressionMethod::PackBits, 64, 8)
        .with_predictor(Predictor::HorizontalDifferencing);
    let err = config_error(&config);
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(err, CodecError::InvalidConfig { field: ConfigField::Predictor, .. }));
}

#[test]
fn test_none_with_level_rejected() {
    let config = CodecConfig::new(CompressionMethod::None, 64, 8)
        .with_compression_level(CompressionLevel::Best);
    let err = config_error(&config);
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(err, CodecError::InvalidConfig { field: ConfigField::CompressionLevel, .. }));
}

#[test]
fn test_decoder_validates_too() {
    let config = CodecConfig::new(CompressionMethod::Lzw, 64, 8)
        .with_compression_level(CompressionLevel::Fastest);
    assert!(CompressorFactory::create_decoder(&config).is_err());
}

#[test]
fn test_codec_names() {
    let pool = BufferPool::new();
    for method in CompressorFactory::available_methods() {
        let bits = if method.is_bilevel() { 1 } else { 8 };
        let config = CodecConfig::new(method, 16, bits);
        let compressor = CompressorFactory::create(&config, Vec::new(), &pool).unwrap();
        let decoder = CompressorFactory::create_decoder(&config).unwrap();
        assert_eq!(compressor.method(), method);
        assert_eq!(decoder.method(), method);
        assert_eq!(compressor.name(), method.name());
    }
    assert_eq!(CompressorFactory::method_by_name("lzw").unwrap(), CompressionMethod::Lzw);
}

#[test]
fn test_none_writes_rows_unchanged() {
    let pool = BufferPool::new();
    let config = CodecConfig::new(CompressionMethod::None, 3, 8);
    let mut compressor = CompressorFactory::create(&config, Vec::new(), &pool).unwrap();
    compressor.compress_row(&[1, 2, 3]).unwrap();
    compressor.compress_row(&[4, 5, 6]).unwrap();
    assert_eq!(compressor.finish().unwrap(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_compress_rows_requires_whole_rows() {
    let pool = BufferPool::new();
    let config = CodecConfig::new(CompressionMethod::None, 4, 8);
    let mut compressor = CompressorFactory::create(&config, Vec::new(), &pool).unwrap();
    let err = compressor.compress_rows(&[0u8; 6]).unwrap_err();
    assert!(matches!(err, CodecError::RowLengthMismatch { actual: 6, .. }));
}

/// Representative strips: all zero, all one, random, repetitive, one odd pixel
fn contents(row_bytes: usize, rows: usize) -> Vec<Vec<u8>> {
    let len = row_bytes * rows;
    let mut isolated = vec![0u8; len];
    isolated[len / 2] = 0x08;
    vec![
        vec![0u8; len],
        vec![0xFF; len],
        lcg_bytes(len as u64, len),
        lcg_symbols(3, len, 2),
        isolated,
    ]
}

#[test]
fn test_every_codec_round_trips() {
    let byte_configs = [
        CodecConfig::new(CompressionMethod::None, 40, 8),
        CodecConfig::new(CompressionMethod::PackBits, 40, 8),
        CodecConfig::new(CompressionMethod::PackBits, 80, 4),
        CodecConfig::new(CompressionMethod::Lzw, 40, 8),
        CodecConfig::new(CompressionMethod::Lzw, 20, 16)
            .with_predictor(Predictor::HorizontalDifferencing),
        CodecConfig::new(CompressionMethod::Lzw, 10, 32)
            .with_samples_per_pixel(2)
            .with_predictor(Predictor::HorizontalDifferencing),
        CodecConfig::new(CompressionMethod::Deflate, 40, 8),
        CodecConfig::new(CompressionMethod::Deflate, 5, 64)
            .with_predictor(Predictor::HorizontalDifferencing),
        CodecConfig::new(CompressionMethod::Deflate, 40, 8)
            .with_samples_per_pixel(4)
            .with_predictor(Predictor::HorizontalDifferencing)
            .with_compression_level(CompressionLevel::Best),
        CodecConfig::new(CompressionMethod::ModifiedHuffman, 320, 1),
        CodecConfig::new(CompressionMethod::CcittGroup3Fax, 320, 1),
        CodecConfig::new(CompressionMethod::CcittGroup3Fax, 320, 1)
            .with_fax_options(FaxOptions { eol_byte_aligned: true }),
    ];

    for config in &byte_configs {
        for image in contents(config.row_bytes(), 12) {
            assert_round_trip(config, &image);
        }
    }
}
