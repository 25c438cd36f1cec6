use crate::compression::{BufferPool, CancellationToken, StripEncoder};
use crate::tiff::errors::{CodecError, ConfigField, ErrorKind};
use crate::tiff::types::{CodecConfig, CompressionMethod, Predictor};
use crate::utils::progress::ProgressTracker;
use super::test_utils::{compress, lcg_symbols};

fn lzw(width: u32) -> CodecConfig {
    CodecConfig::new(CompressionMethod::Lzw, width, 8)
}

#[test]
fn test_strip_ranges() {
    let pool = BufferPool::new();
    let encoder = StripEncoder::new(lzw(4), &pool);
    assert_eq!(encoder.strip_ranges(5).unwrap(), vec![0..5]);

    let encoder = encoder.rows_per_strip(Some(2));
    assert_eq!(encoder.strip_ranges(5).unwrap(), vec![0..2, 2..4, 4..5]);
    assert_eq!(encoder.strip_ranges(4).unwrap(), vec![0..2, 2..4]);

    let encoder = encoder.rows_per_strip(Some(0));
    let err = encoder.strip_ranges(5).unwrap_err();
    assert!(matches!(err, CodecError::InvalidConfig { field: ConfigField::RowsPerStrip, .. }));
}

#[test]
fn test_single_strip_keeps_one_session() {
    let pool = BufferPool::new();
    let image = lcg_symbols(5, 16 * 10, 3);
    let strips = StripEncoder::new(lzw(16), &pool).encode(&image, 10).unwrap();
    assert_eq!(strips, vec![compress(&lzw(16), &image)]);
}

#[test]
fn test_each_strip_restarts_the_codec() {
    let pool = BufferPool::new();
    let image = lcg_symbols(6, 16 * 10, 3);
    let encoder = StripEncoder::new(lzw(16), &pool).rows_per_strip(Some(4));
    let strips = encoder.encode(&image, 10).unwrap();

    assert_eq!(strips.len(), 3);
    assert_eq!(strips[1], compress(&lzw(16), &image[64..128]));
    assert_eq!(strips[2], compress(&lzw(16), &image[128..]));
    assert_eq!(encoder.decode(&strips, 10).unwrap(), image);
}

#[test]
fn test_parallel_matches_sequential() {
    let pool = BufferPool::new();
    let config = CodecConfig::new(CompressionMethod::Deflate, 48, 8)
        .with_samples_per_pixel(3)
        .with_predictor(Predictor::HorizontalDifferencing);
    let image = lcg_symbols(8, 48 * 37, 7);
    let encoder = StripEncoder::new(config, &pool).rows_per_strip(Some(5));

    let sequential = encoder.encode(&image, 37).unwrap();
    let parallel = encoder.encode_parallel(&image, 37).unwrap();
    assert_eq!(sequential, parallel);
    assert_eq!(encoder.decode(&parallel, 37).unwrap(), image);
    assert_eq!(pool.outstanding(), 0);
}

#[test]
fn test_cancellation_stops_between_rows() {
    let pool = BufferPool::new();
    let token = CancellationToken::new();
    token.cancel();

    let config = CodecConfig::new(CompressionMethod::PackBits, 8, 8);
    let encoder = StripEncoder::new(config, &pool).with_cancellation(&token);
    let err = encoder.encode(&[0u8; 32], 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(pool.outstanding(), 0);
}

#[test]
fn test_image_size_checked() {
    let pool = BufferPool::new();
    let encoder = StripEncoder::new(lzw(8), &pool);
    let err = encoder.encode(&[0u8; 20], 3).unwrap_err();
    assert!(matches!(err, CodecError::RowLengthMismatch { expected: 24, actual: 20 }));
}

#[test]
fn test_progress_counts_rows() {
    let pool = BufferPool::new();
    let progress = ProgressTracker::hidden(6);
    let encoder = StripEncoder::new(lzw(8), &pool)
        .rows_per_strip(Some(4))
        .with_progress(&progress);
    encoder.encode(&[1u8; 48], 6).unwrap();
    assert_eq!(progress.position(), 6);
}

#[test]
fn test_decode_checks_strip_count() {
    let pool = BufferPool::new();
    let encoder = StripEncoder::new(lzw(8), &pool).rows_per_strip(Some(2));
    let strips = encoder.encode(&[1u8; 32], 4).unwrap();
    let err = encoder.decode(&strips[..1], 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}
