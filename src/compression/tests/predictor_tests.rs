use crate::compression::HorizontalPredictor;
use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::CodecError;
use crate::tiff::types::{CodecConfig, CompressionMethod, Predictor};
use super::test_utils::{assert_round_trip, lcg_bytes};

fn predictor(samples_per_pixel: u16, bits: u16, order: ByteOrder) -> HorizontalPredictor {
    HorizontalPredictor::new(samples_per_pixel, bits, order).unwrap()
}

#[test]
fn test_8bit_differences() {
    let p = predictor(1, 8, ByteOrder::LittleEndian);
    let mut row = [10, 12, 15, 15];
    p.difference(&mut row);
    assert_eq!(row, [10, 2, 3, 0]);
    p.accumulate(&mut row);
    assert_eq!(row, [10, 12, 15, 15]);
}

#[test]
fn test_differences_wrap() {
    let p = predictor(1, 8, ByteOrder::LittleEndian);
    let mut row = [200, 10, 255, 0];
    p.difference(&mut row);
    assert_eq!(row, [200, 66, 245, 1]);
    p.accumulate(&mut row);
    assert_eq!(row, [200, 10, 255, 0]);
}

#[test]
fn test_stride_follows_samples_per_pixel() {
    let p = predictor(3, 8, ByteOrder::LittleEndian);
    let mut row = [1, 2, 3, 4, 6, 8, 4, 6, 8];
    p.difference(&mut row);
    assert_eq!(row, [1, 2, 3, 3, 4, 5, 0, 0, 0]);

    let p = predictor(2, 8, ByteOrder::LittleEndian);
    let mut row = [9, 1, 10, 3];
    p.difference(&mut row);
    assert_eq!(row, [9, 1, 1, 2]);
}

#[test]
fn test_16bit_byte_orders() {
    let p = predictor(1, 16, ByteOrder::BigEndian);
    let mut row = [0x01, 0x00, 0x01, 0x02];
    p.difference(&mut row);
    assert_eq!(row, [0x01, 0x00, 0x00, 0x02]);

    let p = predictor(1, 16, ByteOrder::LittleEndian);
    let mut row = [0xFF, 0x00, 0x00, 0x01];
    p.difference(&mut row);
    assert_eq!(row, [0xFF, 0x00, 0x01, 0x00]);
    p.accumulate(&mut row);
    assert_eq!(row, [0xFF, 0x00, 0x00, 0x01]);
}

#[test]
fn test_32bit_wrap() {
    let p = predictor(1, 32, ByteOrder::LittleEndian);
    let mut row = [5, 0, 0, 0, 3, 0, 0, 0];
    p.difference(&mut row);
    assert_eq!(row, [5, 0, 0, 0, 0xFE, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn test_wide_samples_restore() {
    for (bits, order) in [(32, ByteOrder::BigEndian), (64, ByteOrder::LittleEndian), (64, ByteOrder::BigEndian)] {
        let p = predictor(2, bits, order);
        let original = lcg_bytes(bits as u64, 8 * 12);
        let mut row = original.clone();
        p.difference(&mut row);
        assert_ne!(row, original);
        p.accumulate(&mut row);
        assert_eq!(row, original);
    }
}

#[test]
fn test_rows_restore_independently() {
    let p = predictor(1, 8, ByteOrder::LittleEndian);
    let mut data = [5, 1, 1, 7, 1, 1];
    p.accumulate_rows(&mut data, 3);
    assert_eq!(data, [5, 6, 7, 7, 8, 9]);
}

#[test]
fn test_unsupported_depth() {
    let err = HorizontalPredictor::new(1, 4, ByteOrder::LittleEndian).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedBitDepth { bits_per_sample: 4, .. }));
}

#[test]
fn test_random_rows_at_each_stride() {
    for (seed, stride) in [(1u64, 1u16), (2, 2), (3, 4)] {
        let p = predictor(stride, 8, ByteOrder::LittleEndian);
        let original = lcg_bytes(seed, 4 * 25);
        let mut row = original.clone();

        p.difference(&mut row);
        let stride = stride as usize;
        assert_eq!(row[..stride], original[..stride]);
        for i in stride..row.len() {
            assert_eq!(row[i], original[i].wrapping_sub(original[i - stride]), "stride {} byte {}", stride, i);
        }

        p.accumulate(&mut row);
        assert_eq!(row, original, "stride {}", stride);
    }
}

#[test]
fn test_rgba_16bit_big_endian() {
    let p = predictor(4, 16, ByteOrder::BigEndian);
    let original = lcg_bytes(11, 8 * 4 * 2);
    let mut row = original.clone();
    p.difference(&mut row);

    let sample = |bytes: &[u8], i: usize| u16::from_be_bytes([bytes[2 * i], bytes[2 * i + 1]]);
    for i in 4..original.len() / 2 {
        assert_eq!(sample(&row, i), sample(&original, i).wrapping_sub(sample(&original, i - 4)));
    }

    p.accumulate(&mut row);
    assert_eq!(row, original);
}

#[test]
fn test_lzw_with_predictor_16bit_big_endian() {
    let config = CodecConfig::new(CompressionMethod::Lzw, 24, 16)
        .with_samples_per_pixel(3)
        .with_byte_order(ByteOrder::BigEndian)
        .with_predictor(Predictor::HorizontalDifferencing);
    assert_eq!(config.row_bytes(), 48);

    assert_round_trip(&config, &lcg_bytes(21, 48 * 12));

    let ramp: Vec<u8> = (0..24 * 12u16).flat_map(|i| i.wrapping_mul(257).to_be_bytes()).collect();
    assert_round_trip(&config, &ramp);
}

#[test]
fn test_deflate_with_predictor_16bit_big_endian() {
    let config = CodecConfig::new(CompressionMethod::Deflate, 32, 16)
        .with_samples_per_pixel(4)
        .with_byte_order(ByteOrder::BigEndian)
        .with_predictor(Predictor::HorizontalDifferencing);
    assert_round_trip(&config, &lcg_bytes(22, 64 * 9));
}
