use crate::compression::{run_codes, BufferPool, CompressorFactory, RowCompressor, T4Decoder, T4Framing};
use crate::io::bit_reader::MsbBitReader;
use crate::tiff::errors::{CodecError, ErrorKind};
use crate::tiff::types::{CodecConfig, CompressionMethod, FaxOptions};
use super::test_utils::{assert_round_trip, compress, decompress, lcg_bytes};

fn mh(width: u32) -> CodecConfig {
    CodecConfig::new(CompressionMethod::ModifiedHuffman, width, 1)
}

fn g3(width: u32, eol_byte_aligned: bool) -> CodecConfig {
    CodecConfig::new(CompressionMethod::CcittGroup3Fax, width, 1)
        .with_fax_options(FaxOptions { eol_byte_aligned })
}

/// Random bilevel rows with the pad bits of each row cleared
fn bilevel_image(seed: u64, width: usize, rows: usize) -> Vec<u8> {
    let row_bytes = (width + 7) / 8;
    let mut image = lcg_bytes(seed, row_bytes * rows);
    let tail = width % 8;
    if tail != 0 {
        let mask = 0xFFu8 << (8 - tail);
        for row in image.chunks_mut(row_bytes) {
            row[row_bytes - 1] &= mask;
        }
    }
    image
}

#[test]
fn test_run_splitting() {
    assert_eq!(run_codes(0), vec![0]);
    assert_eq!(run_codes(63), vec![63]);
    assert_eq!(run_codes(64), vec![64, 0]);
    assert_eq!(run_codes(100), vec![64, 36]);
    assert_eq!(run_codes(2623), vec![2560, 63]);
    assert_eq!(run_codes(3000), vec![2560, 384, 56]);
    assert_eq!(run_codes(5200), vec![2560, 2560, 64, 16]);
}

#[test]
fn test_white_row_uses_makeup_code() {
    // makeup 64 (11011) + terminating 36 (00010101), padded
    assert_eq!(compress(&mh(100), &[0u8; 13]), vec![0xD8, 0xA8]);
    assert_eq!(compress(&mh(8), &[0x00]), vec![0x98]);
}

#[test]
fn test_row_starting_black() {
    // white 0, black 1, white 2, black 1
    let strip = compress(&mh(4), &[0x90]);
    assert_eq!(strip, vec![0x35, 0x4E, 0x80]);
    assert_eq!(decompress(&mh(4), &strip, 1), vec![0x90]);

    let mut reader = MsbBitReader::new(&strip);
    let decoder = T4Decoder::new(4, T4Framing::ModifiedHuffman);
    let mut row = [0u8; 1];
    let runs = decoder.decode_row(&mut reader, &mut row).unwrap();
    assert_eq!(runs, vec![0, 1, 2, 1]);
    assert_eq!(row, [0x90]);
}

#[test]
fn test_modified_huffman_rows_are_byte_aligned() {
    let strip = compress(&mh(8), &[0x00, 0xFF]);
    // white 8 (10011) padded, then white 0 + black 8 (00110101 000101) padded
    assert_eq!(strip, vec![0x98, 0x35, 0x14]);
    assert_eq!(decompress(&mh(8), &strip, 2), vec![0x00, 0xFF]);
}

#[test]
fn test_group3_eol_framing() {
    // EOL, white 8, EOL
    assert_eq!(compress(&g3(8, false), &[0x00]), vec![0x00, 0x19, 0x80, 0x08]);
}

#[test]
fn test_group3_byte_aligned_eol() {
    let strip = compress(&g3(8, true), &[0x00]);
    assert_eq!(strip, vec![0x00, 0x01, 0x98, 0x00, 0x01]);
    assert_eq!(decompress(&g3(8, true), &strip, 1), vec![0x00]);
}

#[test]
fn test_round_trips() {
    for (width, rows) in [(8usize, 4usize), (13, 9), (100, 20), (1728, 6)] {
        let image = bilevel_image(width as u64, width, rows);
        assert_round_trip(&mh(width as u32), &image);
        assert_round_trip(&g3(width as u32, false), &image);
        assert_round_trip(&g3(width as u32, true), &image);
    }
}

#[test]
fn test_long_runs_round_trip() {
    let width = 5200;
    let row_bytes = width / 8;
    let mut image = vec![0u8; row_bytes * 3];
    // row 1 all black, row 2 half and half
    image[row_bytes..row_bytes * 2].fill(0xFF);
    image[row_bytes * 2 + row_bytes / 2..].fill(0xFF);
    assert_round_trip(&mh(width as u32), &image);
    assert_round_trip(&g3(width as u32, false), &image);
}

#[test]
fn test_multibit_samples_rejected() {
    let pool = BufferPool::new();
    let config = CodecConfig::new(CompressionMethod::ModifiedHuffman, 16, 8);
    let err = CompressorFactory::create(&config, Vec::new(), &pool).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Encode);
    assert!(matches!(err, CodecError::UnsupportedBitDepth { bits_per_sample: 8, .. }));
    assert_eq!(pool.outstanding(), 0);
}

#[test]
fn test_wrong_row_length() {
    let pool = BufferPool::new();
    let mut compressor = CompressorFactory::create(&mh(16), Vec::new(), &pool).unwrap();
    let err = compressor.compress_row(&[0u8; 3]).unwrap_err();
    assert!(matches!(err, CodecError::RowLengthMismatch { expected: 2, actual: 3 }));
}

#[test]
fn test_decoder_errors() {
    let decoder = CompressorFactory::create_decoder(&mh(8)).unwrap();
    let err = decoder.decompress(&[0x00, 0x00], 1).unwrap_err();
    assert!(matches!(err, CodecError::InvalidCode { .. }));

    // white 8 does not fit a 4 pixel row
    let decoder = CompressorFactory::create_decoder(&mh(4)).unwrap();
    let err = decoder.decompress(&[0x98], 1).unwrap_err();
    assert!(matches!(err, CodecError::MalformedData(_)));

    // Group 3 strips must open with an EOL
    let decoder = CompressorFactory::create_decoder(&g3(8, false)).unwrap();
    let err = decoder.decompress(&[0x98], 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);

    let decoder = CompressorFactory::create_decoder(&mh(100)).unwrap();
    let err = decoder.decompress(&[0xD8], 1).unwrap_err();
    assert!(matches!(err, CodecError::TruncatedData { .. }));
}
