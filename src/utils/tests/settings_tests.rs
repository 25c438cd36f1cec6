use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::{CodecError, ConfigField};
use crate::tiff::types::{CompressionLevel, CompressionMethod, Predictor};
use crate::utils::settings::CodecSettings;

#[test]
fn test_parse_full_settings() {
    let settings = CodecSettings::from_str(r#"
        method = "deflate"
        width = 640
        bits_per_sample = 16
        samples_per_pixel = 3
        predictor = "horizontal"
        level = 9
        byte_order = "big"
        rows_per_strip = 16
    "#).unwrap();

    assert_eq!(settings.method, Some(CompressionMethod::Deflate));
    assert_eq!(settings.level, Some(CompressionLevel::Level(9)));
    assert_eq!(settings.rows_per_strip, Some(16));

    let config = settings.to_config().unwrap();
    assert_eq!(config.row_width_in_samples, 1920);
    assert_eq!(config.bits_per_sample, 16);
    assert_eq!(config.samples_per_pixel, 3);
    assert_eq!(config.predictor, Predictor::HorizontalDifferencing);
    assert_eq!(config.byte_order, ByteOrder::BigEndian);
    assert_eq!(config.row_bytes(), 3840);
}

#[test]
fn test_bit_depth_defaults() {
    let fax = CodecSettings::from_str("method = \"g3\"\nwidth = 1728\neol_byte_aligned = true").unwrap();
    let config = fax.to_config().unwrap();
    assert_eq!(config.bits_per_sample, 1);
    assert!(config.fax.eol_byte_aligned);

    let lzw = CodecSettings::from_str("method = \"lzw\"\nwidth = 10\nlevel = \"default\"").unwrap();
    assert_eq!(lzw.to_config().unwrap().bits_per_sample, 8);
}

#[test]
fn test_required_fields() {
    let err = CodecSettings::from_str("width = 10").unwrap().to_config().unwrap_err();
    assert!(matches!(err, CodecError::InvalidConfig { field: ConfigField::Method, .. }));

    let err = CodecSettings::from_str("method = \"none\"").unwrap().to_config().unwrap_err();
    assert!(matches!(err, CodecError::InvalidConfig { field: ConfigField::RowWidth, .. }));
}

#[test]
fn test_invalid_values() {
    assert!(CodecSettings::from_str("method = \"jpeg\"").is_err());
    assert!(CodecSettings::from_str("width = \"wide\"").is_err());
    assert!(CodecSettings::from_str("width = -4").is_err());
    assert!(CodecSettings::from_str("level = 1.5").is_err());
    assert!(CodecSettings::from_str("method = ").is_err());
}

#[test]
fn test_or_prefers_self() {
    let cli = CodecSettings {
        method: Some(CompressionMethod::PackBits),
        ..CodecSettings::default()
    };
    let file = CodecSettings::from_str("method = \"lzw\"\nwidth = 32").unwrap();

    let merged = cli.or(file);
    assert_eq!(merged.method, Some(CompressionMethod::PackBits));
    assert_eq!(merged.width, Some(32));
}

#[test]
fn test_zero_geometry_rejected() {
    let err = CodecSettings::from_str("method = \"packbits\"\nwidth = 0").unwrap().to_config().unwrap_err();
    assert!(matches!(err, CodecError::InvalidConfig { field: ConfigField::RowWidth, .. }));

    let err = CodecSettings::from_str("method = \"packbits\"\nwidth = 4\nbits_per_sample = 0")
        .unwrap()
        .to_config()
        .unwrap_err();
    assert!(matches!(err, CodecError::InvalidConfig { field: ConfigField::BitsPerSample, .. }));
}

#[test]
fn test_combination_rules_checked() {
    let err = CodecSettings::from_str("method = \"packbits\"\nwidth = 8\npredictor = \"horizontal\"")
        .unwrap()
        .to_config()
        .unwrap_err();
    assert!(matches!(err, CodecError::InvalidConfig { field: ConfigField::Predictor, .. }));

    let err = CodecSettings::from_str("method = \"mh\"\nwidth = 8\nbits_per_sample = 8")
        .unwrap()
        .to_config()
        .unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedBitDepth { bits_per_sample: 8, .. }));
}
