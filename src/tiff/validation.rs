//! Codec configuration validation
//!
//! The factory runs these checks before any codec state is built, so a
//! bad configuration never reaches a half-written sink.

use log::debug;

use crate::tiff::errors::{CodecError, CodecResult, ConfigField};
use crate::tiff::types::{CodecConfig, CompressionLevel, CompressionMethod, Predictor};

/// Bit depths the horizontal predictor can difference
const PREDICTOR_BIT_DEPTHS: [u16; 4] = [8, 16, 32, 64];

/// Validates the (method, predictor, level, bit depth) combination
///
/// # Returns
/// Ok if the configuration can build a codec, the offending field otherwise
pub fn validate_config(config: &CodecConfig) -> CodecResult<()> {
    debug!("Validating codec configuration: {}", config);

    if config.row_width_in_samples == 0 {
        return Err(CodecError::config(ConfigField::RowWidth, "rows must contain at least one sample"));
    }

    if config.bits_per_sample == 0 || config.bits_per_sample > 64 {
        return Err(CodecError::config(
            ConfigField::BitsPerSample,
            format!("{} is outside 1..=64", config.bits_per_sample),
        ));
    }

    if config.samples_per_pixel == 0 || config.row_width_in_samples % config.samples_per_pixel as u32 != 0 {
        return Err(CodecError::config(
            ConfigField::SamplesPerPixel,
            format!(
                "{} samples per row is not a whole number of {}-sample pixels",
                config.row_width_in_samples, config.samples_per_pixel,
            ),
        ));
    }

    if config.predictor != Predictor::None {
        if !config.method.supports_predictor() {
            return Err(CodecError::config(
                ConfigField::Predictor,
                format!("predictor is only supported with LZW or Deflate, not {}", config.method),
            ));
        }
        if !PREDICTOR_BIT_DEPTHS.contains(&config.bits_per_sample) {
            return Err(CodecError::config(
                ConfigField::BitsPerSample,
                format!("horizontal predictor needs 8, 16, 32 or 64 bit samples, got {}", config.bits_per_sample),
            ));
        }
    }

    match config.compression_level {
        CompressionLevel::Default => {}
        _ if config.method != CompressionMethod::Deflate => {
            return Err(CodecError::config(
                ConfigField::CompressionLevel,
                format!("compression level is only supported with Deflate, not {}", config.method),
            ));
        }
        CompressionLevel::Level(level) if level > 9 => {
            return Err(CodecError::config(
                ConfigField::CompressionLevel,
                format!("level {} is outside 0..=9", level),
            ));
        }
        _ => {}
    }

    if config.fax.eol_byte_aligned && config.method != CompressionMethod::CcittGroup3Fax {
        return Err(CodecError::config(
            ConfigField::FaxOptions,
            format!("EOL alignment only applies to CCITT Group 3, not {}", config.method),
        ));
    }

    if config.method.is_bilevel() {
        if config.bits_per_sample != 1 {
            return Err(CodecError::UnsupportedBitDepth {
                method: config.method.name(),
                bits_per_sample: config.bits_per_sample,
            });
        }
        if config.samples_per_pixel != 1 {
            return Err(CodecError::config(
                ConfigField::SamplesPerPixel,
                format!("{} encodes single-component images only", config.method),
            ));
        }
    }

    Ok(())
}

/// Validates that a pushed row has the configured length
pub fn validate_row_length(expected: usize, actual: usize) -> CodecResult<()> {
    if expected != actual {
        return Err(CodecError::RowLengthMismatch { expected, actual });
    }
    Ok(())
}
