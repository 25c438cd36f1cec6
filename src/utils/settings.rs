//! Codec settings files
//!
//! A settings file is a flat TOML table naming the codec and row geometry,
//! so a batch of images can share one configuration:
//!
//! ```toml
//! method = "lzw"
//! width = 640
//! bits_per_sample = 8
//! samples_per_pixel = 3
//! predictor = "horizontal"
//! rows_per_strip = 16
//! ```

use std::fs;
use log::debug;

use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::{CodecError, CodecResult, ConfigField};
use crate::tiff::types::{CodecConfig, CompressionLevel, CompressionMethod, FaxOptions, Predictor};
use crate::tiff::validation::validate_config;

/// Partially specified codec settings; unset fields fall back to defaults
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodecSettings {
    pub method: Option<CompressionMethod>,
    /// Pixels per row
    pub width: Option<u32>,
    pub bits_per_sample: Option<u16>,
    pub samples_per_pixel: Option<u16>,
    pub predictor: Option<Predictor>,
    pub level: Option<CompressionLevel>,
    pub byte_order: Option<ByteOrder>,
    pub rows_per_strip: Option<u32>,
    pub eol_byte_aligned: Option<bool>,
}

impl CodecSettings {
    /// Parse settings from a TOML string
    pub fn from_str(content: &str) -> CodecResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(CodecError::GenericError(format!("Failed to parse TOML: {}", e))),
        };

        let mut settings = CodecSettings::default();

        if let Some(name) = Self::get_str(&toml_value, "method")? {
            settings.method = Some(CompressionMethod::from_name(name)?);
        }
        if let Some(name) = Self::get_str(&toml_value, "predictor")? {
            settings.predictor = Some(Predictor::from_name(name)?);
        }
        if let Some(name) = Self::get_str(&toml_value, "byte_order")? {
            settings.byte_order = Some(ByteOrder::from_name(name)?);
        }

        settings.level = match toml_value.get("level") {
            None => None,
            Some(toml::Value::String(name)) => Some(CompressionLevel::from_name(name)?),
            Some(toml::Value::Integer(n)) => Some(CompressionLevel::Level(Self::narrow(*n, "level")?)),
            Some(other) => return Err(CodecError::GenericError(format!("Invalid level: {}", other))),
        };

        settings.width = Self::get_int(&toml_value, "width")?;
        settings.bits_per_sample = Self::get_int(&toml_value, "bits_per_sample")?;
        settings.samples_per_pixel = Self::get_int(&toml_value, "samples_per_pixel")?;
        settings.rows_per_strip = Self::get_int(&toml_value, "rows_per_strip")?;

        settings.eol_byte_aligned = match toml_value.get("eol_byte_aligned") {
            None => None,
            Some(value) => Some(value.as_bool().ok_or_else(|| {
                CodecError::GenericError("eol_byte_aligned must be true or false".to_string())
            })?),
        };

        debug!("Parsed codec settings: {:?}", settings);
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &str) -> CodecResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    fn get_str<'v>(toml_value: &'v toml::Value, key: &str) -> CodecResult<Option<&'v str>> {
        match toml_value.get(key) {
            None => Ok(None),
            Some(value) => value.as_str()
                .map(Some)
                .ok_or_else(|| CodecError::GenericError(format!("{} must be a string", key))),
        }
    }

    fn get_int<T: TryFrom<i64>>(toml_value: &toml::Value, key: &str) -> CodecResult<Option<T>> {
        match toml_value.get(key) {
            None => Ok(None),
            Some(value) => {
                let n = value.as_integer()
                    .ok_or_else(|| CodecError::GenericError(format!("{} must be an integer", key)))?;
                Self::narrow(n, key).map(Some)
            }
        }
    }

    fn narrow<T: TryFrom<i64>>(n: i64, key: &str) -> CodecResult<T> {
        T::try_from(n).map_err(|_| CodecError::GenericError(format!("{} is out of range: {}", key, n)))
    }

    /// Fill unset fields from `other`
    pub fn or(self, other: CodecSettings) -> CodecSettings {
        CodecSettings {
            method: self.method.or(other.method),
            width: self.width.or(other.width),
            bits_per_sample: self.bits_per_sample.or(other.bits_per_sample),
            samples_per_pixel: self.samples_per_pixel.or(other.samples_per_pixel),
            predictor: self.predictor.or(other.predictor),
            level: self.level.or(other.level),
            byte_order: self.byte_order.or(other.byte_order),
            rows_per_strip: self.rows_per_strip.or(other.rows_per_strip),
            eol_byte_aligned: self.eol_byte_aligned.or(other.eol_byte_aligned),
        }
    }

    /// Build and validate the codec configuration; method and width are required
    pub fn to_config(&self) -> CodecResult<CodecConfig> {
        let method = self.method
            .ok_or_else(|| CodecError::config(ConfigField::Method, "no compression method given"))?;
        let width = self.width
            .ok_or_else(|| CodecError::config(ConfigField::RowWidth, "no row width given"))?;
        let default_bits = if method.is_bilevel() { 1 } else { 8 };
        let samples_per_pixel = self.samples_per_pixel.unwrap_or(1);
        let samples = width.checked_mul(samples_per_pixel as u32)
            .ok_or_else(|| CodecError::config(ConfigField::RowWidth, format!("{} pixels is too wide", width)))?;

        let config = CodecConfig::new(method, samples, self.bits_per_sample.unwrap_or(default_bits))
            .with_samples_per_pixel(samples_per_pixel)
            .with_predictor(self.predictor.unwrap_or_default())
            .with_compression_level(self.level.unwrap_or_default())
            .with_byte_order(self.byte_order.unwrap_or_default())
            .with_fax_options(FaxOptions { eol_byte_aligned: self.eol_byte_aligned.unwrap_or(false) });

        validate_config(&config)?;
        Ok(config)
    }
}
