//! Strip index side files
//!
//! The compress command writes its strips back to back. Their byte counts,
//! and the strip height when the image was split, go next to the output in
//! `<output>.strips` so the decompress command can cut the strips apart:
//!
//! ```toml
//! rows_per_strip = 16
//! strip_byte_counts = [812, 790, 344]
//! ```

use std::fs;
use std::path::Path;
use log::debug;

use crate::tiff::errors::{CodecError, CodecResult};

/// Strip layout of a compressed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripIndex {
    /// Rows per strip; `None` when the image went out as one strip
    pub rows_per_strip: Option<u32>,
    pub byte_counts: Vec<usize>,
}

impl StripIndex {
    pub fn new(rows_per_strip: Option<u32>, byte_counts: Vec<usize>) -> Self {
        StripIndex { rows_per_strip, byte_counts }
    }

    /// Side file path for a compressed file
    pub fn path_for(data_path: &str) -> String {
        format!("{}.strips", data_path)
    }

    /// Parse an index from a TOML string
    pub fn from_str(content: &str) -> CodecResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| CodecError::GenericError(format!("Failed to parse strip index: {}", e)))?;

        let rows_per_strip = match toml_value.get("rows_per_strip") {
            None => None,
            Some(value) => Some(value.as_integer()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| CodecError::GenericError(format!("Invalid rows_per_strip: {}", value)))?),
        };

        let counts = toml_value.get("strip_byte_counts")
            .and_then(|value| value.as_array())
            .ok_or_else(|| CodecError::GenericError("Strip index has no strip_byte_counts".to_string()))?;
        let byte_counts = counts.iter()
            .map(|value| value.as_integer()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| CodecError::GenericError(format!("Invalid strip byte count: {}", value))))
            .collect::<CodecResult<Vec<usize>>>()?;

        Ok(StripIndex { rows_per_strip, byte_counts })
    }

    /// Load the index stored next to `data_path`, if there is one
    pub fn load_for(data_path: &str) -> CodecResult<Option<Self>> {
        let path = Self::path_for(data_path);
        if !Path::new(&path).exists() {
            return Ok(None);
        }
        debug!("Reading strip index {}", path);
        Self::from_str(&fs::read_to_string(&path)?).map(Some)
    }

    /// Render the index as TOML
    pub fn to_toml(&self) -> String {
        let mut table = toml::value::Table::new();
        if let Some(rows) = self.rows_per_strip {
            table.insert("rows_per_strip".to_string(), toml::Value::Integer(rows as i64));
        }
        let counts = self.byte_counts.iter().map(|&n| toml::Value::Integer(n as i64)).collect();
        table.insert("strip_byte_counts".to_string(), toml::Value::Array(counts));
        toml::Value::Table(table).to_string()
    }

    /// Write the index next to `data_path`
    pub fn store_for(&self, data_path: &str) -> CodecResult<()> {
        let path = Self::path_for(data_path);
        debug!("Writing strip index {}", path);
        fs::write(path, self.to_toml())?;
        Ok(())
    }

    /// Cut concatenated strip data back into strips
    pub fn split(&self, data: &[u8]) -> CodecResult<Vec<Vec<u8>>> {
        let total: usize = self.byte_counts.iter().sum();
        if total != data.len() {
            return Err(CodecError::MalformedData(format!(
                "strip byte counts add up to {} but the data holds {} bytes", total, data.len())));
        }

        let mut strips = Vec::with_capacity(self.byte_counts.len());
        let mut offset = 0;
        for &count in &self.byte_counts {
            strips.push(data[offset..offset + count].to_vec());
            offset += count;
        }
        Ok(strips)
    }
}
