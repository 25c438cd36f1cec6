//! CCITT T.4 run-length code tables
//!
//! The white and black code tables live in `ccitt_codes.toml` and are parsed
//! once on first use. Each entry maps a run length to its prefix-free code.

use std::collections::HashMap;
use lazy_static::lazy_static;
use log::warn;

use crate::tiff::errors::{CodecError, CodecResult};

lazy_static! {
    static ref CCITT_TABLES: CcittTables = {
        let content = include_str!("../../ccitt_codes.toml");
        CcittTables::from_str(content).unwrap_or_else(|e| {
            warn!("Failed to parse CCITT code tables: {}", e);
            CcittTables::default()
        })
    };
}

/// Pixel color of a bilevel run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other color
    pub fn toggle(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// One Huffman code, right-aligned in `bits`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunCode {
    pub bits: u16,
    pub length: u8,
}

/// Encode and decode maps for both colors
#[derive(Debug, Default)]
pub struct CcittTables {
    white_codes: HashMap<u32, RunCode>,
    black_codes: HashMap<u32, RunCode>,
    // (code length, code bits) -> run length
    white_runs: HashMap<(u8, u16), u32>,
    black_runs: HashMap<(u8, u16), u32>,
}

impl CcittTables {
    /// Shared tables parsed from the embedded definitions
    pub fn global() -> &'static CcittTables {
        &CCITT_TABLES
    }

    /// Parse the code tables from a TOML string
    pub fn from_str(content: &str) -> CodecResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(CodecError::GenericError(format!("Failed to parse TOML: {}", e))),
        };

        let white_codes = Self::parse_code_table(&toml_value, "white_codes")?;
        let black_codes = Self::parse_code_table(&toml_value, "black_codes")?;
        let white_runs = Self::invert(&white_codes);
        let black_runs = Self::invert(&black_codes);

        Ok(CcittTables { white_codes, black_codes, white_runs, black_runs })
    }

    /// Helper to parse one color table from TOML
    fn parse_code_table(toml_value: &toml::Value, table_name: &str) -> CodecResult<HashMap<u32, RunCode>> {
        let table = toml_value.get(table_name)
            .and_then(|v| v.as_table())
            .ok_or_else(|| CodecError::GenericError(format!("Missing code table: {}", table_name)))?;

        let mut codes = HashMap::with_capacity(table.len());
        for (k, v) in table {
            let run = k.parse::<u32>()
                .map_err(|_| CodecError::GenericError(format!("Invalid run length in {}: {}", table_name, k)))?;
            let pattern = v.as_str()
                .ok_or_else(|| CodecError::GenericError(format!("Code for run {} is not a string", run)))?;
            let bits = u16::from_str_radix(pattern, 2)
                .map_err(|_| CodecError::GenericError(format!("Invalid code pattern for run {}: {}", run, pattern)))?;
            codes.insert(run, RunCode { bits, length: pattern.len() as u8 });
        }

        Ok(codes)
    }

    fn invert(codes: &HashMap<u32, RunCode>) -> HashMap<(u8, u16), u32> {
        codes.iter().map(|(run, code)| ((code.length, code.bits), *run)).collect()
    }

    /// Code for a terminating (0-63) or makeup (multiple of 64) run
    pub fn code_for(&self, color: Color, run: u32) -> Option<RunCode> {
        match color {
            Color::White => self.white_codes.get(&run).copied(),
            Color::Black => self.black_codes.get(&run).copied(),
        }
    }

    /// Run length for a code of `length` bits, if one exists
    pub fn run_for(&self, color: Color, length: u8, bits: u16) -> Option<u32> {
        match color {
            Color::White => self.white_runs.get(&(length, bits)).copied(),
            Color::Black => self.black_runs.get(&(length, bits)).copied(),
        }
    }

    /// Number of codes defined for a color
    pub fn len(&self, color: Color) -> usize {
        match color {
            Color::White => self.white_codes.len(),
            Color::Black => self.black_codes.len(),
        }
    }
}
