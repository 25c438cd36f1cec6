//! Horizontal differencing predictor
//!
//! Each sample is replaced by its difference from the same component of the
//! previous pixel, modulo 2^bits. The first pixel of a row is left as is.
//! Rows are transformed in place.

use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::{CodecError, CodecResult};
use crate::tiff::types::CodecConfig;

/// Row transform for 8, 16, 32 and 64-bit samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizontalPredictor {
    /// Distance in samples to the same component of the previous pixel
    stride: usize,
    bits_per_sample: u16,
    byte_order: ByteOrder,
}

impl HorizontalPredictor {
    /// Create a predictor for `samples_per_pixel` interleaved components
    pub fn new(samples_per_pixel: u16, bits_per_sample: u16, byte_order: ByteOrder) -> CodecResult<Self> {
        match bits_per_sample {
            8 | 16 | 32 | 64 => Ok(HorizontalPredictor {
                stride: samples_per_pixel.max(1) as usize,
                bits_per_sample,
                byte_order,
            }),
            _ => Err(CodecError::UnsupportedBitDepth {
                method: "Horizontal predictor",
                bits_per_sample,
            }),
        }
    }

    /// Predictor for a validated configuration
    pub fn from_config(config: &CodecConfig) -> CodecResult<Self> {
        Self::new(config.samples_per_pixel, config.bits_per_sample, config.byte_order)
    }

    /// Replace samples with differences (encode direction)
    pub fn difference(&self, row: &mut [u8]) {
        let handler = self.byte_order.handler();
        let stride = self.stride;

        // Walk backwards so every sample is differenced against an untouched neighbour
        match self.bits_per_sample {
            8 => {
                for i in (stride..row.len()).rev() {
                    row[i] = row[i].wrapping_sub(row[i - stride]);
                }
            }
            16 => {
                let count = row.len() / 2;
                for s in (stride..count).rev() {
                    let prev = handler.read_u16(&row[(s - stride) * 2..]);
                    let cur = handler.read_u16(&row[s * 2..]);
                    handler.write_u16(&mut row[s * 2..], cur.wrapping_sub(prev));
                }
            }
            32 => {
                let count = row.len() / 4;
                for s in (stride..count).rev() {
                    let prev = handler.read_u32(&row[(s - stride) * 4..]);
                    let cur = handler.read_u32(&row[s * 4..]);
                    handler.write_u32(&mut row[s * 4..], cur.wrapping_sub(prev));
                }
            }
            _ => {
                let count = row.len() / 8;
                for s in (stride..count).rev() {
                    let prev = handler.read_u64(&row[(s - stride) * 8..]);
                    let cur = handler.read_u64(&row[s * 8..]);
                    handler.write_u64(&mut row[s * 8..], cur.wrapping_sub(prev));
                }
            }
        }
    }

    /// Restore samples from differences (decode direction)
    pub fn accumulate(&self, row: &mut [u8]) {
        let handler = self.byte_order.handler();
        let stride = self.stride;

        match self.bits_per_sample {
            8 => {
                for i in stride..row.len() {
                    row[i] = row[i].wrapping_add(row[i - stride]);
                }
            }
            16 => {
                let count = row.len() / 2;
                for s in stride..count {
                    let prev = handler.read_u16(&row[(s - stride) * 2..]);
                    let cur = handler.read_u16(&row[s * 2..]);
                    handler.write_u16(&mut row[s * 2..], cur.wrapping_add(prev));
                }
            }
            32 => {
                let count = row.len() / 4;
                for s in stride..count {
                    let prev = handler.read_u32(&row[(s - stride) * 4..]);
                    let cur = handler.read_u32(&row[s * 4..]);
                    handler.write_u32(&mut row[s * 4..], cur.wrapping_add(prev));
                }
            }
            _ => {
                let count = row.len() / 8;
                for s in stride..count {
                    let prev = handler.read_u64(&row[(s - stride) * 8..]);
                    let cur = handler.read_u64(&row[s * 8..]);
                    handler.write_u64(&mut row[s * 8..], cur.wrapping_add(prev));
                }
            }
        }
    }

    /// Restore every row of a decoded strip
    pub fn accumulate_rows(&self, data: &mut [u8], row_bytes: usize) {
        if row_bytes == 0 {
            return;
        }
        for row in data.chunks_mut(row_bytes) {
            self.accumulate(row);
        }
    }
}
