//! TIFF compression constants
//!
//! Tag values and stream constants shared by the codecs, so the
//! codec code never carries bare magic numbers.

/// Values of the Compression tag (259)
pub mod compression {
    pub const NONE: u16 = 1;
    pub const CCITT_MODIFIED_HUFFMAN: u16 = 2; // CCITT 1-D Modified Huffman RLE
    pub const CCITT_GROUP3_FAX: u16 = 3;       // CCITT T.4 bilevel encoding
    pub const LZW: u16 = 5;
    pub const ADOBE_DEFLATE: u16 = 8;
    pub const DEFLATE: u16 = 32946;            // Obsolete PKZIP-style code, read as Adobe Deflate
    pub const PACKBITS: u16 = 32773;
}

/// Values of the Predictor tag (317)
pub mod predictor {
    pub const NONE: u16 = 1;
    pub const HORIZONTAL: u16 = 2;
}

/// TIFF LZW stream constants
pub mod lzw {
    /// Resets the code table
    pub const CLEAR_CODE: u16 = 256;
    /// Marks the end of the strip
    pub const EOI_CODE: u16 = 257;
    /// First code assigned to a multi-byte string
    pub const FIRST_CODE: u16 = 258;
    /// Initial code width in bits
    pub const MIN_BITS: u8 = 9;
    /// Maximum code width in bits
    pub const MAX_BITS: u8 = 12;
    /// Total number of codes addressable with MAX_BITS
    pub const TABLE_SIZE: usize = 1 << MAX_BITS;
    /// Next-free value at which the encoder emits Clear and resets
    pub const TABLE_FULL: u16 = (1 << MAX_BITS) - 2;
}

/// CCITT T.4 one-dimensional coding constants
pub mod fax {
    /// End-of-line code value (eleven zeros then a one)
    pub const EOL_CODE: u32 = 0x001;
    /// End-of-line code length in bits
    pub const EOL_BITS: u8 = 12;
    /// Largest run a terminating code can express
    pub const MAX_TERMINATING_RUN: u32 = 63;
    /// Largest single makeup code
    pub const MAX_MAKEUP_RUN: u32 = 2560;
    /// Longest code in either color table
    pub const MAX_CODE_BITS: u8 = 13;
}

/// PackBits packet limits
pub mod packbits {
    /// Longest literal or repeat packet
    pub const MAX_PACKET: usize = 128;
    /// Shortest run worth a repeat packet
    pub const MIN_REPEAT: usize = 3;
    /// Header byte that decoders skip
    pub const NOOP_HEADER: i8 = -128;
}
