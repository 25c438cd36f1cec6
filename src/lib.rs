pub mod io;
pub mod tiff;
pub mod utils;
pub mod compression;
pub mod commands;

pub use compression::{
    BufferPool, CancellationToken, CompressionConverter, Compressor, CompressorFactory,
    RowCompressor, StripDecompressor, StripEncoder,
};
pub use io::byte_order::ByteOrder;
pub use tiff::{CodecConfig, CodecError, CodecResult, CompressionLevel, CompressionMethod, ErrorKind, FaxOptions, Predictor};
pub use utils::settings::CodecSettings;
