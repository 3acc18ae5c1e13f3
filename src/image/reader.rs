mod decoder;

pub use decoder::DecodingImageReader;
