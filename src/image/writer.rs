mod png;

pub use png::PngImageWriter;
