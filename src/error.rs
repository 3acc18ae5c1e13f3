use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InvalidColor(String),
    InvalidImage { width: u32, height: u32 },
    RenderingUnavailable { width: u32, height: u32 },
    MismatchOfSizeBetweenHeaderAndValues,
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToWriteOutputFile(String, std::io::Error),
    InputFileTooLarge(String, u64, u64),
    FailedToDecodeImage(String),
    FailedToEncodeImage(String),
    ConversionJobLost(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColor(color) => {
                write!(f, "'{}' is not a valid color", color)
            }
            Self::InvalidImage { width, height } => {
                write!(
                    f,
                    "Image dimensions {}x{} are invalid. Width and height must be at least 1.",
                    width, height
                )
            }
            Self::RenderingUnavailable { width, height } => {
                write!(
                    f,
                    "Unable to acquire a render target for an image of {}x{} pixels",
                    width, height
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of pixels does not match the size of the image"
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToWriteOutputFile(path, error) => {
                write!(f, "Failed to write output file '{}': {}", path, error)
            }
            Self::InputFileTooLarge(path, size, limit) => {
                write!(
                    f,
                    "Input file '{}' has {} bytes, but at most {} bytes are accepted",
                    path, size, limit
                )
            }
            Self::FailedToDecodeImage(reason) => {
                write!(f, "Failed to decode image: {}", reason)
            }
            Self::FailedToEncodeImage(reason) => {
                write!(f, "Failed to encode image as PNG: {}", reason)
            }
            Self::ConversionJobLost(path) => {
                write!(f, "Conversion of '{}' stopped without a result", path)
            }
        }
    }
}

impl std::error::Error for Error {}
