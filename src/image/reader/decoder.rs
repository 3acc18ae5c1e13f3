use std::io::{BufRead, Seek};

use image::{DynamicImage, ImageDecoder};

use super::super::Image;
use super::super::ImageReader;
use crate::Error;

/// Decodes PNG, JPEG, GIF or PNM content, detected from the bytes themselves.
///
/// An EXIF orientation stored with the image is applied, so the result is
/// upright and has the dimensions a viewer would show.
pub struct DecodingImageReader<T: BufRead + Seek> {
    reader: T,
}

impl<T: BufRead + Seek> DecodingImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: BufRead + Seek> ImageReader for DecodingImageReader<T> {
    fn read_image(&mut self) -> crate::Result<Image> {
        let mut decoder = image::ImageReader::new(&mut self.reader)
            .with_guessed_format()
            .map_err(|e| Error::FailedToDecodeImage(e.to_string()))?
            .into_decoder()
            .map_err(|e| Error::FailedToDecodeImage(e.to_string()))?;
        let orientation = decoder
            .orientation()
            .map_err(|e| Error::FailedToDecodeImage(e.to_string()))?;
        let mut decoded = DynamicImage::from_decoder(decoder)
            .map_err(|e| Error::FailedToDecodeImage(e.to_string()))?;
        decoded.apply_orientation(orientation);
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("Decoded {}x{} image", width, height);
        Image::from_rgba(width, height, rgba.into_raw())
    }
}
