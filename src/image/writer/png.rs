use std::io::Write;

use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder};

use crate::{
    error::Error,
    image::{Image, ImageWriter},
};

pub struct PngImageWriter<'a, T: Write> {
    writer: T,
    image: &'a Image,
}

impl<'a, T: Write> PngImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a Image) -> Self {
        Self { writer, image }
    }
}

impl<T: Write> ImageWriter for PngImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        let encoder = PngEncoder::new(&mut self.writer);
        encoder
            .write_image(
                self.image.as_bytes(),
                self.image.width(),
                self.image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| Error::FailedToEncodeImage(e.to_string()))?;
        self.writer
            .flush()
            .map_err(|e| Error::FailedToEncodeImage(e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::PngImageWriter;
    use crate::{
        error::Error,
        image::{Image, ImageWriter},
    };

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn write_png_signature_and_header() {
        let image = Image::new(3, 2, vec![[1, 2, 3, 4]; 6]).unwrap();
        let mut output = Vec::new();
        PngImageWriter::new(&mut output, &image).write_image().unwrap();
        assert_eq!(output[0..8], PNG_SIGNATURE);
        assert_eq!(&output[12..16], b"IHDR");
        assert_eq!(output[16..20], 3_u32.to_be_bytes());
        assert_eq!(output[20..24], 2_u32.to_be_bytes());
    }

    #[test]
    fn empty_image_cannot_be_encoded() {
        let image = Image::new(0, 0, Vec::new()).unwrap();
        let mut output = Vec::new();
        let result = PngImageWriter::new(&mut output, &image).write_image();
        assert!(matches!(result, Err(Error::FailedToEncodeImage(_))));
    }
}
