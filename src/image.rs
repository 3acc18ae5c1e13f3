use crate::color::RGBColorFormat;
use crate::error::Error;

pub mod reader;
pub mod render_target;
pub mod transformer;
pub mod writer;

/// One pixel as red, green, blue, alpha.
pub type Dot = [u8; 4];

const CHANNELS_PER_DOT: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    dots: Vec<Dot>,
}

impl Image {
    pub fn new(width: u32, height: u32, dots: Vec<Dot>) -> crate::Result<Self> {
        Self::check_dots_length_match_dimensions(dots.len(), width, height)?;
        Ok(Self {
            width,
            height,
            dots,
        })
    }

    /// Builds an image from interleaved RGBA bytes.
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> crate::Result<Self> {
        if bytes.len() % CHANNELS_PER_DOT != 0 {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        let dots = bytes
            .chunks_exact(CHANNELS_PER_DOT)
            .map(|chunk| [chunk[0], chunk[1], chunk[2], chunk[3]])
            .collect();
        Self::new(width, height, dots)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn dot(&self, column_index: u32, row_index: u32) -> Dot {
        let index = column_index as usize + row_index as usize * self.width as usize;
        self.dots[index]
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.dots.as_flattened()
    }

    fn check_dots_length_match_dimensions(
        length: usize,
        width: u32,
        height: u32,
    ) -> crate::Result<()> {
        let expected_number_of_dots = (width as usize).checked_mul(height as usize);
        if expected_number_of_dots != Some(length) {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(())
    }
}

pub fn color_of(dot: &Dot) -> RGBColorFormat<u8> {
    RGBColorFormat::new(dot[0], dot[1], dot[2])
}

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<Image>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}
