use super::{color_of, render_target::RenderTarget, Dot, Image};
use crate::{
    color::{parse_color, RGBColorFormat},
    error::Error,
    Arguments, Result,
};

/// Fixed steepness of the midtone contrast curve.
pub const CONTRAST_BOOST: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DuotoneOptions {
    pub shadow: RGBColorFormat<u8>,
    pub highlight: RGBColorFormat<u8>,
}

impl DuotoneOptions {
    pub fn new(shadow: RGBColorFormat<u8>, highlight: RGBColorFormat<u8>) -> Self {
        Self { shadow, highlight }
    }

    pub fn parse(shadow: &str, highlight: &str) -> Result<Self> {
        Ok(Self {
            shadow: parse_color(shadow)?,
            highlight: parse_color(highlight)?,
        })
    }
}

impl TryFrom<&Arguments> for DuotoneOptions {
    type Error = Error;

    fn try_from(value: &Arguments) -> Result<Self> {
        Self::parse(&value.shadow, &value.highlight)
    }
}

pub struct DuotoneTransformer<'a> {
    options: &'a DuotoneOptions,
}

impl<'a> DuotoneTransformer<'a> {
    pub fn new(options: &'a DuotoneOptions) -> Self {
        DuotoneTransformer { options }
    }

    /// Maps every dot of `image` into `target` and returns the result.
    ///
    /// Fails before touching `target` if the image has no pixels.
    pub fn transform(&self, image: &Image, target: &mut RenderTarget) -> Result<Image> {
        Self::check_dimensions(image)?;
        let output_dots = target.acquire(image.width(), image.height())?;
        for (output_dot, dot) in output_dots.iter_mut().zip(image.dots()) {
            *output_dot = self.map_dot(dot);
        }
        Ok(target.finish())
    }

    pub fn map_dot(&self, dot: &Dot) -> Dot {
        let weight = tone_weight(&color_of(dot));
        let mapped = self.options.shadow.blend(&self.options.highlight, weight);
        [mapped.red(), mapped.green(), mapped.blue(), dot[3]]
    }

    fn check_dimensions(image: &Image) -> Result<()> {
        if image.width() == 0 || image.height() == 0 {
            return Err(Error::InvalidImage {
                width: image.width(),
                height: image.height(),
            });
        }
        Ok(())
    }
}

/// Luminance of `color` after the contrast curve, in [0, 1].
pub fn tone_weight(color: &RGBColorFormat<u8>) -> f64 {
    contrast(RGBColorFormat::<f64>::from(color).luminance())
}

pub fn contrast(value: f64) -> f64 {
    ((value - 0.5) * (1.0 + CONTRAST_BOOST) + 0.5).clamp(0.0, 1.0)
}

/// Maps `image` to a duotone between the `shadow` and `highlight` color strings.
pub fn map_duotone(image: &Image, shadow: &str, highlight: &str) -> Result<Image> {
    let options = DuotoneOptions::parse(shadow, highlight)?;
    let mut target = RenderTarget::new();
    DuotoneTransformer::new(&options).transform(image, &mut target)
}
