use std::str::FromStr;

use crate::error::Error;

mod parser;

pub use parser::parse_color;

const RED_LUMINANCE_WEIGHT: f64 = 0.2126;
const GREEN_LUMINANCE_WEIGHT: f64 = 0.7152;
const BLUE_LUMINANCE_WEIGHT: f64 = 0.0722;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RGBColorFormat<T> {
    red: T,
    green: T,
    blue: T,
}

impl<T: Copy> RGBColorFormat<T> {
    pub fn new(red: T, green: T, blue: T) -> Self {
        RGBColorFormat { red, green, blue }
    }

    pub fn red(&self) -> T {
        self.red
    }

    pub fn green(&self) -> T {
        self.green
    }

    pub fn blue(&self) -> T {
        self.blue
    }

    pub fn channels(&self) -> [T; 3] {
        [self.red, self.green, self.blue]
    }
}

impl RGBColorFormat<u8> {
    /// Blends towards `other` by `weight` in [0, 1]. Each channel is rounded
    /// half away from zero and clamped, so a weight of exactly 0 or 1 yields
    /// `self` or `other` unchanged.
    pub fn blend(&self, other: &Self, weight: f64) -> Self {
        RGBColorFormat {
            red: lerp_channel(self.red, other.red, weight),
            green: lerp_channel(self.green, other.green, weight),
            blue: lerp_channel(self.blue, other.blue, weight),
        }
    }
}

impl RGBColorFormat<f64> {
    /// ITU-R BT.709 relative luminance of a normalized color.
    pub fn luminance(&self) -> f64 {
        self.red * RED_LUMINANCE_WEIGHT
            + self.green * GREEN_LUMINANCE_WEIGHT
            + self.blue * BLUE_LUMINANCE_WEIGHT
    }
}

impl Default for RGBColorFormat<f64> {
    fn default() -> Self {
        RGBColorFormat {
            red: 0.0,
            green: 0.0,
            blue: 0.0,
        }
    }
}

impl From<&RGBColorFormat<u8>> for RGBColorFormat<f64> {
    fn from(value: &RGBColorFormat<u8>) -> Self {
        RGBColorFormat {
            red: value.red as f64 / u8::MAX as f64,
            green: value.green as f64 / u8::MAX as f64,
            blue: value.blue as f64 / u8::MAX as f64,
        }
    }
}

impl From<RGBColorFormat<u8>> for RGBColorFormat<f64> {
    fn from(value: RGBColorFormat<u8>) -> Self {
        RGBColorFormat::from(&value)
    }
}

impl FromStr for RGBColorFormat<u8> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

fn lerp_channel(from: u8, to: u8, weight: f64) -> u8 {
    let from = from as f64;
    let to = to as f64;
    let value = from + (to - from) * weight;
    value.round().clamp(0.0, u8::MAX as f64) as u8
}

#[cfg(test)]
mod test {
    use super::RGBColorFormat;

    #[test]
    fn normalize_white() {
        let white = RGBColorFormat::new(255_u8, 255, 255);
        let result = RGBColorFormat::<f64>::from(&white);
        assert_eq!(result.red(), 1.0, "red is wrong");
        assert_eq!(result.green(), 1.0, "green is wrong");
        assert_eq!(result.blue(), 1.0, "blue is wrong");
    }

    #[test]
    fn luminance_of_white_is_one() {
        let white = RGBColorFormat::<f64>::from(RGBColorFormat::new(255_u8, 255, 255));
        let luminance = white.luminance();
        assert!(
            (luminance - 1.0).abs() < 1e-12,
            "luminance is wrong, was {}",
            luminance
        );
    }

    #[test]
    fn luminance_of_black_is_zero() {
        assert_eq!(RGBColorFormat::<f64>::default().luminance(), 0.0);
    }

    #[test]
    fn luminance_weights_green_highest() {
        let red = RGBColorFormat::<f64>::from(RGBColorFormat::new(255_u8, 0, 0));
        let green = RGBColorFormat::<f64>::from(RGBColorFormat::new(0_u8, 255, 0));
        let blue = RGBColorFormat::<f64>::from(RGBColorFormat::new(0_u8, 0, 255));
        assert_eq!(red.luminance(), 0.2126);
        assert_eq!(green.luminance(), 0.7152);
        assert_eq!(blue.luminance(), 0.0722);
    }

    #[test]
    fn blend_endpoints_are_exact() {
        let shadow = RGBColorFormat::new(20_u8, 85, 39);
        let highlight = RGBColorFormat::new(247_u8, 132, 197);
        assert_eq!(shadow.blend(&highlight, 0.0), shadow);
        assert_eq!(shadow.blend(&highlight, 1.0), highlight);
    }

    #[test]
    fn blend_rounds_half_away_from_zero() {
        let from = RGBColorFormat::new(0_u8, 1, 10);
        let to = RGBColorFormat::new(1_u8, 0, 11);
        let result = from.blend(&to, 0.5);
        assert_eq!(result, RGBColorFormat::new(1, 1, 11));
    }

    #[test]
    fn blend_clamps_overshoot() {
        let from = RGBColorFormat::new(0_u8, 0, 0);
        let to = RGBColorFormat::new(255_u8, 255, 255);
        assert_eq!(from.blend(&to, 1.2), to);
        assert_eq!(to.blend(&from, 1.2), from);
    }

    #[test]
    fn parse_from_str() {
        let color: RGBColorFormat<u8> = "#145527".parse().unwrap();
        assert_eq!(color, RGBColorFormat::new(20, 85, 39));
    }
}
