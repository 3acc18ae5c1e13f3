use super::RGBColorFormat;
use crate::error::Error;

const RGB_FUNCTION_NAMES: [&str; 2] = ["rgba", "rgb"];
const HSL_FUNCTION_NAMES: [&str; 2] = ["hsla", "hsl"];
// degrees per unit; "grad" is listed before its suffix "rad"
const HUE_UNITS: [(&str, f64); 4] = [
    ("deg", 1.0),
    ("grad", 0.9),
    ("rad", 180.0 / std::f64::consts::PI),
    ("turn", 360.0),
];

/// Parses a CSS-like color string into 8-bit RGB.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()` and
/// `hsl()`/`hsla()`. An alpha component is validated and then dropped.
pub fn parse_color(input: &str) -> crate::Result<RGBColorFormat<u8>> {
    let normalized = input.trim().to_ascii_lowercase();
    let parsed = if let Some(digits) = normalized.strip_prefix('#') {
        parse_hex(digits)
    } else if let Some(arguments) = function_arguments(&normalized, &RGB_FUNCTION_NAMES) {
        parse_rgb_arguments(&arguments)
    } else if let Some(arguments) = function_arguments(&normalized, &HSL_FUNCTION_NAMES) {
        parse_hsl_arguments(&arguments)
    } else {
        None
    };
    parsed.ok_or_else(|| Error::InvalidColor(input.to_owned()))
}

fn parse_hex(digits: &str) -> Option<RGBColorFormat<u8>> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 | 4 => {
            let red = parse_short_hex_component(&digits[0..1])?;
            let green = parse_short_hex_component(&digits[1..2])?;
            let blue = parse_short_hex_component(&digits[2..3])?;
            Some(RGBColorFormat::new(red, green, blue))
        }
        6 | 8 => {
            let red = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let green = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let blue = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some(RGBColorFormat::new(red, green, blue))
        }
        _ => None,
    }
}

fn parse_short_hex_component(digit: &str) -> Option<u8> {
    u8::from_str_radix(digit, 16).ok().map(|value| value * 17)
}

/// Splits the body of `name(...)` into three or four argument tokens.
///
/// Arguments are either all separated by commas, or by whitespace with an
/// optional alpha after a slash. The parenthesis must follow the name
/// directly.
fn function_arguments<'a>(input: &'a str, names: &[&str]) -> Option<Vec<&'a str>> {
    let body = names.iter().find_map(|name| {
        input
            .strip_prefix(name)?
            .strip_prefix('(')?
            .strip_suffix(')')
    })?;
    let arguments = if body.contains(',') {
        comma_separated_arguments(body)?
    } else {
        space_separated_arguments(body)?
    };
    match arguments.len() {
        3 | 4 => Some(arguments),
        _ => None,
    }
}

fn comma_separated_arguments(body: &str) -> Option<Vec<&str>> {
    body.split(',').map(single_token).collect()
}

fn space_separated_arguments(body: &str) -> Option<Vec<&str>> {
    let (channels, alpha) = match body.split_once('/') {
        Some((channels, alpha)) => (channels, Some(single_token(alpha)?)),
        None => (body, None),
    };
    let mut arguments: Vec<&str> = channels.split_whitespace().collect();
    if arguments.len() != 3 {
        return None;
    }
    arguments.extend(alpha);
    Some(arguments)
}

fn single_token(text: &str) -> Option<&str> {
    let token = text.trim();
    (!token.is_empty() && !token.contains(char::is_whitespace)).then_some(token)
}

fn parse_rgb_arguments(arguments: &[&str]) -> Option<RGBColorFormat<u8>> {
    let channels = [arguments[0], arguments[1], arguments[2]];
    let percentages = channels.iter().filter(|token| token.ends_with('%')).count();
    if percentages != 0 && percentages != channels.len() {
        return None;
    }
    let red = parse_rgb_channel(channels[0])?;
    let green = parse_rgb_channel(channels[1])?;
    let blue = parse_rgb_channel(channels[2])?;
    check_alpha(arguments)?;
    Some(RGBColorFormat::new(red, green, blue))
}

fn parse_rgb_channel(token: &str) -> Option<u8> {
    let value = match token.strip_suffix('%') {
        Some(percentage) => parse_number(percentage)? / 100.0 * u8::MAX as f64,
        None => parse_number(token)?,
    };
    Some(value.clamp(0.0, u8::MAX as f64).round() as u8)
}

fn parse_hsl_arguments(arguments: &[&str]) -> Option<RGBColorFormat<u8>> {
    let hue = parse_hue(arguments[0])?;
    let saturation = parse_percentage(arguments[1])?;
    let lightness = parse_percentage(arguments[2])?;
    check_alpha(arguments)?;
    Some(hsl_to_rgb(hue, saturation, lightness))
}

/// Hue in degrees. A bare number is taken as degrees.
fn parse_hue(token: &str) -> Option<f64> {
    let (number, factor) = HUE_UNITS
        .iter()
        .find_map(|(unit, factor)| Some((token.strip_suffix(*unit)?, *factor)))
        .unwrap_or((token, 1.0));
    Some(parse_number(number)? * factor)
}

fn parse_percentage(token: &str) -> Option<f64> {
    let value = parse_number(token.strip_suffix('%')?)?;
    Some(value.clamp(0.0, 100.0) / 100.0)
}

fn check_alpha(arguments: &[&str]) -> Option<()> {
    match arguments.get(3) {
        Some(alpha) => {
            parse_number(alpha.strip_suffix('%').unwrap_or(alpha))?;
            Some(())
        }
        None => Some(()),
    }
}

/// Plain decimal numbers: an optional sign, digits and at most one dot
/// followed by at least one digit. No exponents, no `inf` or `nan`.
fn parse_number(token: &str) -> Option<f64> {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let is_plain = match unsigned.split_once('.') {
        Some((integer, fraction)) => {
            is_digits(integer) && !fraction.is_empty() && is_digits(fraction)
        }
        None => !unsigned.is_empty() && is_digits(unsigned),
    };
    if !is_plain {
        return None;
    }
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> RGBColorFormat<u8> {
    let hue = hue.rem_euclid(360.0);
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let secondary = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let offset = lightness - chroma / 2.0;
    let (red, green, blue) = match hue {
        h if h < 60.0 => (chroma, secondary, 0.0),
        h if h < 120.0 => (secondary, chroma, 0.0),
        h if h < 180.0 => (0.0, chroma, secondary),
        h if h < 240.0 => (0.0, secondary, chroma),
        h if h < 300.0 => (secondary, 0.0, chroma),
        _ => (chroma, 0.0, secondary),
    };
    let to_channel = |value: f64| {
        ((value + offset) * u8::MAX as f64)
            .round()
            .clamp(0.0, u8::MAX as f64) as u8
    };
    RGBColorFormat::new(to_channel(red), to_channel(green), to_channel(blue))
}
