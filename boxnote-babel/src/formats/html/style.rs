//! Inline `style` attribute handling
//!
//! Only a handful of properties matter to the document model. Values that cannot be understood
//! are dropped (or fall back to black for colors); they never abort a conversion.

use crate::ir::nodes::Rgb;
use log::debug;
use std::collections::HashMap;

/// Split a `style` attribute into property/value pairs.
///
/// Spaces are removed first; declarations without a `:` are dropped; a repeated property keeps
/// its last value.
pub fn parse_declarations(style: &str) -> HashMap<String, String> {
    style
        .replace(' ', "")
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            Some((property.to_string(), value.to_string()))
        })
        .collect()
}

/// Parse `rgb(r,g,b)`, `#rrggbb` or `#rgb`; anything else is black.
pub fn parse_color(value: &str) -> Rgb {
    let parsed = if value.contains("rgb") {
        parse_rgb_function(value)
    } else if value.contains('#') {
        parse_hex(value.trim_start_matches('#'))
    } else {
        None
    };
    parsed.unwrap_or_else(|| {
        debug!("unsupported color '{value}', using black");
        Rgb(0, 0, 0)
    })
}

fn parse_rgb_function(value: &str) -> Option<Rgb> {
    let digits: String = value
        .chars()
        .filter(|c| !c.is_ascii_lowercase() && *c != '(' && *c != ')')
        .collect();
    let channels = digits
        .split(',')
        .map(|channel| channel.trim().parse::<u8>().ok())
        .collect::<Option<Vec<_>>>()?;
    match channels[..] {
        [r, g, b] => Some(Rgb(r, g, b)),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let doubled: String = hex.chars().flat_map(|c| [c, c]).collect();
            parse_hex(&doubled)
        }
        _ => None,
    }
}

/// Font size in points: `em` × 12, `px` × 0.75, `pt` as is, rounded half to even.
pub fn parse_font_size(value: &str) -> Option<u32> {
    let factor = if value.contains("em") {
        12.0
    } else if value.contains("px") {
        0.75
    } else if value.contains("pt") {
        1.0
    } else {
        return None;
    };
    let number: String = value.chars().filter(|c| !c.is_ascii_lowercase()).collect();
    match number.parse::<f64>() {
        Ok(size) => Some((size * factor).round_ties_even().max(0.0) as u32),
        Err(_) => {
            debug!("unsupported font-size '{value}'");
            None
        }
    }
}

/// Whole pixels of a `margin-left` value; only plain `<digits>px` is understood.
pub fn parse_margin_px(value: &str) -> Option<u32> {
    let digits = value.strip_suffix("px")?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        debug!("unsupported margin-left '{value}'");
        return None;
    }
    digits.parse().ok()
}
