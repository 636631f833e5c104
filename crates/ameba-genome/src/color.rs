//! Trait-color codec.

use rand::Rng;
use std::fmt;

/// Default layer for new organisms
pub const BASELINE_COLOR: &str = "#88c1ff";

/// An RGB trait color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TraitColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb` or the same without the `#`.
    ///
    /// Returns `None` when the digits are not valid hexadecimal.
    pub fn parse(code: &str) -> Option<Self> {
        let digits = code.strip_prefix('#').unwrap_or(code);

        let expanded: String = if digits.chars().count() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };

        let value = u32::from_str_radix(&expanded, 16).ok()?;
        Some(Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Shift each channel independently by up to `magnitude * 255`
    pub fn perturb<R: Rng + ?Sized>(&self, magnitude: f64, rng: &mut R) -> Self {
        let change = (magnitude * 255.0) as i32;
        let mut shift = |channel: u8| -> u8 {
            let delta = ((rng.gen::<f64>() - 0.5) * 2.0 * change as f64) as i32;
            (channel as i32 + delta).clamp(0, 255) as u8
        };

        Self {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
        }
    }
}

impl fmt::Display for TraitColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Mutate one trait color.
///
/// Unparseable input comes back unchanged.
pub fn mutate_color<R: Rng + ?Sized>(code: &str, magnitude: f64, rng: &mut R) -> String {
    match TraitColor::parse(code) {
        Some(color) => color.perturb(magnitude, rng).to_hex(),
        None => {
            tracing::trace!(code, "Unparseable trait color left unchanged");
            code.to_string()
        }
    }
}
