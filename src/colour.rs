//! Temperature to display colour mapping.
//!
//! Six bands, from fixed blue through white, green and yellow to fixed red.
//! Adjacent bands agree at their shared edge.

use std::fmt;

/// An RGB triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    /// CSS `rgb()` argument form, e.g. `255,255,0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0, self.1, self.2)
    }
}

/// Colour for a temperature in degrees Fahrenheit.
pub fn colour_for(temp_f: f64) -> Rgb {
    if temp_f <= -25.5 {
        return Rgb(0, 0, 255);
    }
    if temp_f <= 0.0 {
        let c = channel(255.0 + temp_f * 10.0);
        return Rgb(c, c, 255);
    }
    if temp_f <= 12.75 {
        let c = channel(255.0 - temp_f * 20.0);
        return Rgb(c, 255, c);
    }
    if temp_f <= 25.5 {
        return Rgb(channel((temp_f - 12.75) * 20.0), 255, 0);
    }
    if temp_f <= 38.25 {
        return Rgb(255, channel(255.0 - (temp_f - 25.5) * 20.0), 0);
    }
    Rgb(255, 0, 0)
}

// Inside every band the formulas stay within 0..=255; rounds half up.
fn channel(value: f64) -> u8 {
    (value + 0.5).floor() as u8
}
