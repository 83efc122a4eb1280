use core::fmt;

/// An sRGB color triple.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    /// CSS `rgb(...)` notation, the form the grid renderer consumes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.0, self.1, self.2)
    }
}

/// Density gradient endpoint for an empty slot (light pink).
pub const DENSITY_LOW: Rgb = Rgb(255, 182, 193);

/// Density gradient endpoint for the busiest slot (near-black red).
pub const DENSITY_HIGH: Rgb = Rgb(60, 0, 0);

/// Interpolates linearly per channel between the density endpoints.
/// `count` is clamped to `[0, max_count]`; `max_count == 0` (an empty
/// week) renders at the low endpoint.
///
/// # Examples
/// ```
/// use rota_libs::color::{density_color, DENSITY_HIGH, DENSITY_LOW};
///
/// assert_eq!(density_color(0, 4), DENSITY_LOW);
/// assert_eq!(density_color(4, 4), DENSITY_HIGH);
/// assert_eq!(density_color(0, 0), DENSITY_LOW);
/// assert_eq!(density_color(2, 4).to_string(), "rgb(158,91,97)");
/// ```
pub fn density_color(count: u32, max_count: u32) -> Rgb {
    let ratio = if max_count == 0 {
        0.0
    } else {
        f64::from(count.min(max_count)) / f64::from(max_count)
    };

    let channel = |low: u8, high: u8| {
        (f64::from(low) + (f64::from(high) - f64::from(low)) * ratio).round() as u8
    };

    Rgb(
        channel(DENSITY_LOW.0, DENSITY_HIGH.0),
        channel(DENSITY_LOW.1, DENSITY_HIGH.1),
        channel(DENSITY_LOW.2, DENSITY_HIGH.2),
    )
}
