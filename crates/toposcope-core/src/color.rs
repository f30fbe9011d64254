//! Scalar-to-color interface consumed by the scene pipeline

use serde::{Deserialize, Serialize};

/// Linear RGB with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub [f64; 3]);

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Rgb([r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)])
    }

    /// Packed `0xRRGGBB`.
    pub fn to_hex(self) -> u32 {
        let [r, g, b] = self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u32);
        (r << 16) | (g << 8) | b
    }
}

/// Maps a scalar attribute value to a color, or `None` when the value has no color.
pub trait ColorTransfer {
    fn compute_color(&self, value: f64) -> Option<Rgb>;
}

impl<F> ColorTransfer for F
where
    F: Fn(f64) -> Option<Rgb>,
{
    fn compute_color(&self, value: f64) -> Option<Rgb> {
        self(value)
    }
}
