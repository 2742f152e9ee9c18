//! HSV color space
//!
//! All three components live in `[0, 1]`; hue is a fraction of a full turn.
//! Hue differences are always taken on the circle, see [`hue_delta`].

use super::Color;

/// A color in HSV space with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue as a fraction of a full turn, `[0, 1)`
    pub h: f64,
    /// Saturation, `[0, 1]`
    pub s: f64,
    /// Value (brightness), `[0, 1]`
    pub v: f64,
}

impl Hsv {
    #[inline]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Signed per-component step from `self` to `next`, hue wrapped.
    ///
    /// # Example
    /// ```
    /// use color_ramps::Hsv;
    /// let a = Hsv::new(0.95, 0.5, 0.2);
    /// let b = Hsv::new(0.05, 0.6, 0.4);
    /// let [dh, ds, dv] = a.step_to(&b);
    /// assert!((dh - 0.1).abs() < 1e-9);
    /// assert!((ds - 0.1).abs() < 1e-9);
    /// assert!((dv - 0.2).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn step_to(&self, next: &Hsv) -> [f64; 3] {
        [hue_delta(next.h, self.h), next.s - self.s, next.v - self.v]
    }
}

impl From<Color> for Hsv {
    fn from(c: Color) -> Self {
        let r = c.r as f64 / 255.0;
        let g = c.g as f64 / 255.0;
        let b = c.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let v = max;
        if max == min {
            return Self::new(0.0, 0.0, v);
        }

        let span = max - min;
        let s = span / max;
        let rc = (max - r) / span;
        let gc = (max - g) / span;
        let bc = (max - b) / span;

        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Self::new((h / 6.0).rem_euclid(1.0), s, v)
    }
}

/// Signed hue difference `h1 - h2` wrapped onto `[-0.5, 0.5)`.
///
/// Hues are fractions of a turn, so 0.99 and 0.01 are 0.02 apart.
#[inline]
pub fn hue_delta(h1: f64, h2: f64) -> f64 {
    let d = (h1 - h2 + 0.5).rem_euclid(1.0) - 0.5;
    // rem_euclid rounds tiny negative inputs up to exactly 1.0
    if d >= 0.5 {
        d - 1.0
    } else {
        d
    }
}

/// [`hue_delta`] expressed in degrees.
#[inline]
pub fn hue_delta_degrees(h1: f64, h2: f64) -> f64 {
    hue_delta(h1, h2) * 360.0
}

/// Per-step HSV deltas along a sequence of colors.
///
/// Returns `len - 1` steps; empty for sequences shorter than two.
pub fn hsv_steps(colors: &[Hsv]) -> Vec<[f64; 3]> {
    colors.windows(2).map(|w| w[0].step_to(&w[1])).collect()
}
