//! CIE L\*a\*b\* and the CIEDE2000 color difference
//!
//! Conversion goes sRGB → linear RGB → XYZ (D65) → Lab. The difference
//! formula follows CIE Technical Report 142-2001 with `kL = kC = kH = 1`.

use super::Color;

/// D65 reference white in XYZ.
const WHITE_X: f64 = 0.95047;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.08883;

/// 25^7, the chroma pivot used by the G and RC terms.
const POW7_25: f64 = 6_103_515_625.0;

/// A color in CIE L\*a\*b\* space (D65 white point).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness, `[0, 100]`
    pub l: f64,
    /// Green–red axis
    pub a: f64,
    /// Blue–yellow axis
    pub b: f64,
}

impl Lab {
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// CIEDE2000 difference to `other`.
    #[inline]
    pub fn delta_e(&self, other: &Lab) -> f64 {
        ciede2000(self, other)
    }
}

impl From<Color> for Lab {
    fn from(c: Color) -> Self {
        let r = decode_gamma(c.r);
        let g = decode_gamma(c.g);
        let b = decode_gamma(c.b);

        let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
        let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
        let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

#[inline]
fn decode_gamma(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    const EPSILON: f64 = 216.0 / 24389.0;
    const KAPPA: f64 = 24389.0 / 27.0;
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

/// Hue angle in degrees on `[0, 360)`; zero for the neutral axis.
#[inline]
fn hue_degrees(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    b.atan2(a).to_degrees().rem_euclid(360.0)
}

#[inline]
fn chroma_weight(c: f64) -> f64 {
    let c7 = c.powi(7);
    (c7 / (c7 + POW7_25)).sqrt()
}

/// CIEDE2000 color difference between two Lab colors.
///
/// Symmetric, zero for identical inputs.
///
/// # Example
/// ```
/// use color_ramps::{ciede2000, Lab};
/// let a = Lab::new(50.0, 2.6772, -79.7751);
/// let b = Lab::new(50.0, 0.0, -82.7485);
/// assert!((ciede2000(&a, &b) - 2.0425).abs() < 1e-4);
/// ```
pub fn ciede2000(lab1: &Lab, lab2: &Lab) -> f64 {
    let c_mean_ab = (lab1.a.hypot(lab1.b) + lab2.a.hypot(lab2.b)) / 2.0;
    let g = 0.5 * (1.0 - chroma_weight(c_mean_ab));

    let a1 = lab1.a * (1.0 + g);
    let a2 = lab2.a * (1.0 + g);
    let c1 = a1.hypot(lab1.b);
    let c2 = a2.hypot(lab2.b);
    let h1 = hue_degrees(a1, lab1.b);
    let h2 = hue_degrees(a2, lab2.b);

    let neutral = c1 * c2 == 0.0;

    let dl = lab2.l - lab1.l;
    let dc = c2 - c1;
    let dh = if neutral {
        0.0
    } else {
        let raw = h2 - h1;
        if raw > 180.0 {
            raw - 360.0
        } else if raw < -180.0 {
            raw + 360.0
        } else {
            raw
        }
    };
    let dh_big = 2.0 * (c1 * c2).sqrt() * (dh.to_radians() / 2.0).sin();

    let l_mean = (lab1.l + lab2.l) / 2.0;
    let c_mean = (c1 + c2) / 2.0;
    let h_mean = if neutral {
        h1 + h2
    } else if (h1 - h2).abs() <= 180.0 {
        (h1 + h2) / 2.0
    } else if h1 + h2 < 360.0 {
        (h1 + h2 + 360.0) / 2.0
    } else {
        (h1 + h2 - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_mean).to_radians().cos()
        + 0.32 * (3.0 * h_mean + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_mean - 63.0).to_radians().cos();

    let l_off = (l_mean - 50.0).powi(2);
    let sl = 1.0 + 0.015 * l_off / (20.0 + l_off).sqrt();
    let sc = 1.0 + 0.045 * c_mean;
    let sh = 1.0 + 0.015 * c_mean * t;

    let d_theta = 30.0 * (-((h_mean - 275.0) / 25.0).powi(2)).exp();
    let rt = -2.0 * chroma_weight(c_mean) * (2.0 * d_theta).to_radians().sin();

    let tl = dl / sl;
    let tc = dc / sc;
    let th = dh_big / sh;

    (tl * tl + tc * tc + th * th + rt * tc * th).sqrt()
}
