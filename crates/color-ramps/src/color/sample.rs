use super::{Color, Hsv, Lab};

/// A palette color together with its HSV and Lab forms.
///
/// Built once per color so the search and the scorer never convert twice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSample {
    pub color: Color,
    pub hsv: Hsv,
    pub lab: Lab,
}

impl ColorSample {
    /// CIEDE2000 difference to `other`.
    #[inline]
    pub fn delta_e(&self, other: &ColorSample) -> f64 {
        self.lab.delta_e(&other.lab)
    }
}

impl From<Color> for ColorSample {
    fn from(color: Color) -> Self {
        Self {
            color,
            hsv: Hsv::from(color),
            lab: Lab::from(color),
        }
    }
}
