use std::path::Path;

use color_ramps::{check_ramps, ColorTable, PaletteSnapshot, Ramp};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Palette and ramps as saved to disk.
///
/// ```json
/// {"colors": {"0": {"color": [51, 51, 51, 255], "positions": [[0, 0]]}},
///  "ramps": [[0, 1, 2]]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaletteState {
    #[serde(default)]
    pub colors: ColorTable,

    #[serde(default)]
    pub ramps: Vec<Ramp>,
}

impl PaletteState {
    pub fn new(colors: ColorTable, ramps: Vec<Ramp>) -> Self {
        Self { colors, ramps }
    }

    /// Parse a state document and validate its ramps against its colors.
    pub fn from_json_str(content: &str) -> Result<Self, AppError> {
        let state: Self = serde_json::from_str(content)?;
        state.check()?;
        Ok(state)
    }

    pub fn to_json_string(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::read(path, e))?;
        let state = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            colors = state.colors.len(),
            ramps = state.ramps.len(),
            "Loaded state"
        );
        Ok(state)
    }

    pub fn write(&self, path: &Path) -> Result<(), AppError> {
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(|e| AppError::write(path, e))?;
        tracing::info!(path = %path.display(), ramps = self.ramps.len(), "Saved state");
        Ok(())
    }

    pub fn snapshot(&self) -> PaletteSnapshot {
        PaletteSnapshot::from(&self.colors)
    }

    /// Every ramp has at least three colors, no repeats, and only known ids.
    pub fn check(&self) -> Result<(), AppError> {
        check_ramps(&self.ramps, &self.snapshot())?;
        Ok(())
    }
}
