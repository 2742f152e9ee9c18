use std::path::PathBuf;

use color_ramps::{ConfigError, RampError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("Unsupported PNG layout: {0}")]
    UnsupportedPng(String),

    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("State file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction error: {0}")]
    Ramp(#[from] RampError),
}

impl AppError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_names_path() {
        let error = AppError::read(
            "palette.png",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(error.to_string(), "Failed to read palette.png: gone");
    }

    #[test]
    fn test_unsupported_png() {
        let error = AppError::UnsupportedPng("16-bit".to_string());
        assert_eq!(error.to_string(), "Unsupported PNG layout: 16-bit");
    }

    #[test]
    fn test_config_error_wraps() {
        let error: AppError = ConfigError::UnknownMethod {
            name: "Fancy".to_string(),
        }
        .into();
        assert!(matches!(error, AppError::Config(_)));
        assert!(error.to_string().contains("Fancy"));
    }

    #[test]
    fn test_cancelled_wraps() {
        let error: AppError = RampError::Cancelled.into();
        assert_eq!(error.to_string(), "Extraction error: extraction cancelled");
    }
}
