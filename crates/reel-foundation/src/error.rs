use crate::driver::Edge;
use reel_core::Size;

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroGroupSize,
    ZeroPoolCapacity,
    InvalidOverscan { multiple: f32 },
    InvalidViewport { size: Size },
    InvalidTemplateSize { size: Size },
    AnchorOutOfRange { axis: &'static str, value: f32 },
    InvalidRefreshOffset { edge: Edge, value: f32 },
    InvalidRefreshMultiple { edge: Edge, value: f32 },
    InvalidPageThreshold { value: f32 },
    NegativePageSetting { name: &'static str, value: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroGroupSize => write!(f, "group size must be at least 1"),
            ConfigError::ZeroPoolCapacity => write!(f, "pool capacity must be at least 1"),
            ConfigError::InvalidOverscan { multiple } => {
                write!(f, "overscan multiple {multiple} must be finite and >= 1")
            }
            ConfigError::InvalidViewport { size } => write!(
                f,
                "viewport {}x{} must be positive in both dimensions",
                size.width, size.height
            ),
            ConfigError::InvalidTemplateSize { size } => write!(
                f,
                "item template size {}x{} must be finite and non-negative",
                size.width, size.height
            ),
            ConfigError::AnchorOutOfRange { axis, value } => {
                write!(f, "{axis} anchor {value} outside [0, 1]")
            }
            ConfigError::InvalidRefreshOffset { edge, value } => {
                write!(f, "{edge:?} refresh out-offset {value} must be positive")
            }
            ConfigError::InvalidRefreshMultiple { edge, value } => {
                write!(f, "{edge:?} refresh trigger multiple {value} must be positive")
            }
            ConfigError::InvalidPageThreshold { value } => {
                write!(f, "page scroll threshold {value} outside (0, 1]")
            }
            ConfigError::NegativePageSetting { name, value } => {
                write!(f, "page setting {name} = {value} must be non-negative")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
