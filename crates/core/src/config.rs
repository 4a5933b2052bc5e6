//! Engine configuration, fixed at construction.

use std::fmt;

use crate::types::{
    BASE_FALL_MS, BOARD_HEIGHT, BOARD_WIDTH, FALL_FLOOR_MS, LINE_SCORE_MULTIPLIER,
    MAX_BOARD_DIMENSION, ROWS_PER_LEVEL, TALL_BOARD_HEIGHT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    pub base_fall_ms: u32,
    pub fall_floor_ms: u32,
    pub score_multiplier: u32,
    pub rows_per_level: u32,
    /// Whether the landing shadow is offered to renderers
    pub shadow_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            base_fall_ms: BASE_FALL_MS,
            fall_floor_ms: FALL_FLOOR_MS,
            score_multiplier: LINE_SCORE_MULTIPLIER,
            rows_per_level: ROWS_PER_LEVEL,
            shadow_enabled: true,
        }
    }
}

impl EngineConfig {
    /// Classic rules on a 10x30 grid
    pub fn tall() -> Self {
        Self {
            height: TALL_BOARD_HEIGHT,
            ..Self::default()
        }
    }

    /// Overlay environment variables on the defaults
    ///
    /// Unset or unparsable values keep the default.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Overlay environment variables on `self`
    pub fn with_env(self) -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let shadow_enabled = env::var("CLASSIC_TETRIS_SHADOW")
            .ok()
            .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
            .unwrap_or(self.shadow_enabled);

        Self {
            width: parsed("CLASSIC_TETRIS_WIDTH").unwrap_or(self.width),
            height: parsed("CLASSIC_TETRIS_HEIGHT").unwrap_or(self.height),
            base_fall_ms: parsed("CLASSIC_TETRIS_BASE_FALL_MS").unwrap_or(self.base_fall_ms),
            fall_floor_ms: parsed("CLASSIC_TETRIS_FALL_FLOOR_MS").unwrap_or(self.fall_floor_ms),
            shadow_enabled,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.width > MAX_BOARD_DIMENSION {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        if self.height == 0 || self.height > MAX_BOARD_DIMENSION {
            return Err(ConfigError::InvalidHeight(self.height));
        }
        if self.rows_per_level == 0 {
            return Err(ConfigError::ZeroRowsPerLevel);
        }
        if self.base_fall_ms == 0 {
            return Err(ConfigError::ZeroBaseInterval);
        }
        if self.fall_floor_ms > self.base_fall_ms {
            return Err(ConfigError::FloorAboveBase {
                floor_ms: self.fall_floor_ms,
                base_ms: self.base_fall_ms,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    InvalidWidth(u8),
    InvalidHeight(u8),
    ZeroRowsPerLevel,
    ZeroBaseInterval,
    FloorAboveBase { floor_ms: u32, base_ms: u32 },
    /// A pre-filled grid does not match the configured dimensions
    GridMismatch { width: u8, height: u8 },
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::InvalidWidth(_) | ConfigError::InvalidHeight(_) => "invalid_dimensions",
            ConfigError::ZeroRowsPerLevel => "invalid_progression",
            ConfigError::ZeroBaseInterval | ConfigError::FloorAboveBase { .. } => {
                "invalid_interval"
            }
            ConfigError::GridMismatch { .. } => "grid_mismatch",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::InvalidWidth(_) => "grid width must be between 1 and 64",
            ConfigError::InvalidHeight(_) => "grid height must be between 1 and 64",
            ConfigError::ZeroRowsPerLevel => "rows per level must be positive",
            ConfigError::ZeroBaseInterval => "base fall interval must be positive",
            ConfigError::FloorAboveBase { .. } => "fall interval floor exceeds the base interval",
            ConfigError::GridMismatch { .. } => "grid dimensions differ from the configuration",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigError::InvalidWidth(w) => write!(f, "{} (got {})", self.message(), w),
            ConfigError::InvalidHeight(h) => write!(f, "{} (got {})", self.message(), h),
            ConfigError::FloorAboveBase { floor_ms, base_ms } => {
                write!(f, "{} ({}ms > {}ms)", self.message(), floor_ms, base_ms)
            }
            ConfigError::GridMismatch { width, height } => {
                write!(f, "{} (grid is {}x{})", self.message(), width, height)
            }
            _ => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for ConfigError {}
