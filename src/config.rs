//! Engine configuration, immutable for the engine's lifetime.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Grid dimensions and cell / header sizing in logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub row_count: u32,
    pub col_count: u32,
    pub row_height: f32,
    pub col_width: f32,
    /// Height of the column-header band at the top.
    pub header_height: f32,
    /// Width of the row-header band on the left.
    pub header_width: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            row_count: 1000,
            col_count: 26,
            row_height: 24.0,
            col_width: 100.0,
            header_height: 24.0,
            header_width: 48.0,
        }
    }
}

impl EngineConfig {
    /// Reject configurations the engine cannot clamp its way out of.
    pub fn validate(&self) -> Result<()> {
        if self.row_count == 0 || self.col_count == 0 {
            return Err(GridError::Config(format!(
                "grid must have at least one row and column, got {}x{}",
                self.row_count, self.col_count
            )));
        }
        if self.row_height <= 0.0 || self.col_width <= 0.0 {
            return Err(GridError::Config(format!(
                "cell sizes must be positive, got {}x{}",
                self.col_width, self.row_height
            )));
        }
        if self.header_height < 0.0 || self.header_width < 0.0 {
            return Err(GridError::Config("header sizes must be >= 0".to_string()));
        }
        Ok(())
    }

    pub fn last_row(&self) -> u32 {
        self.row_count.saturating_sub(1)
    }

    pub fn last_col(&self) -> u32 {
        self.col_count.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_rows_rejected() {
        let config = EngineConfig {
            row_count: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_positive_cell_size_rejected() {
        let config = EngineConfig {
            col_width: 0.0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
