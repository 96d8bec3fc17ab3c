//! Configuration structures for extraction and rendering.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{OtamailError, Result};
use crate::platform::Platform;
use crate::render::Template;

/// Main configuration for the otamail pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OtamailConfig {
    /// E-mail extraction configuration.
    pub extraction: ExtractionConfig,

    /// Summary rendering configuration.
    pub render: RenderConfig,
}

/// E-mail extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Longer input is truncated before pattern matching.
    pub max_input_chars: usize,

    /// Force a parser instead of detecting the platform (platform id).
    pub default_platform: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 200_000,
            default_platform: None,
        }
    }
}

impl ExtractionConfig {
    /// Forced platform, if configured. Unknown ids resolve to direct booking.
    pub fn forced_platform(&self) -> Option<Platform> {
        self.default_platform.as_deref().map(Platform::resolve)
    }
}

/// Summary rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Operator name used when none is given on the command line.
    pub operator: Option<String>,

    /// Template used when none is requested.
    pub default_template: Template,

    /// chrono format of the date stamp.
    pub date_format: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            operator: None,
            default_template: Template::Platform,
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

impl OtamailConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.max_input_chars == 0 {
            return Err(OtamailError::Config(
                "extraction.max_input_chars must be greater than 0".to_string(),
            ));
        }
        if self.render.date_format.trim().is_empty() {
            return Err(OtamailError::Config(
                "render.date_format must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
