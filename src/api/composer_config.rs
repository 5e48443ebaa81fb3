use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{GraphSize, LegendOptions, Palette};
use crate::error::{ChartError, ChartResult};
use crate::render::{GraphStyle, ImageFormat};

/// Composer configuration shared by every chart it renders.
///
/// Every field has a default, so a config file only lists what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    #[serde(default)]
    pub size: GraphSize,
    #[serde(default)]
    pub image_format: ImageFormat,
    #[serde(default = "default_watermark")]
    pub watermark: String,
    #[serde(default = "default_value_format")]
    pub value_format: String,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default = "default_line_width")]
    pub line_width: u8,
    #[serde(default = "default_channel")]
    pub default_channel: String,
    #[serde(default = "default_group_delimiter")]
    pub group_delimiter: char,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            size: GraphSize::default(),
            image_format: ImageFormat::default(),
            watermark: default_watermark(),
            value_format: default_value_format(),
            palette: Palette::default(),
            line_width: default_line_width(),
            default_channel: default_channel(),
            group_delimiter: default_group_delimiter(),
        }
    }
}

impl ComposerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = GraphSize::new(width, height);
        self
    }

    #[must_use]
    pub fn with_image_format(mut self, format: ImageFormat) -> Self {
        self.image_format = format;
        self
    }

    #[must_use]
    pub fn with_watermark(mut self, watermark: impl Into<String>) -> Self {
        self.watermark = watermark.into();
        self
    }

    /// Sets the printf-style format used for last/min/avg/max annotations.
    #[must_use]
    pub fn with_value_format(mut self, format: impl Into<String>) -> Self {
        self.value_format = format.into();
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, width: u8) -> Self {
        self.line_width = width;
        self
    }

    #[must_use]
    pub fn with_default_channel(mut self, name: impl Into<String>) -> Self {
        self.default_channel = name.into();
        self
    }

    #[must_use]
    pub fn with_group_delimiter(mut self, delimiter: char) -> Self {
        self.group_delimiter = delimiter;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.size.is_valid() {
            return Err(ChartError::InvalidData(format!(
                "graph size must be > 0, got {}x{}",
                self.size.width, self.size.height
            )));
        }
        if self.palette.is_empty() {
            return Err(ChartError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        if self.line_width == 0 {
            return Err(ChartError::InvalidData(
                "line width must be >= 1".to_owned(),
            ));
        }
        if self.value_format.is_empty() {
            return Err(ChartError::InvalidData(
                "value format must not be empty".to_owned(),
            ));
        }
        if self.default_channel.is_empty() {
            return Err(ChartError::InvalidData(
                "default channel name must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn graph_style(&self) -> GraphStyle<'_> {
        GraphStyle {
            size: self.size,
            image_format: self.image_format,
            watermark: &self.watermark,
            value_format: &self.value_format,
            line_width: self.line_width,
        }
    }

    #[must_use]
    pub fn legend_options(&self) -> LegendOptions<'_> {
        LegendOptions {
            default_channel: &self.default_channel,
            delimiter: self.group_delimiter,
        }
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChartError::InvalidData(format!("unable to read config {}: {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }
}

fn default_watermark() -> String {
    format!("rrd-chart-rs {}", env!("CARGO_PKG_VERSION"))
}

fn default_value_format() -> String {
    "%8.2lf %s".to_owned()
}

fn default_line_width() -> u8 {
    1
}

fn default_channel() -> String {
    "value".to_owned()
}

fn default_group_delimiter() -> char {
    '-'
}
