use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::core::TimeWindow;
use crate::error::ComposeWarning;
use crate::render::ImageFormat;

/// Image produced for one chart plus the context it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedChart {
    #[serde(serialize_with = "serialize_base64")]
    pub image: Vec<u8>,
    pub image_format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub time_window: TimeWindow,
    pub as_of: DateTime<Utc>,
    #[serde(serialize_with = "serialize_warnings")]
    pub warnings: Vec<ComposeWarning>,
}

impl RenderedChart {
    /// Image bytes in standard base64.
    #[must_use]
    pub fn image_base64(&self) -> String {
        STANDARD.encode(&self.image)
    }

    /// `data:` URI suitable for an `<img src>` attribute.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.image_format.mime_type(),
            self.image_base64()
        )
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

fn serialize_warnings<S: Serializer>(
    warnings: &[ComposeWarning],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(warnings.iter().map(ToString::to_string))
}
