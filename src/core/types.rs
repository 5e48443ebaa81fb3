use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// One round-robin archive contributing channels to a chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceFile {
    path: PathBuf,
    stem: String,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, stem }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Stem with its leading group token dropped.
    ///
    /// `memory-used` becomes `used`, `if_octets-eth0-rx` becomes `eth0-rx`.
    /// A stem without `delimiter` (or with nothing after it) is kept whole.
    #[must_use]
    pub fn base_label(&self, delimiter: char) -> &str {
        match self.stem.split_once(delimiter) {
            Some((_, rest)) if !rest.is_empty() => rest,
            _ => &self.stem,
        }
    }
}

impl From<&str> for SourceFile {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for SourceFile {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

/// Channels discovered in one source, in natural order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceChannels {
    pub file: SourceFile,
    pub channels: SmallVec<[String; 4]>,
}

impl SourceChannels {
    #[must_use]
    pub fn new<I, S>(file: SourceFile, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            file,
            channels: channels.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Plotted interval. An open bound leaves the renderer default in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    #[must_use]
    pub const fn open() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub const fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Window covering `span` back from `now`, with an open end.
    #[must_use]
    pub fn trailing(now: DateTime<Utc>, span: Duration) -> Self {
        Self {
            start: Some(now - span),
            end: None,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start >= end {
                return Err(ChartError::InvalidData(format!(
                    "time window start {start} must be before end {end}"
                )));
            }
        }
        Ok(self)
    }
}

/// Requested canvas size in pixels, excluding legend and axis decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSize {
    pub width: u32,
    pub height: u32,
}

impl GraphSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for GraphSize {
    fn default() -> Self {
        Self::new(400, 100)
    }
}
