use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::core::{ChannelMetadata, SourceFile};
use crate::error::{ChartError, ChartResult};
use crate::source::{SourceMetadata, SourceReader};

/// Serves archive metadata registered up front. Unknown paths are
/// unreadable.
#[derive(Debug, Clone, Default)]
pub struct MemorySourceReader {
    sources: IndexMap<PathBuf, SourceMetadata>,
}

impl MemorySourceReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an archive exposing `channels`, last updated at `last_update`.
    #[must_use]
    pub fn with_source<S: AsRef<str>>(
        mut self,
        path: impl Into<PathBuf>,
        channels: &[S],
        last_update: DateTime<Utc>,
    ) -> Self {
        self.insert(
            path,
            SourceMetadata::new(ChannelMetadata::for_channels(channels), last_update),
        );
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, metadata: SourceMetadata) {
        self.sources.insert(path.into(), metadata);
    }
}

impl SourceReader for MemorySourceReader {
    fn read(&self, file: &SourceFile) -> ChartResult<SourceMetadata> {
        self.sources
            .get(file.path())
            .cloned()
            .ok_or_else(|| ChartError::source_unreadable(file.path(), "no such archive"))
    }
}
