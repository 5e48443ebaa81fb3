//! Read-only access to archive metadata.

mod memory;
mod rrdtool_reader;

pub use memory::MemorySourceReader;
pub use rrdtool_reader::{RrdtoolSourceReader, parse_info_output};

use chrono::{DateTime, Utc};

use crate::core::{ChannelMetadata, SourceFile};
use crate::error::ChartResult;

/// Metadata of one archive: its channel keys and last sample time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMetadata {
    pub channels: ChannelMetadata,
    pub last_update: DateTime<Utc>,
}

impl SourceMetadata {
    #[must_use]
    pub fn new(channels: ChannelMetadata, last_update: DateTime<Utc>) -> Self {
        Self {
            channels,
            last_update,
        }
    }
}

pub trait SourceReader {
    /// Fails with `SourceUnreadable` when the archive cannot be opened.
    fn read(&self, file: &SourceFile) -> ChartResult<SourceMetadata>;
}

impl<T: SourceReader + ?Sized> SourceReader for &T {
    fn read(&self, file: &SourceFile) -> ChartResult<SourceMetadata> {
        (**self).read(file)
    }
}
