use tracing::trace;

use crate::core::{ChannelMetadata, SourceFile};
use crate::error::{ChartError, ChartResult};
use crate::rrdtool::RrdtoolCommand;
use crate::source::{SourceMetadata, SourceReader};

/// Reads archive metadata through `rrdtool info`.
#[derive(Debug, Clone, Default)]
pub struct RrdtoolSourceReader {
    command: RrdtoolCommand,
}

impl RrdtoolSourceReader {
    #[must_use]
    pub fn new(command: RrdtoolCommand) -> Self {
        Self { command }
    }
}

impl SourceReader for RrdtoolSourceReader {
    fn read(&self, file: &SourceFile) -> ChartResult<SourceMetadata> {
        let stdout = self
            .command
            .run("info", [file.path()])
            .map_err(|reason| ChartError::source_unreadable(file.path(), reason))?;
        let metadata = parse_info_output(file, &stdout)?;
        trace!(
            path = %file.path().display(),
            entries = metadata.channels.len(),
            "read rrdtool info"
        );
        Ok(metadata)
    }
}

/// Splits `rrdtool info` output into channel metadata and the last update
/// instant.
pub fn parse_info_output(file: &SourceFile, stdout: &str) -> ChartResult<SourceMetadata> {
    let channels = ChannelMetadata::parse_info(stdout);
    let last_update = channels
        .last_update()
        .ok_or_else(|| ChartError::source_unreadable(file.path(), "missing last_update"))?;
    Ok(SourceMetadata::new(channels, last_update))
}
