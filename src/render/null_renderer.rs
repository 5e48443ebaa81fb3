use std::path::{Path, PathBuf};

use crate::error::{ChartError, ChartResult};
use crate::render::{GraphRenderer, InstructionSet, RenderedImage};

/// Placeholder bytes written in place of a real image.
pub const NULL_IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnull";

/// Headless renderer used by tests and dry runs.
///
/// It records the last instruction set, writes [`NULL_IMAGE_BYTES`] to the
/// output location and reports fixed dimensions. `failing` builds one that
/// rejects every call.
#[derive(Debug, Clone)]
pub struct NullGraphRenderer {
    pub width: u32,
    pub height: u32,
    pub render_count: usize,
    pub last_instructions: Option<InstructionSet>,
    pub last_output: Option<PathBuf>,
    failure: Option<String>,
}

impl NullGraphRenderer {
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }
}

impl Default for NullGraphRenderer {
    fn default() -> Self {
        Self {
            width: 497,
            height: 173,
            render_count: 0,
            last_instructions: None,
            last_output: None,
            failure: None,
        }
    }
}

impl GraphRenderer for NullGraphRenderer {
    fn render(
        &mut self,
        instructions: &InstructionSet,
        output: &Path,
    ) -> ChartResult<RenderedImage> {
        self.render_count += 1;
        self.last_instructions = Some(instructions.clone());
        self.last_output = Some(output.to_path_buf());
        if let Some(message) = &self.failure {
            return Err(ChartError::Renderer(message.clone()));
        }
        std::fs::write(output, NULL_IMAGE_BYTES)?;
        Ok(RenderedImage {
            width: self.width,
            height: self.height,
        })
    }
}
