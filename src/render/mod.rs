mod assembler;
mod instruction;
mod null_renderer;
mod rrdtool_renderer;

pub use assembler::{AssemblyInput, GraphStyle, InstructionAssembler};
pub use instruction::{
    Consolidation, ImageFormat, InstructionSet, RenderInstruction, TextAlign, escape_colons,
};
pub use null_renderer::{NULL_IMAGE_BYTES, NullGraphRenderer};
pub use rrdtool_renderer::{RrdtoolGraphRenderer, parse_dimensions};

use std::path::Path;

use crate::error::ChartResult;

/// Pixel size reported by a renderer for the image it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
}

/// Contract implemented by any graph rendering backend.
///
/// Backends receive a complete `InstructionSet` and write the image to
/// `output`; they never see chart-domain types.
pub trait GraphRenderer {
    fn render(
        &mut self,
        instructions: &InstructionSet,
        output: &Path,
    ) -> ChartResult<RenderedImage>;
}
