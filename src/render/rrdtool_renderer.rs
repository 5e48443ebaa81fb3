use std::path::Path;

use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::{GraphRenderer, InstructionSet, RenderedImage};
use crate::rrdtool::RrdtoolCommand;

/// Renders through `rrdtool graph`.
#[derive(Debug, Clone, Default)]
pub struct RrdtoolGraphRenderer {
    command: RrdtoolCommand,
}

impl RrdtoolGraphRenderer {
    #[must_use]
    pub fn new(command: RrdtoolCommand) -> Self {
        Self { command }
    }
}

impl GraphRenderer for RrdtoolGraphRenderer {
    fn render(
        &mut self,
        instructions: &InstructionSet,
        output: &Path,
    ) -> ChartResult<RenderedImage> {
        let mut args = vec![output.to_string_lossy().into_owned()];
        args.extend(instructions.to_args());

        let stdout = self
            .command
            .run("graph", &args)
            .map_err(ChartError::Renderer)?;
        let image = parse_dimensions(&stdout)?;
        debug!(
            output = %output.display(),
            width = image.width,
            height = image.height,
            "rrdtool graph finished"
        );
        Ok(image)
    }
}

/// Reads the `<width>x<height>` line `rrdtool graph` prints first.
pub fn parse_dimensions(stdout: &str) -> ChartResult<RenderedImage> {
    let line = stdout.lines().next().unwrap_or_default().trim();
    let parsed = line
        .split_once('x')
        .and_then(|(w, h)| Some((w.parse::<u32>().ok()?, h.parse::<u32>().ok()?)));
    match parsed {
        Some((width, height)) => Ok(RenderedImage { width, height }),
        None => Err(ChartError::Renderer(format!(
            "unexpected rrdtool graph output `{line}`"
        ))),
    }
}
