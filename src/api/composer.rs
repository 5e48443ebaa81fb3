use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::core::{
    SourceChannels, SourceFile, TimeWindow, allocate_colors, inspect_channels, name_legends,
    resolve_freshness,
};
use crate::error::{ChartError, ChartResult, ComposeWarning};
use crate::render::{AssemblyInput, GraphRenderer, InstructionAssembler, InstructionSet};
use crate::source::SourceReader;

use super::{ComposerConfig, RenderedChart};

/// Fully resolved chart, ready for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPlan {
    pub instructions: InstructionSet,
    pub warnings: Vec<ComposeWarning>,
    pub as_of: DateTime<Utc>,
    pub time_window: TimeWindow,
}

/// Turns groups of archives into rendered charts.
///
/// Each `compose` call is independent: legend names, palette slots and
/// freshness are derived from that call's sources only.
pub struct GraphComposer<S: SourceReader, R: GraphRenderer> {
    reader: S,
    renderer: R,
    config: ComposerConfig,
}

impl<S: SourceReader, R: GraphRenderer> GraphComposer<S, R> {
    pub fn new(reader: S, renderer: R, config: ComposerConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            renderer,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    #[must_use]
    pub fn reader(&self) -> &S {
        &self.reader
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Renders one chart from `files`.
    ///
    /// Any fatal failure comes back as `ComposeFailed` wrapping its cause.
    /// Palette exhaustion and timestamp skew only add warnings to the result.
    pub fn compose(
        &mut self,
        files: &[SourceFile],
        title: &str,
        time_window: TimeWindow,
    ) -> ChartResult<RenderedChart> {
        self.compose_inner(files, title, time_window)
            .map_err(|source| ChartError::ComposeFailed {
                title: title.to_owned(),
                source: Box::new(source),
            })
    }

    /// Builds the instruction set `compose` would hand to the renderer,
    /// without rendering.
    pub fn plan(
        &self,
        files: &[SourceFile],
        title: &str,
        time_window: TimeWindow,
    ) -> ChartResult<ChartPlan> {
        let time_window = time_window.validate()?;
        let files: IndexSet<&SourceFile> = files.iter().collect();
        if files.is_empty() {
            return Err(ChartError::InvalidData(
                "chart needs at least one source file".to_owned(),
            ));
        }

        let mut sources: Vec<SourceChannels> = Vec::with_capacity(files.len());
        let mut timestamps = Vec::with_capacity(files.len());
        for file in files {
            let metadata = self.reader.read(file)?;
            sources.push(inspect_channels(file, &metadata.channels)?);
            timestamps.push(metadata.last_update);
        }

        let legends = name_legends(&sources, self.config.legend_options());
        let colors = allocate_colors(&self.config.palette, &sources);
        let freshness = resolve_freshness(&timestamps)?;

        let warnings = colors
            .warning
            .iter()
            .chain(freshness.warning.iter())
            .cloned()
            .collect();

        let instructions = InstructionAssembler::new(self.config.graph_style()).assemble(
            &AssemblyInput {
                sources: &sources,
                legends: &legends,
                colors: &colors,
                time_window,
                title,
                as_of: freshness.as_of,
            },
        );
        Ok(ChartPlan {
            instructions,
            warnings,
            as_of: freshness.as_of,
            time_window,
        })
    }

    fn compose_inner(
        &mut self,
        files: &[SourceFile],
        title: &str,
        time_window: TimeWindow,
    ) -> ChartResult<RenderedChart> {
        let plan = self.plan(files, title, time_window)?;
        for warning in &plan.warnings {
            warn!(title, %warning, "chart composed with degraded output");
        }

        // Removed on drop, so every early return below releases it.
        let output = tempfile::Builder::new()
            .prefix("rrd-chart-")
            .suffix(&format!(".{}", self.config.image_format.extension()))
            .tempfile()?;

        let image = self.renderer.render(&plan.instructions, output.path())?;
        let bytes = std::fs::read(output.path())?;
        output.close()?;

        debug!(
            title,
            width = image.width,
            height = image.height,
            bytes = bytes.len(),
            "rendered chart"
        );
        Ok(RenderedChart {
            image: bytes,
            image_format: self.config.image_format,
            width: image.width,
            height: image.height,
            title: title.to_owned(),
            time_window: plan.time_window,
            as_of: plan.as_of,
            warnings: plan.warnings,
        })
    }
}
