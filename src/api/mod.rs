mod composer;
mod composer_config;
mod rendered_chart;

pub use composer::{ChartPlan, GraphComposer};
pub use composer_config::ComposerConfig;
pub use rendered_chart::RenderedChart;
