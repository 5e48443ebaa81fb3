//! rrd-chart-rs: chart composition for collectd round-robin archives.
//!
//! Given the archives of one metric group, the crate discovers their
//! channels, derives aligned legend names, allocates palette colors, reconciles
//! freshness and assembles the directive list for `rrdtool graph`. Rendering
//! itself stays behind the `GraphRenderer` seam.

pub mod api;
pub mod collect;
pub mod core;
pub mod error;
pub mod render;
pub mod rrdtool;
pub mod source;
pub mod telemetry;

pub use api::{ComposerConfig, GraphComposer, RenderedChart};
pub use error::{ChartError, ChartResult, ComposeWarning};
