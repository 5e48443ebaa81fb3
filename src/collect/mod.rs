//! Batch rendering of a collectd data directory.

mod discovery;
mod report;

pub use discovery::{ARCHIVE_EXTENSION, ChartGroup, DEFAULT_MAX_PLUGINS_PER_HOST, discover};
pub use report::{FigureMap, Report, ReportFailure, ReportPeriod, build_report};
