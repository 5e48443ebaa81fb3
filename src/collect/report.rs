use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::{GraphComposer, RenderedChart};
use crate::core::TimeWindow;
use crate::error::{ChartError, ChartResult};
use crate::render::GraphRenderer;
use crate::source::SourceReader;

use super::ChartGroup;

/// One time window rendered for every chart group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPeriod {
    /// Report key, e.g. `daily`.
    pub key: String,
    /// Title suffix, e.g. `by day`.
    pub label: String,
    pub span: Duration,
}

impl ReportPeriod {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, span: Duration) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            span,
        }
    }

    /// Last 24 hours and last 4 weeks.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("daily", "by day", Duration::days(1)),
            Self::new("monthly", "by month", Duration::weeks(4)),
        ]
    }
}

/// Chart that could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFailure {
    pub host: String,
    pub plugin: String,
    pub period: String,
    pub error: String,
}

/// `host -> plugin -> period -> chart`, in discovery order.
pub type FigureMap = IndexMap<String, IndexMap<String, IndexMap<String, RenderedChart>>>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub generated_at: Option<DateTime<Utc>>,
    pub figures: FigureMap,
    pub failures: Vec<ReportFailure>,
}

impl Report {
    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.figures
            .values()
            .flat_map(IndexMap::values)
            .map(IndexMap::len)
            .sum()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize report: {e}")))
    }
}

/// Composes every group for every period.
///
/// A failing chart is logged and recorded in `failures`; the rest of the
/// batch still renders.
pub fn build_report<S, R>(
    composer: &mut GraphComposer<S, R>,
    groups: &[ChartGroup],
    periods: &[ReportPeriod],
    now: DateTime<Utc>,
) -> Report
where
    S: SourceReader,
    R: GraphRenderer,
{
    let mut report = Report {
        generated_at: Some(now),
        ..Report::default()
    };

    for group in groups {
        for period in periods {
            let title = format!("{} - {}", group.plugin, period.label);
            let window = TimeWindow::trailing(now, period.span);
            match composer.compose(&group.files, &title, window) {
                Ok(chart) => {
                    report
                        .figures
                        .entry(group.host.clone())
                        .or_default()
                        .entry(group.plugin.clone())
                        .or_default()
                        .insert(period.key.clone(), chart);
                }
                Err(err) => {
                    warn!(
                        host = %group.host,
                        plugin = %group.plugin,
                        period = %period.key,
                        error = %err,
                        "skipping chart"
                    );
                    report.failures.push(ReportFailure {
                        host: group.host.clone(),
                        plugin: group.plugin.clone(),
                        period: period.key.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
    }

    info!(
        charts = report.chart_count(),
        failures = report.failures.len(),
        "report complete"
    );
    report
}
