use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{ChartError, ChartResult, ComposeWarning};

/// Canonical "as of" instant for one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Freshness {
    pub as_of: DateTime<Utc>,
    pub warning: Option<ComposeWarning>,
}

/// Picks the latest last-update timestamp across sources.
///
/// Disagreement is reported as a `TimestampSkew` warning listing the distinct
/// instants in ascending order; it never fails the chart.
pub fn resolve_freshness(timestamps: &[DateTime<Utc>]) -> ChartResult<Freshness> {
    let distinct: BTreeSet<DateTime<Utc>> = timestamps.iter().copied().collect();
    let Some(as_of) = distinct.last().copied() else {
        return Err(ChartError::InvalidData(
            "cannot resolve freshness without sources".to_owned(),
        ));
    };

    let warning = (distinct.len() > 1).then(|| ComposeWarning::TimestampSkew {
        observed: distinct.into_iter().collect(),
    });
    if let Some(warning) = &warning {
        debug!(%warning, %as_of, "sources have multiple last timepoints");
    }

    Ok(Freshness { as_of, warning })
}
