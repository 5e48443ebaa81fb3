use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("source `{}` is unreadable: {reason}", path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    #[error("graph renderer failed: {0}")]
    Renderer(String),

    #[error("temporary graph output unavailable: {0}")]
    TempResource(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to compose chart `{title}`: {source}")]
    ComposeFailed {
        title: String,
        #[source]
        source: Box<ChartError>,
    },
}

impl ChartError {
    pub(crate) fn source_unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SourceUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Innermost error, unwrapping any `ComposeFailed` layers.
    #[must_use]
    pub fn root_cause(&self) -> &ChartError {
        match self {
            Self::ComposeFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Non-fatal condition observed while composing one chart.
///
/// Warnings never abort composition; they travel with the rendered chart so
/// callers can surface them next to the image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeWarning {
    #[error("palette exhausted: {requested} channels requested, {available} colors available")]
    PaletteExhausted { requested: usize, available: usize },

    #[error("sources disagree on last update: {}", format_instants(observed))]
    TimestampSkew { observed: Vec<DateTime<Utc>> },
}

fn format_instants(observed: &[DateTime<Utc>]) -> String {
    observed
        .iter()
        .map(|ts| ts.to_rfc3339())
        .collect::<Vec<_>>()
        .join(", ")
}
