use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::{SourceFile, natural_cmp};
use crate::error::{ChartError, ChartResult};

/// Default cap on plugins charted per host.
pub const DEFAULT_MAX_PLUGINS_PER_HOST: usize = 20;

/// Archive extension collectd writes.
pub const ARCHIVE_EXTENSION: &str = "rrd";

/// Archives of one collectd plugin on one host; they share a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartGroup {
    pub host: String,
    pub plugin: String,
    pub files: Vec<SourceFile>,
}

/// Lists `<root>/<host>/<plugin>/*.rrd`, naturally sorted at every level.
///
/// Plugins without archives are skipped. At most `max_plugins_per_host`
/// plugins are kept for each host.
pub fn discover(
    root: impl AsRef<Path>,
    max_plugins_per_host: usize,
) -> ChartResult<Vec<ChartGroup>> {
    let root = root.as_ref();
    let mut groups = Vec::new();

    for host_dir in sorted_children(root, EntryKind::Dir)? {
        let host = file_name(&host_dir);
        let mut kept = 0;
        for plugin_dir in sorted_children(&host_dir, EntryKind::Dir)? {
            if kept >= max_plugins_per_host {
                warn!(
                    host = %host,
                    max_plugins_per_host,
                    "plugin cap reached, skipping remaining plugins"
                );
                break;
            }
            let files: Vec<SourceFile> = sorted_children(&plugin_dir, EntryKind::Archive)?
                .into_iter()
                .map(SourceFile::new)
                .collect();
            if files.is_empty() {
                continue;
            }
            let plugin = file_name(&plugin_dir);
            debug!(
                host = %host,
                plugin = %plugin,
                archives = files.len(),
                "discovered chart group"
            );
            groups.push(ChartGroup {
                host: host.clone(),
                plugin,
                files,
            });
            kept += 1;
        }
    }

    Ok(groups)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    Archive,
}

fn sorted_children(dir: &Path, kind: EntryKind) -> ChartResult<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1) {
        let entry = entry.map_err(|e| {
            ChartError::InvalidData(format!("failed to list {}: {e}", dir.display()))
        })?;
        let path = entry.path();
        let keep = match kind {
            EntryKind::Dir => entry.file_type().is_dir(),
            EntryKind::Archive => {
                entry.file_type().is_file()
                    && path.extension().is_some_and(|ext| ext == ARCHIVE_EXTENSION)
            }
        };
        if keep {
            children.push(entry.into_path());
        }
    }
    children.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));
    Ok(children)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
