use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::trace;

use crate::core::natural_order::natural_sort;
use crate::core::{SourceChannels, SourceFile};
use crate::error::{ChartError, ChartResult};

/// Loosely structured archive metadata (`rrdtool info` style `key = value`
/// pairs) behind typed accessors.
///
/// This is the only place that interprets raw metadata keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelMetadata {
    entries: IndexMap<String, String>,
}

impl ChannelMetadata {
    #[must_use]
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Parses `rrdtool info` output. Lines without ` = ` are ignored.
    #[must_use]
    pub fn parse_info(text: &str) -> Self {
        Self::from_entries(text.lines().filter_map(|line| {
            let (key, value) = line.split_once(" = ")?;
            Some((key.trim(), value.trim().trim_matches('"')))
        }))
    }

    /// Metadata for the given channel names, one `ds[<name>].index` entry each.
    #[must_use]
    pub fn for_channels<S: AsRef<str>>(channels: &[S]) -> Self {
        Self::from_entries(
            channels
                .iter()
                .enumerate()
                .map(|(idx, name)| (format!("ds[{}].index", name.as_ref()), idx.to_string())),
        )
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct channel identifiers named by `ds[<id>].<field>` keys, in
    /// natural order.
    #[must_use]
    pub fn channel_ids(&self) -> Vec<String> {
        let unique: BTreeSet<&str> = self
            .entries
            .keys()
            .filter_map(|key| channel_id_of(key))
            .collect();
        let mut ids: Vec<String> = unique.into_iter().map(str::to_owned).collect();
        natural_sort(&mut ids);
        ids
    }

    /// Timestamp of the most recent sample, from the `last_update` entry.
    #[must_use]
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        let seconds = self.get("last_update")?.parse::<i64>().ok()?;
        DateTime::from_timestamp(seconds, 0)
    }
}

fn channel_id_of(key: &str) -> Option<&str> {
    let rest = key.strip_prefix("ds[")?;
    let (id, _) = rest.split_once("].")?;
    (!id.is_empty()).then_some(id)
}

/// Returns the ordered channel set of one source.
///
/// Fails with `SourceUnreadable` when the metadata names no channel.
pub fn inspect_channels(
    file: &SourceFile,
    metadata: &ChannelMetadata,
) -> ChartResult<SourceChannels> {
    let ids = metadata.channel_ids();
    if ids.is_empty() {
        return Err(ChartError::source_unreadable(
            file.path(),
            "no channel metadata found",
        ));
    }
    trace!(path = %file.path().display(), channels = ids.len(), "inspected channels");
    Ok(SourceChannels::new(file.clone(), ids))
}

#[cfg(test)]
mod tests {
    use super::channel_id_of;

    #[test]
    fn channel_key_requires_field_suffix() {
        assert_eq!(channel_id_of("ds[rx].type"), Some("rx"));
        assert_eq!(channel_id_of("ds[rx]"), None);
        assert_eq!(channel_id_of("ds[].type"), None);
        assert_eq!(channel_id_of("rra[0].cf"), None);
    }
}
