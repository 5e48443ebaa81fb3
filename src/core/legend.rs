use indexmap::IndexMap;
use tracing::debug;

use crate::core::{SourceChannels, SourceFile};

/// Naming conventions applied while deriving legend names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendOptions<'a> {
    /// Channel name that stands for "the value" of a source and gets no suffix.
    pub default_channel: &'a str,
    /// Separator between the group token and the rest of a file stem.
    pub delimiter: char,
}

impl Default for LegendOptions<'_> {
    fn default() -> Self {
        Self {
            default_channel: "value",
            delimiter: '-',
        }
    }
}

/// Display label for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    /// Channel-qualified name before prefix stripping and padding.
    pub raw: String,
    /// Final, padded name shown in the chart.
    pub name: String,
}

/// Legend entries per source, each list in channel order.
pub type LegendNames = IndexMap<SourceFile, Vec<LegendEntry>>;

/// Derives one aligned, de-duplicated legend name per channel.
///
/// The longest common leading substring of all names is removed, unless it
/// would consume a whole name, in which case every name is kept as is. All
/// names are then right-padded with spaces to the same character count.
/// A file listed more than once is named at its first position only.
#[must_use]
pub fn name_legends(sources: &[SourceChannels], options: LegendOptions<'_>) -> LegendNames {
    let mut names = LegendNames::with_capacity(sources.len());
    for source in sources {
        if names.contains_key(&source.file) {
            continue;
        }
        let base = source.file.base_label(options.delimiter);
        let entries = source
            .channels
            .iter()
            .map(|channel| {
                let raw = if channel == options.default_channel {
                    base.to_owned()
                } else {
                    format!("{base}_{channel}")
                };
                LegendEntry {
                    name: raw.clone(),
                    raw,
                }
            })
            .collect();
        names.insert(source.file.clone(), entries);
    }

    let prefix_chars = strippable_prefix_chars(names.values().flatten().map(|e| e.raw.as_str()));
    if prefix_chars > 0 {
        debug!(prefix_chars, "stripping shared legend prefix");
        for entry in names.values_mut().flatten() {
            entry.name = entry.raw.chars().skip(prefix_chars).collect();
        }
    }

    let width = names
        .values()
        .flatten()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0);
    for entry in names.values_mut().flatten() {
        entry.name = format!("{:<width$}", entry.name);
    }

    names
}

/// Length in chars of the common prefix, or zero when stripping it would
/// leave some name empty.
fn strippable_prefix_chars<'a>(mut names: impl Iterator<Item = &'a str>) -> usize {
    let Some(first) = names.next() else {
        return 0;
    };
    let mut prefix: Vec<char> = first.chars().collect();
    let mut shortest = prefix.len();

    for name in names {
        let common = prefix
            .iter()
            .zip(name.chars())
            .take_while(|(a, b)| **a == *b)
            .count();
        prefix.truncate(common);
        shortest = shortest.min(name.chars().count());
    }

    if prefix.len() < shortest {
        prefix.len()
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::strippable_prefix_chars;

    #[test]
    fn prefix_is_kept_when_it_covers_a_whole_name() {
        assert_eq!(strippable_prefix_chars(["load"].into_iter()), 0);
        assert_eq!(strippable_prefix_chars(["cpu", "cpu_idle"].into_iter()), 0);
    }

    #[test]
    fn prefix_is_counted_in_chars() {
        assert_eq!(strippable_prefix_chars(["température-a", "température-b"].into_iter()), 12);
        assert_eq!(strippable_prefix_chars(std::iter::empty()), 0);
    }
}
