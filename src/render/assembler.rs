use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{ColorAllocation, GraphSize, LegendNames, SourceChannels, TimeWindow};
use crate::render::{Consolidation, ImageFormat, InstructionSet, RenderInstruction, TextAlign};

/// Presentation settings shared by every chart of a composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStyle<'a> {
    pub size: GraphSize,
    pub image_format: ImageFormat,
    pub watermark: &'a str,
    pub value_format: &'a str,
    pub line_width: u8,
}

/// Everything needed to describe one chart.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyInput<'a> {
    pub sources: &'a [SourceChannels],
    pub legends: &'a LegendNames,
    pub colors: &'a ColorAllocation,
    pub time_window: TimeWindow,
    pub title: &'a str,
    pub as_of: DateTime<Utc>,
}

const VALUE_PRINTS: [Consolidation; 4] = [
    Consolidation::Last,
    Consolidation::Minimum,
    Consolidation::Average,
    Consolidation::Maximum,
];

/// Builds the ordered directive list for one chart.
#[derive(Debug, Clone, Copy)]
pub struct InstructionAssembler<'a> {
    style: GraphStyle<'a>,
}

impl<'a> InstructionAssembler<'a> {
    #[must_use]
    pub fn new(style: GraphStyle<'a>) -> Self {
        Self { style }
    }

    /// Emits time bounds, one extraction/draw/print group per channel in
    /// source order, then the global directives.
    ///
    /// Channels missing from `legends` or `colors` get an empty legend and no
    /// color rather than being dropped.
    #[must_use]
    pub fn assemble(&self, input: &AssemblyInput<'_>) -> InstructionSet {
        let mut set = InstructionSet::new();

        if let Some(start) = input.time_window.start {
            set.push(RenderInstruction::Start(start));
        }
        if let Some(end) = input.time_window.end {
            set.push(RenderInstruction::End(end));
        }

        let mut ids = HashSet::new();
        for source in input.sources {
            let legends = input.legends.get(&source.file);
            let colors = input.colors.colors.get(&source.file);

            for (idx, channel) in source.channels.iter().enumerate() {
                let id = unique_id(&mut ids, source.file.stem(), channel);
                let legend = legends
                    .and_then(|entries| entries.get(idx))
                    .map(|entry| entry.name.clone())
                    .unwrap_or_default();
                let color = colors.and_then(|colors| colors.get(idx).copied().flatten());

                set.push(RenderInstruction::Define {
                    id: id.clone(),
                    path: source.file.path().to_path_buf(),
                    channel: channel.clone(),
                    consolidation: Consolidation::Average,
                });
                set.push(RenderInstruction::Line {
                    id: id.clone(),
                    width: self.style.line_width,
                    color,
                    legend,
                });
                for (pos, consolidation) in VALUE_PRINTS.into_iter().enumerate() {
                    set.push(RenderInstruction::ValuePrint {
                        id: id.clone(),
                        consolidation,
                        format: self.style.value_format.to_owned(),
                        line_break: pos == VALUE_PRINTS.len() - 1,
                    });
                }
            }
        }

        set.push(RenderInstruction::ImageFormat(self.style.image_format));
        set.push(RenderInstruction::Title(input.title.to_owned()));
        set.push(RenderInstruction::Size(self.style.size));
        set.push(RenderInstruction::Watermark(self.style.watermark.to_owned()));
        set.push(RenderInstruction::AltAutoscale);
        set.push(RenderInstruction::SlopeMode);
        set.push(RenderInstruction::TextAlign(TextAlign::Right));
        set.push(RenderInstruction::Comment(format!(
            "Last update: {}",
            input.as_of.format("%Y-%m-%d %H:%M:%S")
        )));

        debug!(
            title = input.title,
            channels = ids.len(),
            instructions = set.len(),
            "assembled instruction set"
        );
        set
    }
}

/// `<stem>__<channel>` restricted to renderer-safe characters, suffixed
/// with a counter if already taken.
fn unique_id(taken: &mut HashSet<String>, stem: &str, channel: &str) -> String {
    let base = format!("{}__{}", sanitize(stem), sanitize(channel));
    let mut candidate = base.clone();
    let mut counter = 1;
    while !taken.insert(candidate.clone()) {
        counter += 1;
        candidate = format!("{base}_{counter}");
    }
    candidate
}

fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::unique_id;

    #[test]
    fn ids_are_sanitized_and_deduplicated() {
        let mut taken = HashSet::new();
        assert_eq!(unique_id(&mut taken, "df-var.log", "used"), "df-var_log__used");
        assert_eq!(unique_id(&mut taken, "df-var_log", "used"), "df-var_log__used_2");
        assert_eq!(unique_id(&mut taken, "df-var:log", "used"), "df-var_log__used_3");
    }
}
