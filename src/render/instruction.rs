use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Color, GraphSize};

/// Output image encoding requested from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    #[must_use]
    pub const fn rrdtool_name(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Svg => "SVG",
        }
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// Consolidation applied when extracting or printing a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Consolidation {
    Average,
    Last,
    Minimum,
    Maximum,
}

impl Consolidation {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Average => "AVERAGE",
            Self::Last => "LAST",
            Self::Minimum => "MIN",
            Self::Maximum => "MAX",
        }
    }
}

/// Horizontal alignment for legend and comment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Right,
}

impl TextAlign {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Right => "right",
        }
    }
}

/// One directive for the external graph renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenderInstruction {
    Start(DateTime<Utc>),
    End(DateTime<Utc>),
    ImageFormat(ImageFormat),
    Title(String),
    Size(GraphSize),
    Watermark(String),
    AltAutoscale,
    SlopeMode,
    /// Binds `id` to a channel of an archive.
    Define {
        id: String,
        path: PathBuf,
        channel: String,
        consolidation: Consolidation,
    },
    Line {
        id: String,
        width: u8,
        color: Option<Color>,
        legend: String,
    },
    /// Prints one consolidated value of `id` using a printf-style format.
    ValuePrint {
        id: String,
        consolidation: Consolidation,
        format: String,
        line_break: bool,
    },
    TextAlign(TextAlign),
    Comment(String),
}

impl RenderInstruction {
    /// Whether this directive is a command line option rather than a graph
    /// element.
    #[must_use]
    pub fn is_option(&self) -> bool {
        matches!(
            self,
            Self::Start(_)
                | Self::End(_)
                | Self::ImageFormat(_)
                | Self::Title(_)
                | Self::Size(_)
                | Self::Watermark(_)
                | Self::AltAutoscale
                | Self::SlopeMode
        )
    }

    /// Appends the argument tokens for this directive.
    pub fn push_args(&self, out: &mut Vec<String>) {
        match self {
            Self::Start(at) => out.extend(["--start".to_owned(), at.timestamp().to_string()]),
            Self::End(at) => out.extend(["--end".to_owned(), at.timestamp().to_string()]),
            Self::ImageFormat(format) => {
                out.extend(["--imgformat".to_owned(), format.rrdtool_name().to_owned()]);
            }
            Self::Title(title) => out.extend(["--title".to_owned(), title.clone()]),
            Self::Size(size) => out.extend([
                "--width".to_owned(),
                size.width.to_string(),
                "--height".to_owned(),
                size.height.to_string(),
            ]),
            Self::Watermark(text) => out.extend(["--watermark".to_owned(), text.clone()]),
            Self::AltAutoscale => out.push("--alt-autoscale".to_owned()),
            Self::SlopeMode => out.push("--slope-mode".to_owned()),
            Self::Define {
                id,
                path,
                channel,
                consolidation,
            } => out.push(format!(
                "DEF:{id}={}:{channel}:{}",
                escape_colons(&path.to_string_lossy()),
                consolidation.keyword()
            )),
            Self::Line {
                id,
                width,
                color,
                legend,
            } => {
                let color = color.map(|c| c.to_string()).unwrap_or_default();
                out.push(format!("LINE{width}:{id}{color}:{}", escape_colons(legend)));
            }
            Self::ValuePrint {
                id,
                consolidation,
                format,
                line_break,
            } => {
                let newline = if *line_break { "\\n" } else { "" };
                out.push(format!("GPRINT:{id}:{}:{format}{newline}", consolidation.keyword()));
            }
            Self::TextAlign(align) => out.push(format!("TEXTALIGN:{}", align.keyword())),
            Self::Comment(text) => out.push(format!("COMMENT:{}", escape_colons(text))),
        }
    }
}

/// Escapes `:` so it is not read as a field separator.
#[must_use]
pub fn escape_colons(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&':') => {
                escaped.push_str("\\:");
                chars.next();
            }
            ':' => escaped.push_str("\\:"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Ordered directives for one chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstructionSet {
    instructions: Vec<RenderInstruction>,
}

impl InstructionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: RenderInstruction) {
        self.instructions.push(instruction);
    }

    #[must_use]
    pub fn instructions(&self) -> &[RenderInstruction] {
        &self.instructions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderInstruction> {
        self.instructions.iter()
    }

    /// Identifiers bound by `Define` directives, in order.
    #[must_use]
    pub fn extraction_ids(&self) -> Vec<&str> {
        self.instructions
            .iter()
            .filter_map(|instruction| match instruction {
                RenderInstruction::Define { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Renderer argument vector: options first, then graph elements, each
    /// group keeping instruction order.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.instructions.len() * 2);
        for instruction in self.instructions.iter().filter(|i| i.is_option()) {
            instruction.push_args(&mut args);
        }
        for instruction in self.instructions.iter().filter(|i| !i.is_option()) {
            instruction.push_args(&mut args);
        }
        args
    }
}

impl<'a> IntoIterator for &'a InstructionSet {
    type Item = &'a RenderInstruction;
    type IntoIter = std::slice::Iter<'a, RenderInstruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::escape_colons;

    #[test]
    fn colons_are_escaped_once() {
        assert_eq!(escape_colons("C:/rrd/a.rrd"), "C\\:/rrd/a.rrd");
        assert_eq!(escape_colons("already\\: escaped"), "already\\: escaped");
        assert_eq!(escape_colons("plain"), "plain");
    }
}
