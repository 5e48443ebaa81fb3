use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{SourceChannels, SourceFile};
use crate::error::{ChartError, ChartResult, ComposeWarning};

/// Opaque 8-bit RGB color, rendered as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    #[must_use]
    pub const fn from_hex(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(s: &str) -> ChartResult<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChartError::InvalidData(format!(
                "color `{s}` must be formatted as #RRGGBB"
            )));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|e| ChartError::InvalidData(format!("color `{s}`: {e}")))
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Fixed, ordered sequence of distinct colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> ChartResult<Self> {
        if colors.is_empty() {
            return Err(ChartError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        Ok(Self { colors })
    }

    /// Tableau 10 qualitative palette.
    #[must_use]
    pub fn tableau10() -> Self {
        Self {
            colors: [
                0x1F77B4, 0xFF7F0E, 0x2CA02C, 0xD62728, 0x9467BD, 0x8C564B, 0xE377C2, 0x7F7F7F,
                0xBCBD22, 0x17BECF,
            ]
            .into_iter()
            .map(Color::from_hex)
            .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::tableau10()
    }
}

/// Request-scoped cursor over a palette.
///
/// Colors are handed out left to right and never reused. Once the palette
/// runs dry, further channels get `None` and a single exhaustion warning is
/// recorded for the request.
#[derive(Debug)]
pub struct PaletteAllocator<'a> {
    palette: &'a Palette,
    consumed: usize,
    requested: usize,
    exhausted: bool,
}

impl<'a> PaletteAllocator<'a> {
    #[must_use]
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            consumed: 0,
            requested: 0,
            exhausted: false,
        }
    }

    /// Takes the next `count` colors, padding with `None` past the end.
    pub fn take(&mut self, count: usize) -> Vec<Option<Color>> {
        self.requested += count;
        let available = &self.palette.colors()[self.consumed..];
        let granted = count.min(available.len());
        self.consumed += granted;
        if granted < count {
            self.exhausted = true;
        }

        available[..granted]
            .iter()
            .copied()
            .map(Some)
            .chain(std::iter::repeat_n(None, count - granted))
            .collect()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.palette.len() - self.consumed
    }

    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Exhaustion warning covering every request made so far, if any.
    #[must_use]
    pub fn warning(&self) -> Option<ComposeWarning> {
        self.exhausted.then(|| ComposeWarning::PaletteExhausted {
            requested: self.requested,
            available: self.palette.len(),
        })
    }
}

/// Colors per source, each list in channel order. `None` marks a channel the
/// palette could not cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorAllocation {
    pub colors: IndexMap<SourceFile, Vec<Option<Color>>>,
    pub warning: Option<ComposeWarning>,
}

impl ColorAllocation {
    /// Number of channels left without a color.
    #[must_use]
    pub fn uncolored(&self) -> usize {
        self.colors.values().flatten().filter(|c| c.is_none()).count()
    }
}

/// Assigns each source a contiguous slice of `palette`, in source order.
#[must_use]
pub fn allocate_colors(palette: &Palette, sources: &[SourceChannels]) -> ColorAllocation {
    let mut allocator = PaletteAllocator::new(palette);
    let colors = sources
        .iter()
        .map(|source| (source.file.clone(), allocator.take(source.len())))
        .collect();

    let warning = allocator.warning();
    if let Some(warning) = &warning {
        debug!(%warning, "palette exhausted, later channels stay uncolored");
    }
    ColorAllocation { colors, warning }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn color_parses_with_and_without_hash() {
        assert_eq!("#1f77b4".parse::<Color>().expect("hex"), Color::rgb(0x1F, 0x77, 0xB4));
        assert_eq!("FF7F0E".parse::<Color>().expect("hex").to_string(), "#FF7F0E");
    }

    #[test]
    fn color_rejects_short_hex() {
        let err = "#fff".parse::<Color>().expect_err("short hex must fail");
        assert!(format!("{err}").contains("#RRGGBB"));
    }
}
