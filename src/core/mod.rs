pub mod channel;
pub mod freshness;
pub mod legend;
pub mod natural_order;
pub mod palette;
pub mod types;

pub use channel::{ChannelMetadata, inspect_channels};
pub use freshness::{Freshness, resolve_freshness};
pub use legend::{LegendEntry, LegendNames, LegendOptions, name_legends};
pub use natural_order::{natural_cmp, natural_sort};
pub use palette::{Color, ColorAllocation, Palette, PaletteAllocator, allocate_colors};
pub use types::{GraphSize, SourceChannels, SourceFile, TimeWindow};
