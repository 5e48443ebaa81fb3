use std::collections::HashSet;

use proptest::prelude::*;
use rrd_chart::ComposeWarning;
use rrd_chart::core::{Palette, SourceChannels, SourceFile, allocate_colors};

proptest! {
    #[test]
    fn colors_are_distinct_and_overflow_is_exact(
        counts in proptest::collection::vec(1usize..6, 1..8),
    ) {
        let palette = Palette::tableau10();
        let sources: Vec<SourceChannels> = counts
            .iter()
            .enumerate()
            .map(|(idx, count)| {
                SourceChannels::new(
                    SourceFile::new(format!("h/p/p-{idx}.rrd")),
                    (0..*count).map(|ch| format!("ds{ch}")),
                )
            })
            .collect();

        let allocation = allocate_colors(&palette, &sources);
        let total: usize = counts.iter().sum();
        let assigned: Vec<_> = allocation.colors.values().flatten().flatten().collect();
        let distinct: HashSet<_> = assigned.iter().collect();

        prop_assert_eq!(distinct.len(), assigned.len());
        prop_assert_eq!(assigned.len(), total.min(palette.len()));
        prop_assert_eq!(allocation.uncolored(), total.saturating_sub(palette.len()));

        if total > palette.len() {
            prop_assert_eq!(
                allocation.warning,
                Some(ComposeWarning::PaletteExhausted { requested: total, available: palette.len() })
            );
        } else {
            prop_assert_eq!(allocation.warning, None);
        }
    }
}
