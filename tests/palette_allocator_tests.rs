use rrd_chart::ComposeWarning;
use rrd_chart::core::{
    Color, Palette, PaletteAllocator, SourceChannels, SourceFile, allocate_colors,
};

fn sources(counts: &[usize]) -> Vec<SourceChannels> {
    counts
        .iter()
        .enumerate()
        .map(|(idx, count)| {
            SourceChannels::new(
                SourceFile::new(format!("host/plugin/plugin-{idx}.rrd")),
                (0..*count).map(|ch| format!("ds{ch}")),
            )
        })
        .collect()
}

#[test]
fn files_receive_contiguous_palette_slices() {
    let palette = Palette::tableau10();
    let allocation = allocate_colors(&palette, &sources(&[1, 3, 2]));

    let slices: Vec<Vec<Color>> = allocation
        .colors
        .values()
        .map(|colors| colors.iter().map(|c| c.expect("colored")).collect())
        .collect();
    assert_eq!(slices[0], palette.colors()[0..1]);
    assert_eq!(slices[1], palette.colors()[1..4]);
    assert_eq!(slices[2], palette.colors()[4..6]);
    assert_eq!(allocation.warning, None);
    assert_eq!(allocation.uncolored(), 0);
}

#[test]
fn exhaustion_is_reported_once_and_leaves_overflow_uncolored() {
    let palette = Palette::tableau10();
    let allocation = allocate_colors(&palette, &sources(&[4, 4, 4, 3]));

    assert_eq!(allocation.uncolored(), 5);
    assert_eq!(
        allocation.warning,
        Some(ComposeWarning::PaletteExhausted {
            requested: 15,
            available: 10,
        })
    );

    let third: Vec<Option<Color>> = allocation.colors.values().nth(2).cloned().expect("third");
    assert_eq!(
        third,
        vec![Some(palette.colors()[8]), Some(palette.colors()[9]), None, None]
    );
}

#[test]
fn allocator_never_reuses_consumed_colors() {
    let palette = Palette::new(vec![Color::from_hex(0x112233), Color::from_hex(0x445566)])
        .expect("palette");
    let mut allocator = PaletteAllocator::new(&palette);

    assert_eq!(allocator.take(1), vec![Some(Color::rgb(0x11, 0x22, 0x33))]);
    assert_eq!(allocator.remaining(), 1);
    assert_eq!(allocator.warning(), None);

    assert_eq!(allocator.take(2), vec![Some(Color::rgb(0x44, 0x55, 0x66)), None]);
    assert_eq!(allocator.take(1), vec![None]);
    assert_eq!(allocator.consumed(), 2);
    assert_eq!(
        allocator.warning(),
        Some(ComposeWarning::PaletteExhausted {
            requested: 4,
            available: 2,
        })
    );
}

#[test]
fn allocators_do_not_share_state() {
    let palette = Palette::tableau10();
    let first = allocate_colors(&palette, &sources(&[10]));
    let second = allocate_colors(&palette, &sources(&[1]));

    assert_eq!(first.warning, None);
    assert_eq!(second.colors[0], vec![Some(palette.colors()[0])]);
}

#[test]
fn empty_palette_is_rejected() {
    let err = Palette::new(Vec::new()).expect_err("empty palette must fail");
    assert!(format!("{err}").contains("at least one color"));
}
