use chrono::DateTime;
use criterion::{Criterion, criterion_group, criterion_main};
use rrd_chart::api::{ComposerConfig, GraphComposer};
use rrd_chart::core::{
    LegendOptions, Palette, SourceChannels, SourceFile, TimeWindow, allocate_colors, name_legends,
};
use rrd_chart::render::NullGraphRenderer;
use rrd_chart::source::MemorySourceReader;
use std::hint::black_box;

fn interface_sources(count: usize) -> Vec<SourceChannels> {
    (0..count)
        .map(|i| {
            SourceChannels::new(
                SourceFile::new(format!("host/interface/if_octets-eth{i}.rrd")),
                ["rx", "tx"],
            )
        })
        .collect()
}

fn bench_name_legends_64_files(c: &mut Criterion) {
    let sources = interface_sources(64);

    c.bench_function("name_legends_64_files", |b| {
        b.iter(|| {
            let _ = name_legends(black_box(&sources), LegendOptions::default());
        })
    });
}

fn bench_allocate_colors_overflow(c: &mut Criterion) {
    let sources = interface_sources(64);
    let palette = Palette::tableau10();

    c.bench_function("allocate_colors_overflow", |b| {
        b.iter(|| {
            let _ = allocate_colors(black_box(&palette), black_box(&sources));
        })
    });
}

fn bench_plan_cpu_group(c: &mut Criterion) {
    let last_update = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
    let mut reader = MemorySourceReader::new();
    let mut files = Vec::new();
    for state in ["idle", "interrupt", "nice", "softirq", "steal", "system", "user", "wait"] {
        let path = format!("host/cpu-0/cpu-{state}.rrd");
        reader = reader.with_source(path.as_str(), &["value"], last_update);
        files.push(SourceFile::new(path));
    }
    let composer =
        GraphComposer::new(reader, NullGraphRenderer::default(), ComposerConfig::default())
            .expect("composer init");

    c.bench_function("plan_cpu_group", |b| {
        b.iter(|| {
            let _ = composer
                .plan(black_box(&files), "cpu-0 - by day", TimeWindow::open())
                .expect("plan should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_name_legends_64_files,
    bench_allocate_colors_overflow,
    bench_plan_cpu_group
);
criterion_main!(benches);
