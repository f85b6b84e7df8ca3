use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tincture::{
    auto_fix_contrast, contrast_ratio, hex_to_oklch_triple, oklch_triple_to_hex,
    oklch_triple_to_hsl,
};

const PALETTE: [&str; 8] = [
    "#3b82f6", "#ef4444", "#22c55e", "#f59e0b", "#8b5cf6", "#ffffff", "#0a0a0a", "#64748b",
];

fn bench_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("tincture/conversions");

    group.bench_function("hex_to_oklch_triple", |b| {
        b.iter(|| {
            for hex in PALETTE {
                black_box(hex_to_oklch_triple(black_box(hex)));
            }
        });
    });

    let triples: Vec<String> = PALETTE.iter().map(|h| hex_to_oklch_triple(h)).collect();

    group.bench_function("oklch_triple_to_hex", |b| {
        b.iter(|| {
            for triple in &triples {
                black_box(oklch_triple_to_hex(black_box(triple)));
            }
        });
    });

    group.bench_function("oklch_triple_to_hsl", |b| {
        b.iter(|| {
            for triple in &triples {
                black_box(oklch_triple_to_hsl(black_box(triple)));
            }
        });
    });

    group.finish();
}

fn bench_contrast(c: &mut Criterion) {
    let mut group = c.benchmark_group("tincture/contrast");

    group.bench_function("contrast_ratio", |b| {
        b.iter(|| black_box(contrast_ratio(black_box("#3b82f6"), black_box("#ffffff"))));
    });

    group.bench_function("auto_fix_contrast", |b| {
        b.iter(|| black_box(auto_fix_contrast(black_box("#ffffff"), black_box("#cccccc"), false)));
    });

    group.finish();
}

criterion_group!(benches, bench_conversions, bench_contrast);
criterion_main!(benches);
