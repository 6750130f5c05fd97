use criterion::{black_box, criterion_group, criterion_main, Criterion};
use galley_core::{SplitMix64, Terrain};
use galley_plan::{evaluate_layout, PipelineConfig};

fn open_kitchen() -> Terrain {
    Terrain::parse(&[
        "XXOXXXX",
        "X1   2X",
        "D  X  S",
        "X     X",
        "XXXPXXX",
    ])
    .expect("valid layout")
}

fn bench_evaluate_layout(c: &mut Criterion) {
    let terrain = open_kitchen();
    let config = PipelineConfig::default();

    c.bench_function("galley-plan/evaluate_layout(open_kitchen)", |b| {
        b.iter(|| {
            let mut rng = SplitMix64::new(0xC0FFEE);
            let report =
                evaluate_layout(&terrain, &mut rng, &config).expect("evaluable layout");
            black_box(report.stage_scores);
        })
    });
}

criterion_group!(benches, bench_evaluate_layout);
criterion_main!(benches);
