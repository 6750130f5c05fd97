#![cfg(feature = "serde")]

use galley_core::{SplitMix64, Terrain};
use galley_plan::{evaluate_layout, LayoutReport, PipelineConfig};

fn open_layout() -> Terrain {
    Terrain::parse(&[
        "XXOXX",
        "X1 2X",
        "D   S",
        "XXPXX",
    ])
    .expect("valid layout")
}

#[test]
fn layout_report_roundtrips_via_serde() {
    let mut rng = SplitMix64::new(42);
    let report = evaluate_layout(&open_layout(), &mut rng, &PipelineConfig::default())
        .expect("evaluable layout");
    assert!(report.is_solvable());

    let json = serde_json::to_string(&report).expect("serialize report");
    let report2: LayoutReport = serde_json::from_str(&json).expect("deserialize report");

    assert_eq!(report.stage_scores, report2.stage_scores);
    assert_eq!(report.plans, report2.plans);
}
