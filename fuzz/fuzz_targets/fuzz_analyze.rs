//! Fuzz target for the full analysis pipeline.
//!
//! Arbitrary clue grids and reveals, fed through validation, propagation,
//! estimation, and ranking with a tiny budget, must never panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vf_common::{AnalysisRequest, Mode, Position};
use vf_core::config::{AnalysisConfig, EstimatorConfig};

#[derive(Debug, Arbitrary)]
struct FuzzRequest {
    profit: bool,
    rows: [(u8, u8); 5],
    cols: [(u8, u8); 5],
    reveals: Vec<(u8, u8, u8)>,
}

fuzz_target!(|input: FuzzRequest| {
    let clue = |(sum, voltorbs): (u8, u8)| (sum as u32 % 20, voltorbs as u32 % 7);
    let mode = if input.profit { Mode::Profit } else { Mode::Level };
    let mut request = AnalysisRequest::from_clues(
        mode,
        input.rows.map(clue),
        input.cols.map(clue),
    );
    for &(row, col, value) in input.reveals.iter().take(25) {
        request = request.with_reveal(Position(row % 6, col % 6), value % 5);
    }

    let config = AnalysisConfig {
        estimator: EstimatorConfig {
            sample_budget: 64,
            wallclock_ms: 50,
            seed: Some(0),
            ..EstimatorConfig::default()
        },
        ..AnalysisConfig::default()
    };
    let _ = vf_core::analyze(&request, &config);
});
