#![allow(dead_code)]

use tiatune::{
    compute, ClockProfile, Computation, KeyRange, RangeSelection, ScaleRequest, TuningConfig,
    TuningModel,
};

pub fn config_with_micro_tones(micro_tones: i32) -> TuningConfig {
    TuningConfig {
        micro_tones_per_semitone: micro_tones,
        ..TuningConfig::default()
    }
}

pub fn model_with_micro_tones(micro_tones: i32) -> TuningModel {
    TuningModel::new(config_with_micro_tones(micro_tones)).expect("valid tuning config")
}

pub fn compute_fixed(
    config: &TuningConfig,
    profile: ClockProfile,
    controls: &[u8],
    range: KeyRange,
) -> Computation {
    let request = ScaleRequest {
        profile,
        controls: controls.to_vec(),
        range: RangeSelection::Fixed(range),
    };
    compute(config, &request).expect("computation succeeds")
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {} of {}",
        actual,
        tolerance,
        expected
    );
}
