use tiatune::tia::{self, ClockProfile};
use tiatune::tuning::cents_between;
use tiatune::{KeyRange, TuningConfig};

mod common;
use common::{compute_fixed, config_with_micro_tones};

#[test]
fn one_row_per_reference_note_in_micro_id_order() {
    for m in [1, 2, 3, 5] {
        let result = compute_fixed(
            &config_with_micro_tones(m),
            ClockProfile::Ntsc,
            &tia::PITCHED_CONTROLS,
            KeyRange::PIANO,
        );
        let rows = result.table.flattened_table();

        assert_eq!(rows.len(), result.reference.len());
        assert_eq!(rows.len(), 88 * m as usize);
        for pair in rows.windows(2) {
            assert!(pair[0].pivot.micro_id < pair[1].pivot.micro_id);
        }
        for (row, note) in rows.iter().zip(result.reference.iter()) {
            assert_eq!(&row.pivot, note);
        }
    }
}

#[test]
fn every_tone_is_matched_or_unmatched_once() {
    let result = compute_fixed(
        &TuningConfig::default(),
        ClockProfile::Pal,
        &[0, 1, 4, 11, 12, 16],
        KeyRange::PIANO,
    );

    assert_eq!(
        result.table.matched().len() + result.table.unmatched().len(),
        result.tones.len()
    );

    let grouped: usize = result.table.groups().iter().map(|g| g.len()).sum();
    assert_eq!(grouped, result.table.matched().len());
    assert!(result
        .table
        .unmatched()
        .iter()
        .any(|t| t.params.control == 0));
    assert!(result.table.matched().iter().all(|t| !t.is_silent()));
}

#[test]
fn candidates_share_the_micro_id_of_their_group() {
    let config = config_with_micro_tones(3);
    let result = compute_fixed(&config, ClockProfile::Ntsc, &[1, 12], KeyRange::PIANO);
    let model = result.table.model();

    for group in result.table.groups() {
        for pair in group.pairs() {
            assert_eq!(
                model.frequency_to_micro_id(pair.candidate.frequency),
                Some(group.pivot().micro_id)
            );
            assert_eq!(
                pair.cents,
                cents_between(group.pivot().frequency, pair.candidate.frequency)
            );
        }
    }
}

#[test]
fn best_match_is_closest_in_frequency() {
    let result = compute_fixed(
        &config_with_micro_tones(2),
        ClockProfile::Ntsc,
        &tia::PITCHED_CONTROLS,
        KeyRange::PIANO,
    );

    for group in result.table.groups() {
        let Some(best) = group.best() else { continue };
        for pair in group.pairs() {
            assert!(best.frequency_distance() <= pair.frequency_distance());
            if best.frequency_distance() == pair.frequency_distance() {
                assert!(best.cents.abs() <= pair.cents.abs());
            }
        }
    }
}

#[test]
fn identical_inputs_give_identical_tables() {
    let config = TuningConfig {
        a4_frequency: 432.0,
        cent_transpose: -17,
        micro_tones_per_semitone: 4,
        ..TuningConfig::default()
    };
    let controls = [12, 1, 4, 6, 14];

    let first = compute_fixed(&config, ClockProfile::Pal, &controls, KeyRange::PIANO);
    let second = compute_fixed(&config, ClockProfile::Pal, &controls, KeyRange::PIANO);

    assert_eq!(first.reference, second.reference);
    assert_eq!(first.tones, second.tones);
    assert_eq!(
        first.table.flattened_table(),
        second.table.flattened_table()
    );
}

#[test]
fn three_micro_tones_around_middle_c() {
    let result = compute_fixed(
        &config_with_micro_tones(3),
        ClockProfile::Ntsc,
        &[1],
        KeyRange::new(40, 40).unwrap(),
    );
    let rows = result.table.flattened_table();

    let ids: Vec<i32> = rows.iter().map(|r| r.pivot.micro_id).collect();
    assert_eq!(ids, vec![119, 120, 121]);
    assert!(rows.iter().all(|r| r.pivot.label().starts_with("C4.")));

    let bounds = result.table.pivot_bounds().unwrap();
    assert_eq!((bounds.first_micro_id, bounds.last_micro_id), (119, 121));
    assert_eq!((bounds.first_key_number, bounds.last_key_number), (40, 40));
}

#[test]
fn tolerance_follows_sensitivity() {
    let strict = TuningConfig {
        tuning_sensitivity_cents: 5.0,
        ..TuningConfig::default()
    };
    let result = compute_fixed(&strict, ClockProfile::Ntsc, &[1, 4, 12], KeyRange::PIANO);

    for row in result.table.flattened_table() {
        match row.cents {
            Some(cents) => assert_eq!(row.within_tolerance, cents.abs() <= 5.0),
            None => {
                assert!(!row.within_tolerance);
                assert!(row.best.is_none());
                assert_eq!(row.candidate_count, 0);
            }
        }
    }
}

#[test]
fn table_serializes_to_json() {
    let result = compute_fixed(
        &TuningConfig::default(),
        ClockProfile::Ntsc,
        &[4],
        KeyRange::new(40, 60).unwrap(),
    );

    let json = serde_json::to_value(result.table.flattened_table()).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 21);
    assert_eq!(rows[0]["pivot"]["letter"], "C");
    assert_eq!(rows[0]["pivot"]["key_number"], 40);
}
