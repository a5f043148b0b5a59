use std::io::Write;

use tiatune::{ClockProfile, RangeSelection, Settings};

#[test]
fn loads_settings_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "tuning:\n  a4_frequency: 442.0\n  cent_transpose: -20\nvideo_format: pal\ntones: [1, 12]\nfirst_key: 28\nlast_key: 64"
    )
    .unwrap();

    let settings = Settings::load(file.path()).unwrap();
    assert_eq!(settings.tuning.a4_frequency, 442.0);
    assert_eq!(settings.tuning.cent_transpose, -20);
    assert_eq!(settings.video_format, ClockProfile::Pal);
    assert_eq!(settings.tones, vec![1, 12]);

    let result = settings.compute().unwrap();
    assert_eq!(result.reference.len(), 37);
    assert_eq!(result.tones.len(), 64);
    assert_eq!(result.table.flattened_table().len(), 37);
}

#[test]
fn stretch_fit_from_settings() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "tones: [1]\nstretch_fit: true").unwrap();

    let settings = Settings::load(file.path()).unwrap();
    assert!(matches!(
        settings.request().unwrap().range,
        RangeSelection::StretchFit { .. }
    ));

    let result = settings.compute().unwrap();
    let bounds = result.tones.bounds().unwrap();
    assert_eq!(result.reference.range(), bounds.key_range().unwrap());
    assert!(result.table.unmatched().is_empty());
}

#[test]
fn reports_invalid_settings() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "tuning:\n  micro_tones_per_semitone: 0").unwrap();

    let err = Settings::load(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("micro"));
}

#[test]
fn reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("missing.yaml"));
}
