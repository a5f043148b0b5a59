// Copyright 2025 Tyler Neely (tylerneely@gmail.com).
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.
//
// See http://creativecommons.org/licenses/MIT/ for more information.

//! Tuning model: key numbers, micro ids and frequencies
//!
//! Frequencies are computed from the distance to the A4 reference key, counted
//! in `1/M` semitone steps (M micro tones per semitone) and shifted by a cent
//! transpose:
//!
//! ```text
//!   f = a4_frequency * 2^((100 * (M * (k - a4_key) + d) + transpose * M) / (1200 * M))
//! ```
//!
//! where `k` is the key number and `d` the micro distance from that key. The
//! micro id `k * M + d` names one pitch slot and is the join key between the
//! piano keyboard and the TIA tones.

pub mod keys;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Cents per octave
pub const CENTS_PER_OCTAVE: f64 = 1200.0;

/// Cents per equal tempered semitone
pub const CENTS_PER_SEMITONE: f64 = 100.0;

/// Largest key number magnitude accepted anywhere. Micro ids, MIDI numbers
/// and key distances of keys inside this limit all fit an `i32`.
pub const KEY_NUMBER_LIMIT: i32 = 1 << 16;

/// Largest number of micro tones per semitone.
pub const MAX_MICRO_TONES: i32 = 1 << 10;

/// True for key numbers inside `-KEY_NUMBER_LIMIT..=KEY_NUMBER_LIMIT`.
pub fn is_valid_key_number(key_number: i32) -> bool {
    (-KEY_NUMBER_LIMIT..=KEY_NUMBER_LIMIT).contains(&key_number)
}

/// Tuning parameters shared by every computation of one table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    /// Key number of the reference A4 (49 on an 88-key piano)
    pub a4_key_number: i32,

    /// Reference frequency of A4 in Hz
    pub a4_frequency: f64,

    /// Transpose in cents, applied to every frequency
    pub cent_transpose: i32,

    /// Micro tone divisions per semitone; 1 is plain 12-TET
    pub micro_tones_per_semitone: i32,

    /// Largest cent error still counted as "in tune"
    pub tuning_sensitivity_cents: f64,

    /// Decimal places used when rounding frequencies for display
    pub frequency_precision: u32,

    /// Decimal places used when rounding cents for display
    pub cent_precision: u32,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            a4_key_number: 49,
            a4_frequency: 440.0,
            cent_transpose: 0,
            micro_tones_per_semitone: 1,
            tuning_sensitivity_cents: 50.0,
            frequency_precision: 2,
            cent_precision: 2,
        }
    }
}

impl TuningConfig {
    /// Field names used by the flat key/value form.
    pub const FIELDS: [&'static str; 7] = [
        "a4_key_number",
        "a4_frequency",
        "cent_transpose",
        "micro_tones_per_semitone",
        "tuning_sensitivity_cents",
        "frequency_precision",
        "cent_precision",
    ];

    /// Reject configurations that no computation can be built on.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.a4_frequency.is_finite() || self.a4_frequency <= 0.0 {
            return Err(ConfigError::InvalidA4Frequency {
                frequency: self.a4_frequency,
            });
        }
        if !is_valid_key_number(self.a4_key_number) {
            return Err(ConfigError::KeyOutOfRange {
                key: self.a4_key_number,
            });
        }
        if !(1..=MAX_MICRO_TONES).contains(&self.micro_tones_per_semitone) {
            return Err(ConfigError::InvalidMicroTones {
                count: self.micro_tones_per_semitone,
            });
        }
        if !self.tuning_sensitivity_cents.is_finite() || self.tuning_sensitivity_cents < 0.0 {
            return Err(ConfigError::InvalidSensitivity {
                cents: self.tuning_sensitivity_cents,
            });
        }
        Ok(())
    }

    /// Flatten into name/value pairs for a key/value store.
    pub fn to_key_values(&self) -> Vec<(&'static str, String)> {
        vec![
            (Self::FIELDS[0], self.a4_key_number.to_string()),
            (Self::FIELDS[1], self.a4_frequency.to_string()),
            (Self::FIELDS[2], self.cent_transpose.to_string()),
            (Self::FIELDS[3], self.micro_tones_per_semitone.to_string()),
            (Self::FIELDS[4], self.tuning_sensitivity_cents.to_string()),
            (Self::FIELDS[5], self.frequency_precision.to_string()),
            (Self::FIELDS[6], self.cent_precision.to_string()),
        ]
    }

    /// Rebuild from name/value pairs. Missing fields keep their defaults and
    /// unknown names are ignored; the result is validated.
    pub fn from_key_values<I, K, V>(pairs: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();

        for (name, value) in pairs {
            let (name, value) = (name.as_ref(), value.as_ref().trim());
            match name {
                "a4_key_number" => config.a4_key_number = parse_field(name, value)?,
                "a4_frequency" => config.a4_frequency = parse_field(name, value)?,
                "cent_transpose" => config.cent_transpose = parse_field(name, value)?,
                "micro_tones_per_semitone" => {
                    config.micro_tones_per_semitone = parse_field(name, value)?
                }
                "tuning_sensitivity_cents" => {
                    config.tuning_sensitivity_cents = parse_field(name, value)?
                }
                "frequency_precision" => config.frequency_precision = parse_field(name, value)?,
                "cent_precision" => config.cent_precision = parse_field(name, value)?,
                _ => log::debug!("ignoring unknown tuning field '{}'", name),
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_field<T: std::str::FromStr>(name: &str, value: &str) -> ConfigResult<T> {
    value.parse().map_err(|_| ConfigError::InvalidField {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Shift a frequency by a number of cents.
pub fn transpose(frequency: f64, cents: f64) -> f64 {
    frequency * 2.0_f64.powf(cents / CENTS_PER_OCTAVE)
}

/// Signed cents from `from` to `to`; positive when `to` is sharp.
///
/// Returns NaN when `from` is zero.
pub fn cents_between(from: f64, to: f64) -> f64 {
    if from == 0.0 {
        return f64::NAN;
    }
    (to / from).log2() * CENTS_PER_OCTAVE
}

/// Round to a number of decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10.0_f64.powi(precision as i32);
    (value * scale).round() / scale
}

/// Converts between key numbers, micro ids and frequencies for one validated
/// [`TuningConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TuningModel {
    config: TuningConfig,
}

impl TuningModel {
    /// Validate the configuration and wrap it.
    pub fn new(config: TuningConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &TuningConfig {
        &self.config
    }

    /// Micro tone divisions per semitone (M).
    #[inline]
    pub fn micro_tones(&self) -> i32 {
        self.config.micro_tones_per_semitone
    }

    /// Centered window of micro distances for one key: `start..=end`.
    ///
    /// M = 1 gives `0..=0`, M = 2 gives `0..=1`, M = 3 gives `-1..=1`.
    pub fn micro_window(&self) -> (i32, i32) {
        let m = self.micro_tones();
        let start = -((m - 1) / 2);
        let end = m / 2;
        (start, end)
    }

    /// Micro id of a key and micro distance. Keys inside
    /// [`KEY_NUMBER_LIMIT`] and distances inside the micro window never
    /// overflow.
    #[inline]
    pub fn micro_id(&self, key_number: i32, micro_distance: i32) -> i32 {
        key_number * self.micro_tones() + micro_distance
    }

    /// Split a micro id back into the key number and micro distance that
    /// place the distance inside [`micro_window`](Self::micro_window).
    pub fn split_micro_id(&self, micro_id: i32) -> (i32, i32) {
        let (start, _) = self.micro_window();
        let m = self.micro_tones() as i64;
        let key_number = (micro_id as i64 - start as i64).div_euclid(m);
        (key_number as i32, (micro_id as i64 - key_number * m) as i32)
    }

    /// A4 reference frequency with the cent transpose applied.
    pub fn transposed_a4(&self) -> f64 {
        transpose(self.config.a4_frequency, self.config.cent_transpose as f64)
    }

    /// Frequency of a whole key.
    pub fn key_number_to_frequency(&self, key_number: i32) -> f64 {
        let key_distance = key_number as f64 - self.config.a4_key_number as f64;
        let exp = (key_distance * CENTS_PER_SEMITONE + self.config.cent_transpose as f64)
            / CENTS_PER_OCTAVE;
        2.0_f64.powf(exp) * self.config.a4_frequency
    }

    /// Frequency of a micro tone `micro_distance` steps of `1/M` semitone
    /// away from `key_number`.
    pub fn micro_frequency(&self, key_number: i32, micro_distance: i32) -> f64 {
        let m = self.micro_tones() as f64;
        let micro_distance =
            m * (key_number as f64 - self.config.a4_key_number as f64) + micro_distance as f64;
        let exp = (micro_distance * CENTS_PER_SEMITONE + self.config.cent_transpose as f64 * m)
            / (CENTS_PER_OCTAVE * m);
        2.0_f64.powf(exp) * self.config.a4_frequency
    }

    /// Frequency of a MIDI note number (MIDI 69 sits on the A4 key).
    pub fn midi_frequency(&self, midi_number: i32) -> f64 {
        let key_distance = midi_number as f64 - keys::MIDI_A4 as f64;
        2.0_f64.powf(
            (key_distance * CENTS_PER_SEMITONE + self.config.cent_transpose as f64)
                / CENTS_PER_OCTAVE,
        ) * self.config.a4_frequency
    }

    /// Nearest micro id to a frequency, `None` when there is none (f <= 0)
    /// or when its key lies beyond [`KEY_NUMBER_LIMIT`].
    pub fn frequency_to_micro_id(&self, frequency: f64) -> Option<i32> {
        let m = self.micro_tones() as f64;
        let distance = 12.0 * m * (frequency / self.transposed_a4()).log2();
        let limit = (KEY_NUMBER_LIMIT + 1) * self.micro_tones();
        let micro_id = round_within(distance + (self.config.a4_key_number as f64) * m, limit)?;

        let (key_number, _) = self.split_micro_id(micro_id);
        is_valid_key_number(key_number).then_some(micro_id)
    }

    /// Nearest whole key to a frequency, `None` for f <= 0 or a key beyond
    /// [`KEY_NUMBER_LIMIT`].
    pub fn frequency_to_key_number(&self, frequency: f64) -> Option<i32> {
        let distance = 12.0 * (frequency / self.transposed_a4()).log2();
        round_within(distance + self.config.a4_key_number as f64, KEY_NUMBER_LIMIT)
    }

    /// MIDI number of the nearest whole key.
    pub fn frequency_to_midi_number(&self, frequency: f64) -> Option<i32> {
        self.frequency_to_key_number(frequency)
            .map(keys::key_number_to_midi)
    }

    /// Micro id minus the whole key it rounds to, in `1/M` semitone steps.
    pub fn frequency_to_micro_distance(&self, frequency: f64) -> Option<i32> {
        let micro_id = self.frequency_to_micro_id(frequency)?;
        let key_number = self.frequency_to_key_number(frequency)?;
        Some(micro_id - key_number * self.micro_tones())
    }

    /// Same as [`cents_between`].
    pub fn cents_between(&self, from: f64, to: f64) -> f64 {
        cents_between(from, to)
    }

    /// Frequency rounded with the configured display precision.
    pub fn round_frequency(&self, frequency: f64) -> f64 {
        round_to(frequency, self.config.frequency_precision)
    }

    /// Cents rounded with the configured display precision.
    pub fn round_cents(&self, cents: f64) -> f64 {
        round_to(cents, self.config.cent_precision)
    }
}

impl Default for TuningModel {
    fn default() -> Self {
        Self {
            config: TuningConfig::default(),
        }
    }
}

/// Round half away from zero, keeping only finite results within `limit`.
fn round_within(value: f64, limit: i32) -> Option<i32> {
    let rounded = value.round();
    (rounded.is_finite() && rounded.abs() <= limit as f64).then_some(rounded as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with(micro_tones: i32) -> TuningModel {
        TuningModel::new(TuningConfig {
            micro_tones_per_semitone: micro_tones,
            ..TuningConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_a4_and_middle_c() {
        let model = TuningModel::default();
        assert_eq!(model.key_number_to_frequency(49), 440.0);
        assert!((model.key_number_to_frequency(40) - 261.63).abs() < 0.01);
        assert!((model.key_number_to_frequency(61) - 880.0).abs() < 1e-9);
    }

    #[test]
    fn test_micro_frequency_matches_whole_keys() {
        let model = model_with(3);
        for key in [1, 40, 49, 88] {
            let whole = model.key_number_to_frequency(key);
            let micro = model.micro_frequency(key, 0);
            assert!((whole - micro).abs() < 1e-9, "key {}: {} vs {}", key, whole, micro);
        }
    }

    #[test]
    fn test_transpose_shifts_everything() {
        let model = TuningModel::new(TuningConfig {
            cent_transpose: 100,
            ..TuningConfig::default()
        })
        .unwrap();

        // one semitone up: key 48 now sounds at 440 Hz
        assert!((model.key_number_to_frequency(48) - 440.0).abs() < 1e-9);
        assert_eq!(model.frequency_to_key_number(440.0), Some(48));
        assert!((model.midi_frequency(68) - 440.0).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_to_numbers() {
        let model = TuningModel::default();
        assert_eq!(model.frequency_to_key_number(440.0), Some(49));
        assert_eq!(model.frequency_to_midi_number(440.0), Some(69));
        assert_eq!(model.frequency_to_micro_id(261.63), Some(40));
        assert_eq!(model.frequency_to_micro_distance(440.0), Some(0));
    }

    #[test]
    fn test_micro_distance_of_quarter_tone() {
        let model = model_with(2);
        let f = model.micro_frequency(49, 1);
        assert_eq!(model.frequency_to_micro_id(f), Some(99));
        // the quarter tone rounds to key 49 or 50; micro distance makes up the rest
        let key = model.frequency_to_key_number(f).unwrap();
        assert_eq!(model.frequency_to_micro_distance(f), Some(99 - key * 2));
    }

    #[test]
    fn test_degenerate_frequencies() {
        let model = TuningModel::default();
        assert_eq!(model.frequency_to_micro_id(0.0), None);
        assert_eq!(model.frequency_to_micro_id(-5.0), None);
        assert_eq!(model.frequency_to_key_number(f64::NAN), None);
        assert_eq!(model.frequency_to_midi_number(0.0), None);
    }

    #[test]
    fn test_cents_between() {
        assert_eq!(cents_between(440.0, 440.0), 0.0);
        assert!((cents_between(440.0, 880.0) - 1200.0).abs() < 1e-9);
        assert!((cents_between(880.0, 440.0) + 1200.0).abs() < 1e-9);
        assert!(cents_between(0.0, 440.0).is_nan());
    }

    #[test]
    fn test_micro_window() {
        assert_eq!(model_with(1).micro_window(), (0, 0));
        assert_eq!(model_with(2).micro_window(), (0, 1));
        assert_eq!(model_with(3).micro_window(), (-1, 1));
        assert_eq!(model_with(4).micro_window(), (-1, 2));
        assert_eq!(model_with(5).micro_window(), (-2, 2));
    }

    #[test]
    fn test_split_micro_id() {
        let model = model_with(3);
        assert_eq!(model.split_micro_id(119), (40, -1));
        assert_eq!(model.split_micro_id(120), (40, 0));
        assert_eq!(model.split_micro_id(121), (40, 1));
        assert_eq!(model.split_micro_id(122), (41, -1));
        assert_eq!(model.split_micro_id(-4), (-1, -1));

        let model = model_with(2);
        assert_eq!(model.split_micro_id(81), (40, 1));
    }

    #[test]
    fn test_validation() {
        let bad_freq = TuningConfig {
            a4_frequency: 0.0,
            ..TuningConfig::default()
        };
        assert_eq!(
            TuningModel::new(bad_freq),
            Err(ConfigError::InvalidA4Frequency { frequency: 0.0 })
        );

        let bad_micro = TuningConfig {
            micro_tones_per_semitone: 0,
            ..TuningConfig::default()
        };
        assert_eq!(
            TuningModel::new(bad_micro),
            Err(ConfigError::InvalidMicroTones { count: 0 })
        );

        let bad_sensitivity = TuningConfig {
            tuning_sensitivity_cents: -1.0,
            ..TuningConfig::default()
        };
        assert!(TuningModel::new(bad_sensitivity).is_err());
    }

    #[test]
    fn test_limits() {
        let too_many = TuningConfig {
            micro_tones_per_semitone: MAX_MICRO_TONES + 1,
            ..TuningConfig::default()
        };
        assert_eq!(
            TuningModel::new(too_many),
            Err(ConfigError::InvalidMicroTones {
                count: MAX_MICRO_TONES + 1
            })
        );

        let far_a4 = TuningConfig {
            a4_key_number: i32::MAX,
            ..TuningConfig::default()
        };
        assert_eq!(
            TuningModel::new(far_a4),
            Err(ConfigError::KeyOutOfRange { key: i32::MAX })
        );

        // the widest accepted tuning stays inside i32 at the key limit
        let model = model_with(MAX_MICRO_TONES);
        let (start, end) = model.micro_window();
        let top = model.micro_id(KEY_NUMBER_LIMIT, end);
        assert_eq!(model.split_micro_id(top), (KEY_NUMBER_LIMIT, end));
        let bottom = model.micro_id(-KEY_NUMBER_LIMIT, start);
        assert_eq!(model.split_micro_id(bottom), (-KEY_NUMBER_LIMIT, start));
    }

    #[test]
    fn test_far_frequencies_have_no_micro_id() {
        let model = TuningModel::new(TuningConfig {
            a4_key_number: KEY_NUMBER_LIMIT,
            a4_frequency: 1e-300,
            micro_tones_per_semitone: 3,
            ..TuningConfig::default()
        })
        .unwrap();

        assert_eq!(model.frequency_to_micro_id(1.0), None);
        assert_eq!(model.frequency_to_key_number(1.0), None);
        assert_eq!(model.frequency_to_micro_distance(1e300), None);
        assert_eq!(model.split_micro_id(i32::MAX).0, i32::MAX / 3);
        assert!(model.key_number_to_frequency(-KEY_NUMBER_LIMIT) >= 0.0);
    }

    #[test]
    fn test_key_values_round_trip() {
        let config = TuningConfig {
            a4_frequency: 432.5,
            cent_transpose: -35,
            micro_tones_per_semitone: 4,
            ..TuningConfig::default()
        };

        let pairs = config.to_key_values();
        assert_eq!(pairs.len(), TuningConfig::FIELDS.len());
        assert_eq!(TuningConfig::from_key_values(pairs), Ok(config));
    }

    #[test]
    fn test_key_values_errors() {
        let err = TuningConfig::from_key_values([("a4_frequency", "abc")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { .. }));

        let err = TuningConfig::from_key_values([("micro_tones_per_semitone", "0")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidMicroTones { count: 0 });

        // unknown names are skipped
        let config = TuningConfig::from_key_values([("volume", "64")]).unwrap();
        assert_eq!(config, TuningConfig::default());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(261.625565, 2), 261.63);
        assert_eq!(round_to(-3.14159, 1), -3.1);
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
