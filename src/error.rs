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

//! Configuration errors
//!
//! Numeric edge cases inside the engine never produce errors; they yield
//! sentinels (`0.0`, `NaN`, `None`, empty collections). Only a configuration
//! that would make every downstream value meaningless is rejected here.

use thiserror::Error;

/// Result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Malformed tuning or range configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A4 reference frequency is zero, negative or not finite.
    #[error("invalid A4 frequency: {frequency} Hz (must be a finite value > 0)")]
    InvalidA4Frequency {
        /// The rejected frequency.
        frequency: f64,
    },

    /// Micro tone division count is zero, negative or above
    /// [`MAX_MICRO_TONES`](crate::tuning::MAX_MICRO_TONES).
    #[error(
        "invalid micro tones per semitone: {count} (must be between 1 and {max})",
        max = crate::tuning::MAX_MICRO_TONES
    )]
    InvalidMicroTones {
        /// The rejected division count.
        count: i32,
    },

    /// Tuning sensitivity is negative or not finite.
    #[error("invalid tuning sensitivity: {cents} cents (must be a finite value >= 0)")]
    InvalidSensitivity {
        /// The rejected threshold.
        cents: f64,
    },

    /// Key range with the first key above the last.
    #[error("invalid key range: first key {first} is above last key {last}")]
    InvalidKeyRange {
        /// First key number.
        first: i32,
        /// Last key number.
        last: i32,
    },

    /// Key number outside `-KEY_NUMBER_LIMIT..=KEY_NUMBER_LIMIT`.
    #[error(
        "key number {key} is out of range (limit is +/-{limit})",
        limit = crate::tuning::KEY_NUMBER_LIMIT
    )]
    KeyOutOfRange {
        /// The rejected key number.
        key: i32,
    },

    /// A flat key/value field that could not be parsed.
    #[error("invalid value for '{name}': {value:?}")]
    InvalidField {
        /// Field name.
        name: String,
        /// Raw value.
        value: String,
    },
}
