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

//! Tuning tables for Atari 2600 (TIA) tones against a microtonal piano.
//!
//! The crate enumerates the notes of an equal-tempered keyboard with optional
//! micro-tone subdivisions, enumerates every tone the TIA audio circuit can
//! produce for a set of AUDC control values, and joins the two: each keyboard
//! note gets the tones that sound closest to it, ranked best first.
//!
//! ```
//! use tiatune::{compute, ScaleRequest, TuningConfig};
//!
//! let result = compute(&TuningConfig::default(), &ScaleRequest::default()).unwrap();
//! for row in result.table.flattened_table() {
//!     if let Some(tone) = row.best {
//!         println!("{} -> {}", row.pivot.label(), tone.label());
//!     }
//! }
//! ```

#![warn(missing_docs)]

pub mod correspondence;
pub mod error;
pub mod scale;
pub mod settings;
pub mod tia;
pub mod tuning;

pub use correspondence::{CorrespondenceTable, MatchGroup, NotePair, TableRow};
pub use error::{ConfigError, ConfigResult};
pub use scale::{
    build_reference_scale, build_tone_scale, Bounds, KeyRange, ReferenceNote, ReferenceScale,
    Tone, ToneParameters, ToneScale,
};
pub use settings::{compute, Computation, RangeSelection, ScaleRequest, Settings};
pub use tia::ClockProfile;
pub use tuning::{TuningConfig, TuningModel};
