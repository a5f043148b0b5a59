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

//! Note and tone enumerations
//!
//! A [`ReferenceScale`] lists every micro tone of a keyboard range; a
//! [`ToneScale`] lists every AUDF setting of the requested AUDC values. Both
//! keep running [`Bounds`] so a display can clip its keyboard to what is
//! actually there.

mod reference;
mod tone;

pub use reference::{build_reference_scale, ReferenceNote, ReferenceScale};
pub use tone::{build_tone_scale, Tone, ToneParameters, ToneScale};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::tuning;

/// Inclusive range of key numbers, `first <= last`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct KeyRange {
    first: i32,
    last: i32,
}

impl KeyRange {
    /// Keys A0 to C8 of an 88-key piano.
    pub const PIANO: KeyRange = KeyRange { first: 1, last: 88 };

    /// Validated range; both ends must lie within
    /// [`KEY_NUMBER_LIMIT`](crate::tuning::KEY_NUMBER_LIMIT).
    pub fn new(first: i32, last: i32) -> ConfigResult<Self> {
        if let Some(&key) = [first, last]
            .iter()
            .find(|&&k| !tuning::is_valid_key_number(k))
        {
            return Err(ConfigError::KeyOutOfRange { key });
        }
        if first > last {
            return Err(ConfigError::InvalidKeyRange { first, last });
        }
        Ok(Self { first, last })
    }

    /// Key range spanned by a set of bounds (stretch fit).
    pub fn from_bounds(bounds: &Bounds) -> ConfigResult<Self> {
        Self::new(bounds.first_key_number, bounds.last_key_number)
    }

    /// Lowest key number.
    pub fn first(&self) -> i32 {
        self.first
    }

    /// Highest key number.
    pub fn last(&self) -> i32 {
        self.last
    }

    /// True when `key_number` is inside the range.
    pub fn contains(&self, key_number: i32) -> bool {
        (self.first..=self.last).contains(&key_number)
    }

    /// Number of keys in the range.
    pub fn len(&self) -> usize {
        (self.last - self.first + 1) as usize
    }

    /// Always false: `first <= last` holds for every constructed range.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Overlap of two ranges, `None` when they are disjoint.
    pub fn intersect(&self, other: &KeyRange) -> Option<KeyRange> {
        let first = self.first.max(other.first);
        let last = self.last.min(other.last);
        (first <= last).then_some(KeyRange { first, last })
    }

    /// Key numbers in ascending order.
    pub fn iter(&self) -> std::ops::RangeInclusive<i32> {
        self.first..=self.last
    }
}

impl Default for KeyRange {
    fn default() -> Self {
        Self::PIANO
    }
}

/// Running min/max of micro ids, MIDI numbers and key numbers over a
/// collection. Collections keep `Option<Bounds>`; `None` means empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lowest micro id
    pub first_micro_id: i32,
    /// Highest micro id
    pub last_micro_id: i32,
    /// Lowest MIDI number
    pub first_midi_number: i32,
    /// Highest MIDI number
    pub last_midi_number: i32,
    /// Lowest key number
    pub first_key_number: i32,
    /// Highest key number
    pub last_key_number: i32,
}

impl Bounds {
    /// Bounds holding a single note.
    pub fn of_note(note: &ReferenceNote) -> Self {
        Self {
            first_micro_id: note.micro_id,
            last_micro_id: note.micro_id,
            first_midi_number: note.midi_number,
            last_midi_number: note.midi_number,
            first_key_number: note.key_number,
            last_key_number: note.key_number,
        }
    }

    /// Widen to include `note`.
    pub fn include(&mut self, note: &ReferenceNote) {
        self.first_micro_id = self.first_micro_id.min(note.micro_id);
        self.last_micro_id = self.last_micro_id.max(note.micro_id);
        self.first_midi_number = self.first_midi_number.min(note.midi_number);
        self.last_midi_number = self.last_midi_number.max(note.midi_number);
        self.first_key_number = self.first_key_number.min(note.key_number);
        self.last_key_number = self.last_key_number.max(note.key_number);
    }

    /// Include `note` in possibly-empty bounds.
    pub fn accumulate(bounds: &mut Option<Bounds>, note: &ReferenceNote) {
        match bounds {
            Some(b) => b.include(note),
            None => *bounds = Some(Bounds::of_note(note)),
        }
    }

    /// True when `micro_id` lies between the first and last micro ids.
    pub fn contains_micro_id(&self, micro_id: i32) -> bool {
        (self.first_micro_id..=self.last_micro_id).contains(&micro_id)
    }

    /// Keys spanned by the bounds.
    pub fn key_range(&self) -> ConfigResult<KeyRange> {
        KeyRange::from_bounds(self)
    }
}
