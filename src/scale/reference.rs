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

//! Reference keyboard notes

use log::debug;
use serde::Serialize;

use super::{Bounds, KeyRange};
use crate::error::ConfigResult;
use crate::tuning::{keys, TuningConfig, TuningModel};

/// One micro tone of the reference keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReferenceNote {
    /// Piano key number: 1-88 on a full keyboard
    pub key_number: i32,
    /// Distance from the key in `1/M` semitone steps: ...-1, 0, +1...
    pub micro_distance: i32,
    /// `key_number * M + micro_distance`, unique within one scale
    pub micro_id: i32,
    /// MIDI note number of the key: 21-108 on a full keyboard
    pub midi_number: i32,
    /// Frequency in Hz
    pub frequency: f64,
    /// Octave number, starting on C
    pub octave: i32,
    /// "C" for white keys, "Db/C#" for black keys
    pub letter: &'static str,
    /// Spelling going up the scale: A, A#, B, C, C#...
    pub letter_up: &'static str,
    /// Spelling going down the scale: A, Bb, B, C, Db...
    pub letter_down: &'static str,
    /// White key
    pub is_white: bool,
}

impl ReferenceNote {
    /// Note of a key and micro distance under `model`.
    pub fn new(model: &TuningModel, key_number: i32, micro_distance: i32) -> Self {
        Self {
            key_number,
            micro_distance,
            micro_id: model.micro_id(key_number, micro_distance),
            midi_number: keys::key_number_to_midi(key_number),
            frequency: model.micro_frequency(key_number, micro_distance),
            octave: keys::octave(key_number),
            letter: keys::key_letter(key_number),
            letter_up: keys::scale_letter(key_number, true),
            letter_down: keys::scale_letter(key_number, false),
            is_white: keys::is_white(key_number),
        }
    }

    /// The note a reference scale would hold for `micro_id`.
    pub fn from_micro_id(model: &TuningModel, micro_id: i32) -> Self {
        let (key_number, micro_distance) = model.split_micro_id(micro_id);
        Self::new(model, key_number, micro_distance)
    }

    /// Black key
    pub fn is_black(&self) -> bool {
        !self.is_white
    }

    /// Letter, octave and micro distance, e.g. "A4.0".
    pub fn label(&self) -> String {
        format!("{}{}.{}", self.letter, self.octave, self.micro_distance)
    }

    /// The black key one semitone down at the same micro distance, if any.
    pub fn flat_neighbor(&self, model: &TuningModel) -> Option<ReferenceNote> {
        let key_number = self.key_number - 1;
        keys::is_black(key_number).then(|| Self::new(model, key_number, self.micro_distance))
    }

    /// The black key one semitone up at the same micro distance, if any.
    pub fn sharp_neighbor(&self, model: &TuningModel) -> Option<ReferenceNote> {
        let key_number = self.key_number + 1;
        keys::is_black(key_number).then(|| Self::new(model, key_number, self.micro_distance))
    }
}

/// Every micro tone of a key range, ordered by key number then micro
/// distance, which is also ascending micro id.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReferenceScale {
    model: TuningModel,
    range: KeyRange,
    notes: Vec<ReferenceNote>,
    bounds: Option<Bounds>,
}

impl ReferenceScale {
    /// Enumerate every micro tone of `range`.
    pub fn build(model: TuningModel, range: KeyRange) -> Self {
        let (start, end) = model.micro_window();
        let mut notes = Vec::with_capacity(range.len() * model.micro_tones() as usize);
        let mut bounds = None;

        for key_number in range.iter() {
            for micro_distance in start..=end {
                let note = ReferenceNote::new(&model, key_number, micro_distance);
                Bounds::accumulate(&mut bounds, &note);
                notes.push(note);
            }
        }

        debug!(
            "reference scale: keys {}..={} x {} micro tones -> {} notes",
            range.first(),
            range.last(),
            model.micro_tones(),
            notes.len()
        );

        Self {
            model,
            range,
            notes,
            bounds,
        }
    }

    /// Tuning the notes were built with.
    pub fn model(&self) -> &TuningModel {
        &self.model
    }

    /// Keys covered by the scale.
    pub fn range(&self) -> KeyRange {
        self.range
    }

    /// Notes in ascending micro id order.
    pub fn notes(&self) -> &[ReferenceNote] {
        &self.notes
    }

    /// Running bounds over the notes; `None` for an empty scale.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Number of notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// True when the scale holds no notes.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Iterate the notes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ReferenceNote> {
        self.notes.iter()
    }

    /// Note with the given micro id.
    pub fn get(&self, micro_id: i32) -> Option<&ReferenceNote> {
        self.notes
            .binary_search_by_key(&micro_id, |n| n.micro_id)
            .ok()
            .map(|idx| &self.notes[idx])
    }

    /// Note played by a MIDI key at a micro distance.
    pub fn find(&self, midi_number: i32, micro_distance: i32) -> Option<&ReferenceNote> {
        let key_number = keys::midi_to_key_number(midi_number);
        let (start, end) = self.model.micro_window();
        if !self.range.contains(key_number) || !(start..=end).contains(&micro_distance) {
            return None;
        }
        self.get(self.model.micro_id(key_number, micro_distance))
    }

    /// Frequency to play for a MIDI key at a micro distance.
    pub fn frequency_for(&self, midi_number: i32, micro_distance: i32) -> Option<f64> {
        self.find(midi_number, micro_distance).map(|n| n.frequency)
    }
}

impl<'a> IntoIterator for &'a ReferenceScale {
    type Item = &'a ReferenceNote;
    type IntoIter = std::slice::Iter<'a, ReferenceNote>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

/// Validate `config` and enumerate the reference keyboard for `range`.
pub fn build_reference_scale(config: &TuningConfig, range: KeyRange) -> ConfigResult<ReferenceScale> {
    let model = TuningModel::new(*config)?;
    Ok(ReferenceScale::build(model, range))
}
