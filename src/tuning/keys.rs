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

//! Key letters and white/black key layout
//!
//! Key numbers are 1-based piano positions: key 1 is A0, key 40 is middle C,
//! key 49 is A4. All lookups use a Euclidean modulo so keys below 1 (a
//! transposed or stretched keyboard) wrap the same way.

/// Spellings going up the scale (sharps), indexed from A.
const SCALE_UP_KEYS: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Spellings going down the scale (flats), indexed from A.
const SCALE_DOWN_KEYS: [&str; 12] = [
    "A", "Bb", "B", "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab",
];

/// Combined labels for display: black keys carry both spellings.
const KEY_LETTERS: [&str; 12] = [
    "A", "Bb/A#", "B", "C", "Db/C#", "D", "Eb/D#", "E", "F", "Gb/F#", "G", "Ab/G#",
];

/// Indices (from A) of the white keys.
const WHITE_KEYS: [bool; 12] = [
    true, false, true, true, false, true, false, true, true, false, true, false,
];

/// MIDI number of key 0. Key 1 (A0) is MIDI 21.
pub const MIDI_KEY_OFFSET: i32 = 20;

/// MIDI number of A4, fixed by the MIDI standard.
pub const MIDI_A4: i32 = 69;

/// Position of a key within the octave, counted from A.
#[inline]
pub fn key_index(key_number: i32) -> usize {
    (key_number as i64 - 1).rem_euclid(12) as usize
}

/// Display letter: "C" for white keys, "Db/C#" for black keys.
pub fn key_letter(key_number: i32) -> &'static str {
    KEY_LETTERS[key_index(key_number)]
}

/// Letter for a direction of travel; `ascending` picks sharps, otherwise flats.
pub fn scale_letter(key_number: i32, ascending: bool) -> &'static str {
    let idx = key_index(key_number);
    if ascending {
        SCALE_UP_KEYS[idx]
    } else {
        SCALE_DOWN_KEYS[idx]
    }
}

/// Flat spelling of a black key, `None` for white keys.
pub fn flat_letter(key_number: i32) -> Option<&'static str> {
    is_black(key_number).then(|| SCALE_DOWN_KEYS[key_index(key_number)])
}

/// Sharp spelling of a black key, `None` for white keys.
pub fn sharp_letter(key_number: i32) -> Option<&'static str> {
    is_black(key_number).then(|| SCALE_UP_KEYS[key_index(key_number)])
}

/// White keys: A, B, C, D, E, F and G.
pub fn is_white(key_number: i32) -> bool {
    WHITE_KEYS[key_index(key_number)]
}

/// Black keys carry a sharp and a flat spelling.
pub fn is_black(key_number: i32) -> bool {
    !is_white(key_number)
}

/// Octave number; octaves begin on C so key 40 (middle C) is octave 4.
pub fn octave(key_number: i32) -> i32 {
    // round half up, matching how the display layer numbers octaves
    ((key_number as f64 + 2.0) / 12.0 + 0.5).floor() as i32
}

/// MIDI number of a key; key 1 (A0) is MIDI 21.
#[inline]
pub fn key_number_to_midi(key_number: i32) -> i32 {
    key_number.saturating_add(MIDI_KEY_OFFSET)
}

/// Key number of a MIDI note.
#[inline]
pub fn midi_to_key_number(midi_number: i32) -> i32 {
    midi_number.saturating_sub(MIDI_KEY_OFFSET)
}
