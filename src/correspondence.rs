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

//! Correspondence between reference notes and TIA tones
//!
//! Every reference note of the pivot scale owns a [`MatchGroup`]. Each tone is
//! routed to the group sharing its micro id, so a group collects all tones that
//! round to that pitch slot. Within a group the candidates are ranked by
//! absolute frequency distance to the reference note, then by absolute cents;
//! the first candidate is the best match.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::{debug, trace};
use serde::Serialize;

use crate::scale::{Bounds, ReferenceNote, ReferenceScale, Tone, ToneScale};
use crate::tuning::{cents_between, TuningModel};

/// A reference note and one candidate tone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NotePair {
    /// The reference note
    pub pivot: ReferenceNote,
    /// The tone placed under it
    pub candidate: Tone,
    /// Signed cents from the reference note to the tone
    pub cents: f64,
}

impl NotePair {
    /// Pair a tone with a reference note, measuring the cents between them.
    pub fn new(pivot: ReferenceNote, candidate: Tone) -> Self {
        Self {
            pivot,
            candidate,
            cents: cents_between(pivot.frequency, candidate.frequency),
        }
    }

    /// Absolute frequency difference in Hz.
    pub fn frequency_distance(&self) -> f64 {
        (self.candidate.frequency - self.pivot.frequency).abs()
    }
}

/// Ranking of candidates within a group: closest frequency first, then
/// smallest absolute cents.
fn rank(a: &NotePair, b: &NotePair) -> Ordering {
    a.frequency_distance()
        .total_cmp(&b.frequency_distance())
        .then_with(|| a.cents.abs().total_cmp(&b.cents.abs()))
}

/// One reference note with its ranked candidate tones.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchGroup {
    pivot: ReferenceNote,
    pairs: Vec<NotePair>,
}

impl MatchGroup {
    /// Empty group for a reference note.
    pub fn new(pivot: ReferenceNote) -> Self {
        Self {
            pivot,
            pairs: Vec::new(),
        }
    }

    /// The reference note of this group.
    pub fn pivot(&self) -> &ReferenceNote {
        &self.pivot
    }

    /// Candidates, best first.
    pub fn pairs(&self) -> &[NotePair] {
        &self.pairs
    }

    /// Closest candidate, if any tone fell under the reference note.
    pub fn best(&self) -> Option<&NotePair> {
        self.pairs.first()
    }

    /// Number of candidate tones.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no tone fell under the reference note.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn add(&mut self, candidate: Tone) {
        self.pairs.push(NotePair::new(self.pivot, candidate));
        // stable: equal candidates keep arrival order
        self.pairs.sort_by(rank);
    }
}

/// One display row: a reference note and its best tone.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    /// The reference note of the row
    pub pivot: ReferenceNote,
    /// Closest tone, `None` for an empty group
    pub best: Option<Tone>,
    /// Signed cents from the reference note to the best tone
    pub cents: Option<f64>,
    /// `|cents| <= tuning_sensitivity_cents`; false without a best tone
    pub within_tolerance: bool,
    /// Number of tones that fell under this reference note
    pub candidate_count: usize,
    /// Reference frequency at display precision
    pub pivot_frequency_rounded: f64,
    /// Best tone frequency at display precision
    pub best_frequency_rounded: Option<f64>,
    /// Cents at display precision
    pub cents_rounded: Option<f64>,
    /// "AUDC/AUDF" of the best tone
    pub tone_label: Option<String>,
}

/// Reference notes joined with the tones that sound closest to them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorrespondenceTable {
    model: TuningModel,
    groups: Vec<MatchGroup>,
    #[serde(skip)]
    index: HashMap<i32, usize>,
    matched: Vec<Tone>,
    unmatched: Vec<Tone>,
    pivot_bounds: Option<Bounds>,
    candidate_bounds: Option<Bounds>,
}

impl CorrespondenceTable {
    /// Join a tone scale against a reference scale.
    pub fn build(pivot: &ReferenceScale, candidates: &ToneScale) -> Self {
        Self::from_tones(pivot, candidates.tones())
    }

    /// Join arbitrary tones, in the given order, against a reference scale.
    /// Micro ids are computed with the reference scale's tuning.
    pub fn from_tones(pivot: &ReferenceScale, candidates: &[Tone]) -> Self {
        let model = *pivot.model();

        let groups: Vec<MatchGroup> = pivot.iter().map(|n| MatchGroup::new(*n)).collect();
        let index: HashMap<i32, usize> = groups
            .iter()
            .enumerate()
            .map(|(idx, g)| (g.pivot.micro_id, idx))
            .collect();

        let mut table = Self {
            model,
            groups,
            index,
            matched: Vec::new(),
            unmatched: Vec::new(),
            pivot_bounds: pivot.bounds(),
            candidate_bounds: None,
        };

        for tone in candidates {
            table.join(*tone);
        }

        debug!(
            "correspondence: {} reference notes, {} tones matched, {} unmatched",
            table.groups.len(),
            table.matched.len(),
            table.unmatched.len()
        );

        table
    }

    fn join(&mut self, tone: Tone) {
        if tone.is_silent() {
            trace!("tone {} is silent, not joined", tone.label());
            self.unmatched.push(tone);
            return;
        }

        let Some(micro_id) = self.model.frequency_to_micro_id(tone.frequency) else {
            trace!("tone {} has no micro id", tone.label());
            self.unmatched.push(tone);
            return;
        };

        Bounds::accumulate(
            &mut self.candidate_bounds,
            &ReferenceNote::from_micro_id(&self.model, micro_id),
        );

        match self.index.get(&micro_id) {
            Some(&idx) => {
                trace!("tone {} joins micro id {}", tone.label(), micro_id);
                self.groups[idx].add(tone);
                self.matched.push(tone);
            }
            None => {
                trace!("tone {} at micro id {} is off the keyboard", tone.label(), micro_id);
                self.unmatched.push(tone);
            }
        }
    }

    /// Tuning shared by both scales.
    pub fn model(&self) -> &TuningModel {
        &self.model
    }

    /// Groups in reference scale order (ascending micro id).
    pub fn groups(&self) -> &[MatchGroup] {
        &self.groups
    }

    /// Group of the reference note with the given micro id.
    pub fn group(&self, micro_id: i32) -> Option<&MatchGroup> {
        self.index.get(&micro_id).map(|&idx| &self.groups[idx])
    }

    /// Best tone for a reference note.
    pub fn best_match(&self, micro_id: i32) -> Option<&Tone> {
        self.group(micro_id)
            .and_then(MatchGroup::best)
            .map(|pair| &pair.candidate)
    }

    /// Tones that joined a group, in arrival order.
    pub fn matched(&self) -> &[Tone] {
        &self.matched
    }

    /// Silent tones and tones outside the reference keyboard.
    pub fn unmatched(&self) -> &[Tone] {
        &self.unmatched
    }

    /// Bounds of the reference scale.
    pub fn pivot_bounds(&self) -> Option<Bounds> {
        self.pivot_bounds
    }

    /// Bounds over every pitched tone, including unmatched ones.
    pub fn candidate_bounds(&self) -> Option<Bounds> {
        self.candidate_bounds
    }

    /// Number of groups, one per reference note.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True for an empty reference scale.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// `|cents| <= tuning_sensitivity_cents`.
    pub fn within_tolerance(&self, cents: f64) -> bool {
        cents.abs() <= self.model.config().tuning_sensitivity_cents
    }

    /// One row per reference note, in reference scale order.
    pub fn flattened_table(&self) -> Vec<TableRow> {
        self.groups
            .iter()
            .map(|group| {
                let best = group.best();
                let cents = best.map(|pair| pair.cents);

                TableRow {
                    pivot: group.pivot,
                    best: best.map(|pair| pair.candidate),
                    cents,
                    within_tolerance: cents.is_some_and(|c| self.within_tolerance(c)),
                    candidate_count: group.len(),
                    pivot_frequency_rounded: self.model.round_frequency(group.pivot.frequency),
                    best_frequency_rounded: best
                        .map(|pair| self.model.round_frequency(pair.candidate.frequency)),
                    cents_rounded: cents.map(|c| self.model.round_cents(c)),
                    tone_label: best.map(|pair| pair.candidate.label()),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{KeyRange, ToneParameters};
    use crate::tia::ClockProfile;
    use crate::tuning::TuningConfig;

    fn synthetic_tone(frequency: f64, pitch: u8) -> Tone {
        Tone {
            params: ToneParameters::new(4, pitch, ClockProfile::Ntsc),
            frequency,
            nearest: None,
            cents: f64::NAN,
        }
    }

    fn a4_only() -> ReferenceScale {
        ReferenceScale::build(TuningModel::default(), KeyRange::new(49, 49).unwrap())
    }

    #[test]
    fn test_equal_frequency_distance_prefers_smaller_cents() {
        // both 10 Hz away from A4; the sharp tone is fewer cents away
        let tones = [synthetic_tone(430.0, 1), synthetic_tone(450.0, 2)];
        let table = CorrespondenceTable::from_tones(&a4_only(), &tones);

        let group = table.group(49).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.best().unwrap().candidate.frequency, 450.0);
        assert!(group.best().unwrap().cents > 0.0);
    }

    #[test]
    fn test_closest_frequency_wins() {
        let tones = [
            synthetic_tone(452.0, 1),
            synthetic_tone(439.0, 2),
            synthetic_tone(445.0, 3),
        ];
        let table = CorrespondenceTable::from_tones(&a4_only(), &tones);

        let order: Vec<f64> = table
            .group(49)
            .unwrap()
            .pairs()
            .iter()
            .map(|p| p.candidate.frequency)
            .collect();
        assert_eq!(order, vec![439.0, 445.0, 452.0]);
    }

    #[test]
    fn test_exact_ties_keep_first_seen() {
        let tones = [synthetic_tone(441.0, 7), synthetic_tone(441.0, 3)];
        let table = CorrespondenceTable::from_tones(&a4_only(), &tones);
        assert_eq!(table.best_match(49).unwrap().params.pitch, 7);
    }

    #[test]
    fn test_unmatched_and_silent() {
        let tones = [
            synthetic_tone(880.0, 1),
            synthetic_tone(0.0, 2),
            Tone {
                params: ToneParameters::new(11, 0, ClockProfile::Ntsc),
                ..synthetic_tone(440.0, 0)
            },
        ];
        let table = CorrespondenceTable::from_tones(&a4_only(), &tones);

        assert!(table.matched().is_empty());
        assert_eq!(table.unmatched().len(), 3);
        assert!(table.group(49).unwrap().is_empty());

        // only the 880 Hz tone is pitched
        let bounds = table.candidate_bounds().unwrap();
        assert_eq!(bounds.first_key_number, 61);
        assert_eq!(bounds.last_key_number, 61);
    }

    #[test]
    fn test_rows_and_tolerance() {
        let config = TuningConfig {
            tuning_sensitivity_cents: 10.0,
            ..TuningConfig::default()
        };
        let model = TuningModel::new(config).unwrap();
        let pivot = ReferenceScale::build(model, KeyRange::new(48, 50).unwrap());
        let tones = [synthetic_tone(441.0, 1), synthetic_tone(455.0, 2)];
        let table = CorrespondenceTable::from_tones(&pivot, &tones);

        let rows = table.flattened_table();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].best.is_none());
        assert!(!rows[0].within_tolerance);
        assert_eq!(rows[0].cents, None);

        let a4 = &rows[1];
        assert_eq!(a4.pivot.key_number, 49);
        assert_eq!(a4.candidate_count, 1);
        assert!(a4.within_tolerance);
        assert_eq!(a4.tone_label.as_deref(), Some("4/1"));
        assert_eq!(a4.best_frequency_rounded, Some(441.0));
        assert_eq!(a4.cents_rounded, Some(3.93));

        // 455 Hz rounds to key 50 (Bb4, 466.16 Hz) and is ~42 cents flat
        let bb4 = &rows[2];
        assert_eq!(bb4.candidate_count, 1);
        assert!(bb4.cents.unwrap() < -40.0);
        assert!(!bb4.within_tolerance);
    }
}
