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

//! TIA tones placed against the reference keyboard

use log::{debug, trace};
use serde::Serialize;

use super::{Bounds, ReferenceNote};
use crate::error::ConfigResult;
use crate::tia::{self, ClockProfile};
use crate::tuning::{cents_between, TuningConfig, TuningModel};

/// Register settings of one TIA tone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ToneParameters {
    /// AUDC control value (0-15)
    pub control: u8,
    /// AUDF pitch value (0-31)
    pub pitch: u8,
    /// Clock profile of the console
    pub profile: ClockProfile,
}

impl ToneParameters {
    /// Register settings for one tone.
    pub fn new(control: u8, pitch: u8, profile: ClockProfile) -> Self {
        Self {
            control,
            pitch,
            profile,
        }
    }

    /// Frequency in Hz, 0.0 for out-of-range registers.
    pub fn frequency(&self) -> f64 {
        tia::tone_frequency(self.profile, self.control, self.pitch)
    }

    /// Silent or out-of-range settings.
    pub fn is_silent(&self) -> bool {
        tia::is_silent_control(self.control) || self.pitch >= tia::PITCH_COUNT
    }
}

/// A TIA tone with the reference note it sounds closest to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Tone {
    /// Register settings
    pub params: ToneParameters,
    /// Frequency in Hz
    pub frequency: f64,
    /// Reference note sharing the tone's micro id; `None` for a zero
    /// frequency or one beyond the key number limit
    pub nearest: Option<ReferenceNote>,
    /// Signed cents from `nearest` to the tone (positive is sharp), NaN
    /// without a nearest note
    pub cents: f64,
}

impl Tone {
    /// Compute the frequency of `params` and place it against `model`.
    pub fn new(model: &TuningModel, params: ToneParameters) -> Self {
        let frequency = params.frequency();
        let nearest = model
            .frequency_to_micro_id(frequency)
            .map(|micro_id| ReferenceNote::from_micro_id(model, micro_id));
        let cents = nearest
            .map(|n| cents_between(n.frequency, frequency))
            .unwrap_or(f64::NAN);

        Self {
            params,
            frequency,
            nearest,
            cents,
        }
    }

    /// Micro id of the nearest note.
    pub fn micro_id(&self) -> Option<i32> {
        self.nearest.map(|n| n.micro_id)
    }

    /// Key number of the nearest note.
    pub fn key_number(&self) -> Option<i32> {
        self.nearest.map(|n| n.key_number)
    }

    /// MIDI number of the nearest note.
    pub fn midi_number(&self) -> Option<i32> {
        self.nearest.map(|n| n.midi_number)
    }

    /// "AUDC/AUDF", e.g. "4/0".
    pub fn label(&self) -> String {
        format!("{}/{}", self.params.control, self.params.pitch)
    }

    /// True when the tone has no acoustic meaning: silent or out-of-range
    /// registers, or no positive frequency.
    pub fn is_silent(&self) -> bool {
        self.params.is_silent() || self.frequency.is_nan() || self.frequency <= 0.0
    }
}

/// All 32 AUDF settings of each requested AUDC value, in request order with
/// AUDF descending (lowest pitch first within a control value).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToneScale {
    model: TuningModel,
    profile: ClockProfile,
    controls: Vec<u8>,
    tones: Vec<Tone>,
    bounds: Option<Bounds>,
}

impl ToneScale {
    /// Enumerate AUDF 31 down to 0 for each control value in `controls`.
    pub fn build(model: TuningModel, profile: ClockProfile, controls: &[u8]) -> Self {
        let mut tones = Vec::with_capacity(controls.len() * tia::PITCH_COUNT as usize);
        let mut bounds = None;

        for &control in controls {
            for pitch in (0..tia::PITCH_COUNT).rev() {
                let tone = Tone::new(&model, ToneParameters::new(control, pitch, profile));
                trace!(
                    "tone {}: {:.3} Hz, micro id {:?}, {:.2} cents",
                    tone.label(),
                    tone.frequency,
                    tone.micro_id(),
                    tone.cents
                );

                if let Some(nearest) = tone.nearest.filter(|_| !tone.is_silent()) {
                    Bounds::accumulate(&mut bounds, &nearest);
                }
                tones.push(tone);
            }
        }

        debug!(
            "tone scale: {} controls {:?} -> {} tones",
            profile,
            controls,
            tones.len()
        );

        Self {
            model,
            profile,
            controls: controls.to_vec(),
            tones,
            bounds,
        }
    }

    /// Tuning the tones were placed with.
    pub fn model(&self) -> &TuningModel {
        &self.model
    }

    /// Clock profile of the tones.
    pub fn profile(&self) -> ClockProfile {
        self.profile
    }

    /// Requested control values, in request order.
    pub fn controls(&self) -> &[u8] {
        &self.controls
    }

    /// Tones in enumeration order.
    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    /// Bounds over the nearest notes of pitched tones; `None` when no pitched
    /// tone has one.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Number of tones.
    pub fn len(&self) -> usize {
        self.tones.len()
    }

    /// True when no control value was requested.
    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    /// Iterate the tones in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tone> {
        self.tones.iter()
    }

    /// Tone for an AUDC/AUDF pair, if that control value was requested.
    pub fn find(&self, control: u8, pitch: u8) -> Option<&Tone> {
        self.tones
            .iter()
            .find(|t| t.params.control == control && t.params.pitch == pitch)
    }

    /// Lowest and highest frequency the requested control values reach,
    /// skipping silent ones. `None` when nothing is pitched.
    pub fn frequency_span(&self) -> Option<(f64, f64)> {
        self.controls
            .iter()
            .filter(|&&c| !tia::is_silent_control(c))
            .map(|&c| {
                (
                    tia::min_frequency(self.profile, c),
                    tia::max_frequency(self.profile, c),
                )
            })
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }
}

impl<'a> IntoIterator for &'a ToneScale {
    type Item = &'a Tone;
    type IntoIter = std::slice::Iter<'a, Tone>;

    fn into_iter(self) -> Self::IntoIter {
        self.tones.iter()
    }
}

/// Validate `config` and enumerate the tones of `controls` for `profile`.
pub fn build_tone_scale(
    config: &TuningConfig,
    profile: ClockProfile,
    controls: &[u8],
) -> ConfigResult<ToneScale> {
    let model = TuningModel::new(*config)?;
    Ok(ToneScale::build(model, profile, controls))
}
