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

//! Settings file and the full computation pipeline
//!
//! Settings are read from YAML:
//!
//! ```yaml
//! tuning:
//!   a4_frequency: 440.0
//!   micro_tones_per_semitone: 1
//!   tuning_sensitivity_cents: 50
//! video_format: ntsc
//! tones: [1, 4, 12]
//! first_key: 1
//! last_key: 88
//! stretch_fit: false
//! ```
//!
//! Every field is optional; missing ones take the defaults above.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::correspondence::CorrespondenceTable;
use crate::error::ConfigResult;
use crate::scale::{KeyRange, ReferenceScale, ToneScale};
use crate::tia::ClockProfile;
use crate::tuning::{TuningConfig, TuningModel};

/// Tuning plus the tone request, as stored in a settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reference pitch, transpose and micro tones
    pub tuning: TuningConfig,

    /// Console video timing
    pub video_format: ClockProfile,

    /// AUDC values to enumerate
    pub tones: Vec<u8>,

    /// First key number of the keyboard
    pub first_key: i32,

    /// Last key number of the keyboard
    pub last_key: i32,

    /// Clip the keyboard to the keys the tones reach
    pub stretch_fit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: TuningConfig::default(),
            video_format: ClockProfile::Ntsc,
            tones: vec![1],
            first_key: KeyRange::PIANO.first(),
            last_key: KeyRange::PIANO.last(),
            stretch_fit: false,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Invalid settings file: {}", path.display()))
    }

    /// Parse and validate settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings =
            serde_yaml::from_str(content).context("Failed to parse YAML settings")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check the tuning and the key range.
    pub fn validate(&self) -> ConfigResult<()> {
        self.tuning.validate()?;
        self.key_range()?;
        Ok(())
    }

    /// The configured keyboard range.
    pub fn key_range(&self) -> ConfigResult<KeyRange> {
        KeyRange::new(self.first_key, self.last_key)
    }

    /// The tone request these settings describe.
    pub fn request(&self) -> ConfigResult<ScaleRequest> {
        let range = self.key_range()?;

        Ok(ScaleRequest {
            profile: self.video_format,
            controls: self.tones.clone(),
            range: if self.stretch_fit {
                RangeSelection::StretchFit { within: range }
            } else {
                RangeSelection::Fixed(range)
            },
        })
    }

    /// Run the whole pipeline for these settings.
    pub fn compute(&self) -> ConfigResult<Computation> {
        compute(&self.tuning, &self.request()?)
    }
}

/// How the reference keyboard range is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSelection {
    /// Exactly these keys
    Fixed(KeyRange),
    /// The keys the tones reach, clipped to `within`
    StretchFit {
        /// Keys the clipped range may not leave
        within: KeyRange,
    },
}

/// Which tones to enumerate and which keyboard to match them against.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleRequest {
    /// Console video timing
    pub profile: ClockProfile,
    /// AUDC values, in enumeration order
    pub controls: Vec<u8>,
    /// Keyboard range selection
    pub range: RangeSelection,
}

impl Default for ScaleRequest {
    fn default() -> Self {
        Self {
            profile: ClockProfile::Ntsc,
            controls: vec![1],
            range: RangeSelection::Fixed(KeyRange::PIANO),
        }
    }
}

/// Both enumerations and their correspondence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computation {
    /// Reference keyboard notes
    pub reference: ReferenceScale,
    /// Enumerated TIA tones
    pub tones: ToneScale,
    /// Notes joined with their closest tones
    pub table: CorrespondenceTable,
}

/// Build the tone scale, the reference scale and the table for one request.
pub fn compute(config: &TuningConfig, request: &ScaleRequest) -> ConfigResult<Computation> {
    let model = TuningModel::new(*config)?;

    let tones = ToneScale::build(model, request.profile, &request.controls);

    let range = match request.range {
        RangeSelection::Fixed(range) => range,
        RangeSelection::StretchFit { within } => {
            let fitted = tones.bounds().map(|b| b.key_range()).transpose()?;
            match fitted.and_then(|range| range.intersect(&within)) {
                Some(range) => range,
                None => {
                    warn!(
                        "stretch fit: tones {:?} reach no key in {}..={}, keeping the full range",
                        request.controls,
                        within.first(),
                        within.last()
                    );
                    within
                }
            }
        }
    };
    debug!("reference keys {}..={}", range.first(), range.last());

    let reference = ReferenceScale::build(model, range);
    let table = CorrespondenceTable::build(&reference, &tones);

    Ok(Computation {
        reference,
        tones,
        table,
    })
}
