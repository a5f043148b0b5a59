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

//! Atari 2600 TIA tone generator
//!
//! Each TIA audio channel is driven by a control register (AUDC, 4 bits) that
//! selects a waveform and with it an effective frequency divisor, and a
//! frequency register (AUDF, 5 bits) that divides the audio clock further:
//!
//! ```text
//!   f = audio_clock / DIVISORS[audc] / (audf + 1)
//! ```
//!
//! The audio clock is the video color clock divided by the average number of
//! color clocks per audio clock (two audio clocks per 228-color-clock scan
//! line), so it differs between NTSC and PAL consoles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Color clocks per scan line
pub const COLOR_CLOCKS_PER_LINE: f64 = 228.0;

/// Average color clocks per audio clock (alternates between 112 and 116)
pub const COLOR_CLOCKS_PER_AUDIO: f64 = COLOR_CLOCKS_PER_LINE / 2.0;

/// NTSC console crystal (C015510). The nominal NTSC clock is 3.579545 MHz.
pub const NTSC_CRYSTAL_HZ: f64 = 3.579575e6;

/// PAL console crystal (C016112). The nominal PAL clock is 3.546900 MHz.
pub const PAL_CRYSTAL_HZ: f64 = 3.546894e6;

/// Number of AUDC control values
pub const CONTROL_COUNT: u8 = 16;

/// Number of AUDF pitch values
pub const PITCH_COUNT: u8 = 32;

/// Frequency divisor per AUDC value. 0 and 11 are silent and carry 1.
pub const DIVISORS: [u32; CONTROL_COUNT as usize] = [
    // AUDC 0 to 15
    1, 15, 465, 465, 2, 2, 31, 31, 511, 31, 31, 1, 6, 6, 93, 93,
];

/// AUDC values that produce a pitched tone.
pub const PITCHED_CONTROLS: [u8; 12] = [1, 2, 3, 4, 5, 7, 8, 9, 12, 13, 14, 15];

/// Video timing of the console, which fixes the audio clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockProfile {
    /// North American timing
    #[default]
    Ntsc,
    /// European timing
    Pal,
}

impl ClockProfile {
    /// Both profiles, NTSC first.
    pub const ALL: [ClockProfile; 2] = [ClockProfile::Ntsc, ClockProfile::Pal];

    /// Crystal (color clock) frequency in Hz
    pub fn crystal_frequency(self) -> f64 {
        match self {
            ClockProfile::Ntsc => NTSC_CRYSTAL_HZ,
            ClockProfile::Pal => PAL_CRYSTAL_HZ,
        }
    }

    /// 6507 CPU clock in Hz
    pub fn cpu_frequency(self) -> f64 {
        self.crystal_frequency() / 3.0
    }

    /// TIA audio clock in Hz
    pub fn audio_frequency(self) -> f64 {
        self.crystal_frequency() / COLOR_CLOCKS_PER_AUDIO
    }

    /// Fields per second
    pub fn frame_rate(self) -> f64 {
        match self {
            ClockProfile::Ntsc => 60.0 / 1.001,
            ClockProfile::Pal => 50.0,
        }
    }

    /// Lowercase name, as used in settings files.
    pub fn name(self) -> &'static str {
        match self {
            ClockProfile::Ntsc => "ntsc",
            ClockProfile::Pal => "pal",
        }
    }
}

impl fmt::Display for ClockProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClockProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ntsc" => Ok(ClockProfile::Ntsc),
            "pal" => Ok(ClockProfile::Pal),
            other => Err(format!("unknown video format '{}' (expected ntsc or pal)", other)),
        }
    }
}

/// True for AUDC values that make no pitched sound, including out-of-range ones.
pub fn is_silent_control(control: u8) -> bool {
    control >= CONTROL_COUNT || DIVISORS[control as usize] == 1
}

/// Frequency of one AUDC/AUDF setting, 0.0 when either is out of range.
pub fn tone_frequency(profile: ClockProfile, control: u8, pitch: u8) -> f64 {
    if control >= CONTROL_COUNT || pitch >= PITCH_COUNT {
        return 0.0;
    }

    profile.audio_frequency() / DIVISORS[control as usize] as f64 / (pitch as f64 + 1.0)
}

/// Lowest frequency of a control value (AUDF 31).
pub fn min_frequency(profile: ClockProfile, control: u8) -> f64 {
    tone_frequency(profile, control, PITCH_COUNT - 1)
}

/// Highest frequency of a control value (AUDF 0).
pub fn max_frequency(profile: ClockProfile, control: u8) -> f64 {
    tone_frequency(profile, control, 0)
}
