// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
//! Note samples: one instance of a note being played, or of no note at all.
//!
//! This module provides:
//! - [`FileSample`], recorded audio that is decoded lazily and cached
//! - [`SilenceSample`], a source of all-zero clips
//! - [`Sample`], the variant downstream training code works with

mod file;
mod silence;

pub use file::FileSample;
pub use silence::SilenceSample;

use rand::Rng;

use crate::audio::DecodeError;

/// A sample that clips can be taken from, real or silent.
#[derive(Debug)]
pub enum Sample {
    File(FileSample),
    Silence(SilenceSample),
}

impl Sample {
    /// Returns a clip of `window_size` samples starting at the onset of the note.
    pub fn onset_clip(&mut self, window_size: usize) -> Result<&[f32], DecodeError> {
        match self {
            Sample::File(sample) => sample.onset_clip(window_size),
            Sample::Silence(sample) => Ok(sample.clip(window_size)),
        }
    }

    /// Returns a clip of `window_size` samples from anywhere between the
    /// onset and the offset of the note.
    pub fn random_clip<R: Rng + ?Sized>(
        &mut self,
        window_size: usize,
        rng: &mut R,
    ) -> Result<&[f32], DecodeError> {
        match self {
            Sample::File(sample) => sample.random_clip(window_size, rng),
            Sample::Silence(sample) => Ok(sample.clip(window_size)),
        }
    }

    /// Returns a clip of `window_size` samples starting `seconds` after the
    /// onset of the note. Silence ignores the time.
    pub fn clip_at_t(&mut self, seconds: f64, window_size: usize) -> Result<&[f32], DecodeError> {
        match self {
            Sample::File(sample) => sample.clip_at_t(seconds, window_size),
            Sample::Silence(sample) => Ok(sample.clip(window_size)),
        }
    }

    /// Drops any cached waveform. The cached sample rate is kept.
    pub fn clear(&mut self) {
        if let Sample::File(sample) = self {
            sample.clear();
        }
    }

    /// Returns true if this is a silence sample.
    pub fn is_silence(&self) -> bool {
        matches!(self, Sample::Silence(_))
    }
}

impl From<FileSample> for Sample {
    fn from(sample: FileSample) -> Self {
        Sample::File(sample)
    }
}

impl From<SilenceSample> for Sample {
    fn from(sample: SilenceSample) -> Self {
        Sample::Silence(sample)
    }
}
