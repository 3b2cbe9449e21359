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
//! Decoding of backing audio files into single-channel waveforms.
//!
//! The rest of the crate only sees the [`AudioDecoder`] trait, so the decode
//! dependency can be swapped for a mock decoder in tests.
use std::path::Path;

pub mod decoder;
pub mod error;
#[cfg(test)]
pub mod mock;

pub use decoder::SymphoniaDecoder;
pub use error::DecodeError;
#[cfg(test)]
pub use mock::MockDecoder;

/// The result of decoding one audio file.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// The first channel of the file as f32 samples in [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// The sample rate of the file.
    pub sample_rate: u32,
}

/// Decodes a backing audio file into a waveform and its sample rate.
pub trait AudioDecoder: Send + Sync {
    /// Decodes the whole file at `path`. Only the first channel is returned.
    fn decode(&self, path: &Path) -> Result<DecodedAudio, DecodeError>;
}
