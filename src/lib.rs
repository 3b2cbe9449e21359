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
//! Note-indexed audio samples for training note detection models.
//!
//! Data sources read annotated recordings into a [`dataset::Dataset`], which
//! groups them by note. Training code picks a random sample of a note and then
//! takes a clip from it; the audio behind a sample is decoded on first use and
//! cached until cleared.
pub mod audio;
pub mod clip;
pub mod config;
pub mod dataset;
pub mod notes;
pub mod samples;
pub mod sources;
#[cfg(test)]
mod testutil;

pub use dataset::Dataset;
pub use notes::{midi_pitch_to_note_index, MAX_NOTE_INDEX, NOTE_SLOTS, SILENCE_INDEX};
pub use samples::{FileSample, Sample, SilenceSample};
pub use sources::{DataSource, DataSourceError};
