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
//! Note containers and the note index scheme.
//!
//! Index 0 is silence; indices 1..=121 run chromatically from C0 upward.
use rand::Rng;

use crate::samples::{Sample, SilenceSample};

/// The note index reserved for silence.
pub const SILENCE_INDEX: usize = 0;

/// The highest note index.
pub const MAX_NOTE_INDEX: usize = 121;

/// The number of note slots in a dataset, silence included.
pub const NOTE_SLOTS: usize = MAX_NOTE_INDEX + 1;

/// C0 has a MIDI pitch of 12 and a note index of 1.
const MIDI_PITCH_OFFSET: i32 = 11;

const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Converts a MIDI pitch to a note index. The result is not range checked.
pub fn midi_pitch_to_note_index(midi_pitch: i32) -> i32 {
    midi_pitch - MIDI_PITCH_OFFSET
}

/// Converts a note index back to its MIDI pitch.
pub fn note_index_to_midi_pitch(note_index: i32) -> i32 {
    note_index + MIDI_PITCH_OFFSET
}

/// Returns the scientific pitch name of a note index, e.g. "A4" for 58.
pub fn note_name(note_index: usize) -> Option<String> {
    if note_index == SILENCE_INDEX || note_index > MAX_NOTE_INDEX {
        return None;
    }
    let semitone = note_index - 1;
    Some(format!(
        "{}{}",
        PITCH_CLASSES[semitone % 12],
        semitone / 12
    ))
}

/// A single note from C0 upward and the samples recorded for it.
#[derive(Debug)]
pub struct Note {
    index: usize,
    samples: Vec<Sample>,
}

impl Note {
    pub fn new(index: usize) -> Note {
        Note {
            index,
            samples: Vec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn add_sample(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn has_samples(&self) -> bool {
        !self.samples.is_empty()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Picks one of this note's samples uniformly at random.
    ///
    /// Panics if the note has no samples.
    pub fn random_sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Sample {
        assert!(
            self.has_samples(),
            "note {} has no samples to pick from",
            self.index
        );
        let pick = rng.gen_range(0..self.samples.len());
        &mut self.samples[pick]
    }

    /// Drops the cached waveform of every sample of this note.
    pub fn clear(&mut self) {
        self.samples.iter_mut().for_each(Sample::clear);
    }
}

/// A note-like stand-in for sounds that contain no discernible note.
/// It always has exactly one sample.
#[derive(Debug)]
pub struct Silence {
    sample: Sample,
}

impl Silence {
    pub fn new() -> Silence {
        Silence {
            sample: Sample::Silence(SilenceSample::new()),
        }
    }

    pub fn has_samples(&self) -> bool {
        true
    }

    pub fn sample_count(&self) -> usize {
        1
    }

    pub fn random_sample<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> &mut Sample {
        &mut self.sample
    }
}

impl Default for Silence {
    fn default() -> Self {
        Silence::new()
    }
}

/// One slot of a dataset: either the silence pseudo-note or a real note.
#[derive(Debug)]
pub enum NoteSlot {
    Silence(Silence),
    Note(Note),
}

impl NoteSlot {
    /// Creates the slot for the given note index.
    pub fn for_index(index: usize) -> NoteSlot {
        if index == SILENCE_INDEX {
            NoteSlot::Silence(Silence::new())
        } else {
            NoteSlot::Note(Note::new(index))
        }
    }

    pub fn index(&self) -> usize {
        match self {
            NoteSlot::Silence(_) => SILENCE_INDEX,
            NoteSlot::Note(note) => note.index(),
        }
    }

    /// Adds a sample to a note. Silence does not take samples, so adding to
    /// it panics.
    pub fn add_sample(&mut self, sample: Sample) {
        match self {
            NoteSlot::Silence(_) => panic!("the silence slot does not accept samples"),
            NoteSlot::Note(note) => note.add_sample(sample),
        }
    }

    pub fn has_samples(&self) -> bool {
        match self {
            NoteSlot::Silence(silence) => silence.has_samples(),
            NoteSlot::Note(note) => note.has_samples(),
        }
    }

    pub fn sample_count(&self) -> usize {
        match self {
            NoteSlot::Silence(silence) => silence.sample_count(),
            NoteSlot::Note(note) => note.sample_count(),
        }
    }

    pub fn random_sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Sample {
        match self {
            NoteSlot::Silence(silence) => silence.random_sample(rng),
            NoteSlot::Note(note) => note.random_sample(rng),
        }
    }

    pub fn clear(&mut self) {
        if let NoteSlot::Note(note) = self {
            note.clear();
        }
    }
}
