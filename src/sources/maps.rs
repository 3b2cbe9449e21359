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
//! The MAPS piano corpus, isolated-note recordings only.
//!
//! Layout: `<root>/<instrument>/ISOL/NO/<name>.wav`, each with its annotations
//! in `<name>.txt` alongside.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::annotation::{read_annotations, AnnotatedNote};
use super::{DataSource, DataSourceError, SampleIter, SourcedSample};
use crate::audio::AudioDecoder;
use crate::notes::midi_pitch_to_note_index;
use crate::samples::FileSample;

/// The directory holding isolated notes inside each instrument directory.
pub const ISOLATED_NOTES_SUBPATH: &str = "ISOL/NO";

/// The sample rate of every MAPS recording.
pub const MAPS_SAMPLE_RATE: u32 = 44100;

/// A note converted from seconds and MIDI pitch into sample indices and a
/// note index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConformedNote {
    pub onset: usize,
    pub offset: usize,
    pub note_index: i32,
}

/// A recording and its annotation file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Recording {
    wav_file: PathBuf,
    txt_file: PathBuf,
}

/// Reads isolated notes from a MAPS corpus.
pub struct MapsSource {
    root: PathBuf,
    sample_rate: u32,
    decoder: Arc<dyn AudioDecoder>,
}

impl MapsSource {
    /// Creates a source for the MAPS corpus at `root`. Samples decode their
    /// audio with `decoder`.
    pub fn new<P: Into<PathBuf>>(root: P, decoder: Arc<dyn AudioDecoder>) -> MapsSource {
        MapsSource {
            root: root.into(),
            sample_rate: MAPS_SAMPLE_RATE,
            decoder,
        }
    }

    /// Overrides the sample rate used to convert annotation times.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> MapsSource {
        self.sample_rate = sample_rate;
        self
    }

    /// Converts an annotated note. The onset rounds up and the offset rounds
    /// down, so the sample range never extends past the annotated note.
    ///
    /// Returns `None` if either time is not a non-negative number of seconds
    /// that lands on a representable sample index.
    pub fn conform_note(&self, note: &AnnotatedNote) -> Option<ConformedNote> {
        let rate = self.sample_rate as f64;
        Some(ConformedNote {
            onset: sample_index((rate * note.onset_time).ceil())?,
            offset: sample_index((rate * note.offset_time).floor())?,
            note_index: midi_pitch_to_note_index(note.midi_pitch),
        })
    }

    /// Lists every recording in the corpus, sorted by path.
    fn list_recordings(&self) -> Result<Vec<Recording>, DataSourceError> {
        let mut recordings = Vec::new();
        for instrument in sorted_entries(&self.root)? {
            if !instrument.is_dir() {
                continue;
            }
            let directory = instrument.join(ISOLATED_NOTES_SUBPATH);
            if !directory.is_dir() {
                warn!(path = ?instrument, "Skipping directory without isolated notes");
                continue;
            }

            let before = recordings.len();
            recordings.extend(list_recordings_in(&directory)?);
            info!(
                instrument = ?instrument.file_name().unwrap_or_default(),
                recordings = recordings.len() - before,
                "Found MAPS instrument"
            );
        }
        Ok(recordings)
    }

    /// Reads the annotation of one recording and builds its sample.
    fn read_recording(&self, recording: &Recording) -> Result<SourcedSample, DataSourceError> {
        let notes = read_annotations(&recording.txt_file)?;

        // Only isolated notes are supported for now.
        let [note] = notes.as_slice() else {
            return Err(DataSourceError::UnsupportedNoteCount {
                path: recording.txt_file.clone(),
                count: notes.len(),
            });
        };

        let conformed = self
            .conform_note(note)
            .ok_or_else(|| DataSourceError::NoteOutOfRange {
                path: recording.txt_file.clone(),
                onset_time: note.onset_time,
                offset_time: note.offset_time,
            })?;
        if conformed.offset <= conformed.onset {
            return Err(DataSourceError::EmptyNote {
                path: recording.txt_file.clone(),
                onset: conformed.onset,
                offset: conformed.offset,
            });
        }

        debug!(
            path = ?recording.wav_file,
            note_index = conformed.note_index,
            onset = conformed.onset,
            offset = conformed.offset,
            "Read MAPS note"
        );

        let sample = FileSample::new(
            recording.wav_file.clone(),
            conformed.onset,
            conformed.offset,
            self.decoder.clone(),
        );
        Ok((conformed.note_index, sample.into()))
    }
}

impl DataSource for MapsSource {
    fn samples(self) -> SampleIter {
        match self.list_recordings() {
            Ok(recordings) => Box::new(
                recordings
                    .into_iter()
                    .map(move |recording| self.read_recording(&recording)),
            ),
            Err(e) => Box::new(std::iter::once(Err(e))),
        }
    }
}

/// Converts a whole number of samples to an index, rejecting anything that
/// would saturate or truncate in the cast.
fn sample_index(samples: f64) -> Option<usize> {
    (samples.is_finite() && samples >= 0.0 && samples < usize::MAX as f64)
        .then_some(samples as usize)
}

/// Lists the `.wav` files in `directory` that have a matching `.txt` file.
fn list_recordings_in(directory: &Path) -> Result<Vec<Recording>, DataSourceError> {
    Ok(sorted_entries(directory)?
        .into_iter()
        .filter(|path| path.extension().is_some_and(|ext| ext == "wav"))
        .filter_map(|wav_file| {
            let txt_file = wav_file.with_extension("txt");
            if txt_file.is_file() {
                Some(Recording { wav_file, txt_file })
            } else {
                debug!(path = ?wav_file, "Skipping recording without annotations");
                None
            }
        })
        .collect())
}

fn sorted_entries(directory: &Path) -> Result<Vec<PathBuf>, DataSourceError> {
    let mut entries = fs::read_dir(directory)
        .map_err(|e| DataSourceError::io(directory, e))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DataSourceError::io(directory, e))?;
    entries.sort();
    Ok(entries)
}
