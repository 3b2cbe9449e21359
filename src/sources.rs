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
//! Data sources feed `(note_index, sample)` pairs into a dataset.
//!
//! A data source owns everything corpus specific: where the files are, how the
//! annotations are written, and how times and pitches become sample indices and
//! note indices. The dataset only iterates what it yields.

pub mod annotation;
pub mod maps;

use std::path::PathBuf;

use crate::samples::Sample;

pub use annotation::{AnnotatedNote, AnnotationError};
pub use maps::MapsSource;

/// A note index paired with one sample of that note.
///
/// The index is signed so that a bad pitch conversion reaches the dataset as
/// an out-of-range index instead of wrapping around.
pub type SourcedSample = (i32, Sample);

/// The iterator a data source hands to the dataset.
pub type SampleIter = Box<dyn Iterator<Item = Result<SourcedSample, DataSourceError>>>;

/// Anything that can produce a finite sequence of note samples.
pub trait DataSource {
    /// Consumes the source and yields every sample it provides.
    fn samples(self) -> SampleIter;
}

/// An in-memory data source.
impl DataSource for Vec<SourcedSample> {
    fn samples(self) -> SampleIter {
        Box::new(self.into_iter().map(Ok))
    }
}

/// Error types for data sources.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Annotation error in {path}: {source}")]
    Annotation {
        path: PathBuf,
        #[source]
        source: AnnotationError,
    },

    #[error("Expected exactly one note in {path}, found {count}")]
    UnsupportedNoteCount { path: PathBuf, count: usize },

    #[error("Note in {path} has no length: onset {onset}, offset {offset}")]
    EmptyNote {
        path: PathBuf,
        onset: usize,
        offset: usize,
    },

    #[error(
        "Note in {path} does not fit in a recording: onset {onset_time}s, offset {offset_time}s"
    )]
    NoteOutOfRange {
        path: PathBuf,
        onset_time: f64,
        offset_time: f64,
    },
}

impl DataSourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> DataSourceError {
        DataSourceError::Io {
            path: path.into(),
            source,
        }
    }
}
