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
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::audio::{AudioDecoder, DecodeError, DecodedAudio};
use crate::clip;

/// A note sample backed by an audio file, which lazily loads and caches the
/// decoded waveform.
///
/// The waveform and the sample rate come from the same decode but are cached
/// separately: [`FileSample::clear`] drops the waveform and keeps the sample
/// rate.
pub struct FileSample {
    path: PathBuf,
    /// Sample index at which the note's key was struck.
    onset: usize,
    /// Sample index at which the note's key was released.
    offset: usize,
    decoder: Arc<dyn AudioDecoder>,
    waveform: Option<Vec<f32>>,
    sample_rate: Option<u32>,
}

impl FileSample {
    /// Creates a new file sample. Nothing is read until a clip is requested.
    pub fn new<P: Into<PathBuf>>(
        path: P,
        onset: usize,
        offset: usize,
        decoder: Arc<dyn AudioDecoder>,
    ) -> FileSample {
        let path = path.into();
        assert!(
            offset > onset,
            "note offset {} must come after onset {} ({})",
            offset,
            onset,
            path.display()
        );
        FileSample {
            path,
            onset,
            offset,
            decoder,
            waveform: None,
            sample_rate: None,
        }
    }

    /// The file backing this sample.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn onset(&self) -> usize {
        self.onset
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The number of samples between onset and offset.
    pub fn note_length(&self) -> usize {
        self.offset - self.onset
    }

    /// Returns true if the waveform is currently cached.
    pub fn is_loaded(&self) -> bool {
        self.waveform.is_some()
    }

    /// The sample rate, if it has been loaded.
    pub fn cached_sample_rate(&self) -> Option<u32> {
        self.sample_rate
    }

    /// Returns the sample rate of the backing file. May decode the file.
    pub fn sample_rate(&mut self) -> Result<u32, DecodeError> {
        match self.sample_rate {
            Some(sample_rate) => Ok(sample_rate),
            None => {
                let decoded = self.decode()?;
                let sample_rate = decoded.sample_rate;
                self.waveform = Some(decoded.samples);
                Ok(sample_rate)
            }
        }
    }

    /// Returns the waveform of the backing file. May decode the file.
    pub fn waveform(&mut self) -> Result<&[f32], DecodeError> {
        let waveform = match self.waveform.take() {
            Some(waveform) => waveform,
            None => self.decode()?.samples,
        };
        Ok(self.waveform.insert(waveform).as_slice())
    }

    /// Drops the cached waveform. The sample rate is small, so it stays.
    pub fn clear(&mut self) {
        if self.waveform.take().is_some() {
            debug!(path = ?self.path, "Cleared cached waveform");
        }
    }

    /// Returns a clip starting at the onset of the note.
    pub fn onset_clip(&mut self, window_size: usize) -> Result<&[f32], DecodeError> {
        let (onset, offset) = (self.onset, self.offset);
        Ok(clip::onset_clip(
            onset,
            offset,
            self.waveform()?,
            window_size,
        ))
    }

    /// Returns a clip starting at, or after, the onset and ending at, or
    /// before, the offset of the note.
    pub fn random_clip<R: Rng + ?Sized>(
        &mut self,
        window_size: usize,
        rng: &mut R,
    ) -> Result<&[f32], DecodeError> {
        let (onset, offset) = (self.onset, self.offset);
        Ok(clip::random_clip(
            onset,
            offset,
            self.waveform()?,
            window_size,
            rng,
        ))
    }

    /// Returns a clip starting `seconds` after the onset of the note.
    pub fn clip_at_t(&mut self, seconds: f64, window_size: usize) -> Result<&[f32], DecodeError> {
        let (onset, offset) = (self.onset, self.offset);
        let sample_rate = self.sample_rate()?;
        Ok(clip::clip_at_t(
            onset,
            offset,
            self.waveform()?,
            sample_rate,
            seconds,
            window_size,
        ))
    }

    /// Decodes the backing file. A failed decode leaves the cache untouched.
    fn decode(&mut self) -> Result<DecodedAudio, DecodeError> {
        debug!(path = ?self.path, "Loading note sample");
        let decoded = self.decoder.decode(&self.path)?;
        self.sample_rate = Some(decoded.sample_rate);
        Ok(decoded)
    }
}

impl fmt::Debug for FileSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSample")
            .field("path", &self.path)
            .field("onset", &self.onset)
            .field("offset", &self.offset)
            .field("loaded_frames", &self.waveform.as_ref().map(Vec::len))
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}
