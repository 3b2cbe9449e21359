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
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use super::{AudioDecoder, DecodedAudio, DecodeError};

/// A mock decoder. Doesn't read anything from disk, just hands out a fixed
/// waveform and counts how many times it was asked to decode.
#[derive(Debug)]
pub struct MockDecoder {
    /// The waveform to return, or None if every decode should fail.
    audio: Option<DecodedAudio>,
    decodes: AtomicUsize,
}

impl MockDecoder {
    /// Creates a mock decoder that returns the given waveform for every path.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> MockDecoder {
        MockDecoder {
            audio: Some(DecodedAudio {
                samples,
                sample_rate,
            }),
            decodes: AtomicUsize::new(0),
        }
    }

    /// Creates a mock decoder with a ramp waveform (sample i has value i).
    pub fn ramp(len: usize, sample_rate: u32) -> MockDecoder {
        MockDecoder::new((0..len).map(|i| i as f32).collect(), sample_rate)
    }

    /// Creates a mock decoder whose decodes always fail with a not-found error.
    pub fn failing() -> MockDecoder {
        MockDecoder {
            audio: None,
            decodes: AtomicUsize::new(0),
        }
    }

    /// The number of decodes attempted so far, failed ones included.
    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::Relaxed)
    }
}

impl AudioDecoder for MockDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedAudio, DecodeError> {
        let count = self.decodes.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(path = ?path, count, "Decoding (mock)");

        match &self.audio {
            Some(audio) => Ok(audio.clone()),
            None => Err(DecodeError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{}: mock decoder always fails", path.display()),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_decodes() {
        let decoder = MockDecoder::ramp(4, 8000);
        assert_eq!(decoder.decode_count(), 0);

        let decoded = decoder.decode(Path::new("a.wav")).unwrap();
        assert_eq!(decoded.samples, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(decoded.sample_rate, 8000);

        decoder.decode(Path::new("b.wav")).unwrap();
        assert_eq!(decoder.decode_count(), 2);
    }

    #[test]
    fn test_failing_counts_attempts() {
        let decoder = MockDecoder::failing();
        assert!(decoder.decode(Path::new("a.wav")).is_err());
        assert!(decoder.decode(Path::new("a.wav")).is_err());
        assert_eq!(decoder.decode_count(), 2);
    }
}
