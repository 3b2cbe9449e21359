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
/// A source of silent clips.
///
/// For now silent clips are truly silent: every clip is all zeros.
#[derive(Debug, Default)]
pub struct SilenceSample {
    waveform: Vec<f32>,
}

impl SilenceSample {
    pub fn new() -> SilenceSample {
        SilenceSample::default()
    }

    /// Returns an all-zero clip of `window_size` samples. The buffer is
    /// reallocated whenever the requested size changes.
    pub fn clip(&mut self, window_size: usize) -> &[f32] {
        if self.waveform.len() != window_size {
            self.waveform = vec![0.0; window_size];
        }
        &self.waveform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_is_zeros() {
        let mut silence = SilenceSample::new();
        let clip = silence.clip(256);
        assert_eq!(clip.len(), 256);
        assert!(clip.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_clip_follows_window_size() {
        let mut silence = SilenceSample::new();
        for window_size in [512, 16, 16, 1024, 0, 3] {
            let clip = silence.clip(window_size);
            assert_eq!(clip.len(), window_size);
            assert!(clip.iter().all(|&s| s == 0.0));
        }
    }

    #[test]
    fn test_same_size_reuses_buffer() {
        let mut silence = SilenceSample::new();
        let first = silence.clip(64).as_ptr();
        let second = silence.clip(64).as_ptr();
        assert_eq!(first, second);
    }
}
