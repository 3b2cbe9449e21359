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
//! Window computations over a note's waveform.
//!
//! All positions are sample indices. The preconditions here are contract
//! checks: a note that is too short for the requested window is a caller bug,
//! so violating them panics.
use rand::Rng;

/// Returns `window_size` samples starting at the onset of the note.
///
/// The note must still be active strictly past the end of the window, i.e.
/// `offset > onset + window_size`.
pub fn onset_clip(onset: usize, offset: usize, waveform: &[f32], window_size: usize) -> &[f32] {
    let end = window_end(onset, window_size);
    assert!(
        offset > end,
        "note too short for onset clip: onset {}, offset {}, window {}",
        onset,
        offset,
        window_size
    );
    &waveform[onset..end]
}

/// Picks a uniformly random start in `[onset, offset - window_size]`.
pub fn random_clip_start<R: Rng + ?Sized>(
    onset: usize,
    offset: usize,
    window_size: usize,
    rng: &mut R,
) -> usize {
    assert!(
        offset >= window_end(onset, window_size),
        "note too short for random clip: onset {}, offset {}, window {}",
        onset,
        offset,
        window_size
    );
    rng.gen_range(onset..=offset - window_size)
}

/// Returns `window_size` samples starting at, or after, the onset and ending
/// at, or before, the offset.
pub fn random_clip<'a, R: Rng + ?Sized>(
    onset: usize,
    offset: usize,
    waveform: &'a [f32],
    window_size: usize,
    rng: &mut R,
) -> &'a [f32] {
    let start = random_clip_start(onset, offset, window_size, rng);
    &waveform[start..window_end(start, window_size)]
}

/// The sample index `seconds` after the onset, rounded up.
pub fn clip_at_t_start(onset: usize, sample_rate: u32, seconds: f64) -> usize {
    assert!(
        seconds.is_finite() && seconds >= 0.0,
        "time after onset must be a non-negative number of seconds, got {}",
        seconds
    );
    let delay = (seconds * sample_rate as f64).ceil();
    assert!(
        delay < usize::MAX as f64,
        "{}s after onset is out of range at {} Hz",
        seconds,
        sample_rate
    );
    onset.checked_add(delay as usize).unwrap_or_else(|| {
        panic!(
            "{}s after onset {} is out of range at {} Hz",
            seconds, onset, sample_rate
        )
    })
}

/// Returns `window_size` samples starting `seconds` after the onset.
pub fn clip_at_t(
    onset: usize,
    offset: usize,
    waveform: &[f32],
    sample_rate: u32,
    seconds: f64,
    window_size: usize,
) -> &[f32] {
    let start = clip_at_t_start(onset, sample_rate, seconds);
    let end = window_end(start, window_size);
    assert!(
        offset > end,
        "note too short for clip at {}s: start {}, offset {}, window {}",
        seconds,
        start,
        offset,
        window_size
    );
    &waveform[start..end]
}

/// The exclusive end of a window, panicking instead of wrapping around.
fn window_end(start: usize, window_size: usize) -> usize {
    start.checked_add(window_size).unwrap_or_else(|| {
        panic!(
            "window of {} samples starting at {} is out of range",
            window_size, start
        )
    })
}
