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
//! A collection of note samples from any number of data sources, grouped by
//! note.
use rand::Rng;
use tracing::{debug, info};

use crate::notes::{NoteSlot, MAX_NOTE_INDEX, NOTE_SLOTS};
use crate::samples::Sample;
use crate::sources::{DataSource, DataSourceError};

/// Note samples grouped by note index. There is always one slot per note
/// index, whether or not any samples were added for it.
#[derive(Debug)]
pub struct Dataset {
    notes: [NoteSlot; NOTE_SLOTS],
}

impl Dataset {
    /// Creates an empty dataset: silence in slot 0 and an empty note in every
    /// other slot.
    pub fn new() -> Dataset {
        Dataset {
            notes: std::array::from_fn(NoteSlot::for_index),
        }
    }

    /// The number of note slots. Always [`NOTE_SLOTS`].
    pub fn slot_count(&self) -> usize {
        self.notes.len()
    }

    /// Returns the slot for a note index. Panics if the index is out of range.
    pub fn note(&self, note_index: usize) -> &NoteSlot {
        &self.notes[note_index]
    }

    /// All slots, in note index order.
    pub fn notes(&self) -> impl Iterator<Item = &NoteSlot> {
        self.notes.iter()
    }

    /// The real notes that have at least one sample.
    pub fn populated_notes(&self) -> impl Iterator<Item = &NoteSlot> {
        self.notes
            .iter()
            .filter(|slot| matches!(slot, NoteSlot::Note(note) if note.has_samples()))
    }

    /// The number of samples added from data sources. Silence is not counted.
    pub fn sample_count(&self) -> usize {
        self.notes
            .iter()
            .filter_map(|slot| match slot {
                NoteSlot::Note(note) => Some(note.sample_count()),
                NoteSlot::Silence(_) => None,
            })
            .sum()
    }

    /// Adds one sample to the note with the given index.
    ///
    /// Data sources only produce real notes, so anything outside
    /// 1..=[`MAX_NOTE_INDEX`] is a broken data source and panics.
    pub fn add_sample(&mut self, note_index: i32, sample: Sample) {
        let slot = usize::try_from(note_index)
            .ok()
            .filter(|index| (1..=MAX_NOTE_INDEX).contains(index));
        match slot {
            Some(slot) => self.notes[slot].add_sample(sample),
            None => panic!(
                "data source produced note index {}, expected 1..={}",
                note_index, MAX_NOTE_INDEX
            ),
        }
    }

    /// Reads all samples from the given data source into this dataset and
    /// returns how many were added.
    ///
    /// Samples extend what is already in the dataset. If the source fails,
    /// the samples read before the failure stay in the dataset and the error
    /// is returned.
    pub fn add_datasource<S: DataSource>(&mut self, source: S) -> Result<usize, DataSourceError> {
        let mut added = 0;
        for sourced in source.samples() {
            let (note_index, sample) = sourced?;
            self.add_sample(note_index, sample);
            added += 1;
        }
        info!(
            added,
            total = self.sample_count(),
            "Added samples from data source"
        );
        Ok(added)
    }

    /// Picks a random sample of the given note.
    ///
    /// Panics if the index is out of range or the note has no samples.
    pub fn random_sample<R: Rng + ?Sized>(&mut self, note_index: usize, rng: &mut R) -> &mut Sample {
        self.notes[note_index].random_sample(rng)
    }

    /// Drops every cached waveform in the dataset.
    pub fn clear(&mut self) {
        self.notes.iter_mut().for_each(NoteSlot::clear);
        debug!("Cleared all cached waveforms");
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Dataset::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::audio::MockDecoder;
    use crate::notes::{midi_pitch_to_note_index, SILENCE_INDEX};
    use crate::samples::FileSample;
    use crate::sources::{SampleIter, SourcedSample};

    fn file_sample(decoder: &Arc<MockDecoder>, onset: usize) -> Sample {
        FileSample::new("n.wav", onset, onset + 500, decoder.clone()).into()
    }

    #[test]
    fn test_fixed_slots() {
        let dataset = Dataset::new();
        assert_eq!(dataset.slot_count(), 122);
        assert_eq!(dataset.notes().count(), 122);
        for (index, slot) in dataset.notes().enumerate() {
            assert_eq!(slot.index(), index);
        }

        let silence = dataset.note(SILENCE_INDEX);
        assert!(silence.has_samples());
        assert_eq!(silence.sample_count(), 1);
        assert!(dataset.notes().skip(1).all(|slot| !slot.has_samples()));
        assert_eq!(dataset.sample_count(), 0);
        assert_eq!(dataset.populated_notes().count(), 0);
    }

    #[test]
    fn test_add_datasource_routes_samples() {
        let decoder = Arc::new(MockDecoder::ramp(2000, 100));
        let mut dataset = Dataset::new();
        let source: Vec<SourcedSample> = vec![
            (1, file_sample(&decoder, 0)),
            (58, file_sample(&decoder, 10)),
            (58, file_sample(&decoder, 20)),
            (121, file_sample(&decoder, 30)),
        ];

        assert_eq!(dataset.add_datasource(source).unwrap(), 4);
        assert_eq!(dataset.note(1).sample_count(), 1);
        assert_eq!(dataset.note(58).sample_count(), 2);
        assert_eq!(dataset.note(121).sample_count(), 1);
        assert_eq!(dataset.note(SILENCE_INDEX).sample_count(), 1);
        assert_eq!(dataset.sample_count(), 4);
        assert_eq!(
            dataset.populated_notes().map(NoteSlot::index).collect::<Vec<_>>(),
            vec![1, 58, 121]
        );
        assert_eq!(decoder.decode_count(), 0);
    }

    #[test]
    fn test_sources_extend() {
        let decoder = Arc::new(MockDecoder::ramp(2000, 100));
        let mut dataset = Dataset::new();
        dataset
            .add_datasource(vec![(40, file_sample(&decoder, 0))])
            .unwrap();
        dataset
            .add_datasource(vec![(40, file_sample(&decoder, 1)), (41, file_sample(&decoder, 2))])
            .unwrap();

        assert_eq!(dataset.note(40).sample_count(), 2);
        assert_eq!(dataset.note(41).sample_count(), 1);
    }

    #[test]
    fn test_pitch_range_accepted() {
        let decoder = Arc::new(MockDecoder::ramp(2000, 100));
        let mut dataset = Dataset::new();
        dataset.add_sample(midi_pitch_to_note_index(12), file_sample(&decoder, 0));
        dataset.add_sample(midi_pitch_to_note_index(132), file_sample(&decoder, 0));
        assert_eq!(dataset.note(1).sample_count(), 1);
        assert_eq!(dataset.note(121).sample_count(), 1);
    }

    #[test]
    #[should_panic(expected = "note index 122")]
    fn test_index_above_range() {
        let decoder = Arc::new(MockDecoder::ramp(2000, 100));
        let mut dataset = Dataset::new();
        dataset.add_sample(midi_pitch_to_note_index(133), file_sample(&decoder, 0));
    }

    #[test]
    #[should_panic(expected = "note index -1")]
    fn test_negative_index() {
        let decoder = Arc::new(MockDecoder::ramp(2000, 100));
        let mut dataset = Dataset::new();
        let _ = dataset.add_datasource(vec![(-1, file_sample(&decoder, 0))]);
    }

    #[test]
    #[should_panic(expected = "note index 0")]
    fn test_silence_index_rejected() {
        let decoder = Arc::new(MockDecoder::ramp(2000, 100));
        let mut dataset = Dataset::new();
        dataset.add_sample(midi_pitch_to_note_index(11), file_sample(&decoder, 0));
    }

    struct FailingSource {
        decoder: Arc<MockDecoder>,
    }

    impl DataSource for FailingSource {
        fn samples(self) -> SampleIter {
            let first = (5, file_sample(&self.decoder, 0));
            Box::new(
                vec![
                    Ok(first),
                    Err(DataSourceError::UnsupportedNoteCount {
                        path: "broken.txt".into(),
                        count: 2,
                    }),
                ]
                .into_iter(),
            )
        }
    }

    #[test]
    fn test_source_error_keeps_earlier_samples() {
        let decoder = Arc::new(MockDecoder::ramp(2000, 100));
        let mut dataset = Dataset::new();
        let result = dataset.add_datasource(FailingSource { decoder });

        assert!(matches!(
            result,
            Err(DataSourceError::UnsupportedNoteCount { count: 2, .. })
        ));
        assert_eq!(dataset.note(5).sample_count(), 1);
    }

    #[test]
    fn test_random_sample_and_clip() {
        let decoder = Arc::new(MockDecoder::ramp(2000, 100));
        let mut dataset = Dataset::new();
        dataset
            .add_datasource(vec![(30, file_sample(&decoder, 100))])
            .unwrap();

        let mut rng = StdRng::seed_from_u64(8);
        let clip = dataset
            .random_sample(30, &mut rng)
            .random_clip(64, &mut rng)
            .unwrap();
        assert_eq!(clip.len(), 64);
        assert!(clip[0] >= 100.0 && clip[0] <= 536.0);

        let silence = dataset
            .random_sample(SILENCE_INDEX, &mut rng)
            .onset_clip(64)
            .unwrap();
        assert_eq!(silence, &[0.0; 64]);

        dataset.clear();
        dataset.random_sample(30, &mut rng).onset_clip(64).unwrap();
        assert_eq!(decoder.decode_count(), 2);
    }
}
