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
use std::sync::Arc;

use tracing::info;

use crate::audio::AudioDecoder;
use crate::dataset::Dataset;
use crate::sources::{DataSourceError, MapsSource};

mod dataset;
mod error;

pub use dataset::{DatasetConfig, SourceConfig, DEFAULT_WINDOW_SIZE};
pub use error::ConfigError;

/// Builds a dataset from every source in the config, in order. Samples share
/// the given decoder and nothing is decoded yet.
pub fn build_dataset(
    config: &DatasetConfig,
    decoder: Arc<dyn AudioDecoder>,
) -> Result<Dataset, DataSourceError> {
    let mut dataset = Dataset::new();
    for source in config.sources() {
        match source {
            SourceConfig::Maps { root, sample_rate } => {
                info!(root = ?root, sample_rate, "Reading MAPS corpus");
                let maps = MapsSource::new(root.clone(), decoder.clone())
                    .with_sample_rate(*sample_rate);
                dataset.add_datasource(maps)?;
            }
        }
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::audio::MockDecoder;
    use crate::notes::SILENCE_INDEX;

    fn write_note(root: &Path, name: &str, midi_pitch: i32) {
        let directory = root.join("Piano/ISOL/NO");
        fs::create_dir_all(&directory).unwrap();
        fs::write(directory.join(format!("{}.wav", name)), b"").unwrap();
        fs::write(
            directory.join(format!("{}.txt", name)),
            format!("OnsetTime\tOffsetTime\tMidiPitch\n0.5\t1.0\t{}\n", midi_pitch),
        )
        .unwrap();
    }

    #[test]
    fn test_build_dataset() {
        let tempdir = tempfile::tempdir().unwrap();
        write_note(&tempdir.path().join("one"), "a", 60);
        write_note(&tempdir.path().join("one"), "b", 60);
        write_note(&tempdir.path().join("two"), "c", 72);

        let path = tempdir.path().join("dataset.yaml");
        fs::write(
            &path,
            "sources:\n  - kind: maps\n    root: one\n  - kind: maps\n    root: two\n",
        )
        .unwrap();

        let config = DatasetConfig::deserialize(&path).unwrap();
        let decoder = Arc::new(MockDecoder::ramp(100_000, 44100));
        let dataset = build_dataset(&config, decoder.clone()).unwrap();

        assert_eq!(dataset.sample_count(), 3);
        assert_eq!(dataset.note(49).sample_count(), 2);
        assert_eq!(dataset.note(61).sample_count(), 1);
        assert!(dataset.note(SILENCE_INDEX).has_samples());
        assert_eq!(decoder.decode_count(), 0);
    }

    #[test]
    fn test_build_dataset_missing_root() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("dataset.yaml");
        fs::write(&path, "sources:\n  - kind: maps\n    root: nowhere\n").unwrap();

        let config = DatasetConfig::deserialize(&path).unwrap();
        let result = build_dataset(&config, Arc::new(MockDecoder::failing()));
        assert!(matches!(result, Err(DataSourceError::Io { .. })));
    }
}
