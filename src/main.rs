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
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::builder::RangedU64ValueParser;
use clap::{crate_version, Parser, Subcommand};
use notebank::audio::SymphoniaDecoder;
use notebank::config::{build_dataset, DatasetConfig};
use notebank::notes::{
    note_index_to_midi_pitch, note_name, MAX_NOTE_INDEX, SILENCE_INDEX,
};
use notebank::Sample;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "A note-indexed audio sample bank."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists every note that has samples in the configured dataset.
    Notes {
        /// The path to the dataset config.
        config_path: PathBuf,
    },
    /// Takes a clip from a random sample of a note and prints its statistics.
    Clip {
        /// The path to the dataset config.
        config_path: PathBuf,
        /// The note index to take a clip from (0 is silence).
        note: usize,
        /// The clip length in samples. Defaults to the config's window size.
        #[arg[short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..)]]
        window_size: Option<usize>,
        /// Take the clip this many seconds after the onset.
        #[arg[short, long, conflicts_with = "onset"]]
        at: Option<f64>,
        /// Take the clip at the onset instead of at a random position.
        #[arg[short, long]]
        onset: bool,
        /// The seed for sample and clip selection. Overrides the config.
        #[arg[short, long]]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Notes { config_path } => {
            let config = DatasetConfig::deserialize(&config_path)?;
            let dataset = build_dataset(&config, Arc::new(SymphoniaDecoder::new()))?;

            if dataset.sample_count() == 0 {
                println!("No samples found.");
                return Ok(());
            }

            println!(
                "Notes (samples: {}, notes: {}):",
                dataset.sample_count(),
                dataset.populated_notes().count()
            );
            for slot in dataset.populated_notes() {
                println!(
                    "- {:>3} {:<4} MIDI {:>3}  {}",
                    slot.index(),
                    note_name(slot.index()).unwrap_or_default(),
                    note_index_to_midi_pitch(slot.index() as i32),
                    slot.sample_count()
                );
            }
        }
        Commands::Clip {
            config_path,
            note,
            window_size,
            at,
            onset,
            seed,
        } => {
            if note > MAX_NOTE_INDEX {
                return Err(format!("note must be between 0 and {}", MAX_NOTE_INDEX).into());
            }

            let config = DatasetConfig::deserialize(&config_path)?;
            let mut dataset = build_dataset(&config, Arc::new(SymphoniaDecoder::new()))?;
            if !dataset.note(note).has_samples() {
                return Err(format!("note {} has no samples", note).into());
            }

            let window_size = window_size.unwrap_or(config.window_size());
            let mut rng = match seed.or(config.seed()) {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let sample = dataset.random_sample(note, &mut rng);
            let description = match &*sample {
                Sample::File(file) => format!(
                    "{} (onset {}, offset {}, {} samples long)",
                    file.path().display(),
                    file.onset(),
                    file.offset(),
                    file.note_length()
                ),
                Sample::Silence(_) => "silence".to_string(),
            };
            info!(note, window_size, sample = %description, "Taking clip");

            let clip = match (at, onset) {
                (Some(seconds), _) => sample.clip_at_t(seconds, window_size)?,
                (None, true) => sample.onset_clip(window_size)?,
                (None, false) => sample.random_clip(window_size, &mut rng)?,
            };

            let peak = clip.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
            let rms = if clip.is_empty() {
                0.0
            } else {
                (clip.iter().map(|s| s * s).sum::<f32>() / clip.len() as f32).sqrt()
            };

            let name = match note {
                SILENCE_INDEX => "silence".to_string(),
                _ => note_name(note).unwrap_or_default(),
            };
            println!("Note: {} ({})", note, name);
            println!("Sample: {}", description);
            println!("Length: {}", clip.len());
            println!("Peak: {:.6}", peak);
            println!("RMS: {:.6}", rms);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_window_size_must_be_positive() {
        let parse = |window_size: &str| {
            Cli::try_parse_from(["notebank", "clip", "dataset.yaml", "58", "-w", window_size])
        };

        assert!(parse("0").is_err());
        assert!(parse("-3").is_err());
        match parse("1024").unwrap().command {
            Commands::Clip { window_size, .. } => assert_eq!(window_size, Some(1024)),
            Commands::Notes { .. } => panic!("parsed the wrong subcommand"),
        }
    }

    #[test]
    fn test_at_conflicts_with_onset() {
        let args = [
            "notebank",
            "clip",
            "dataset.yaml",
            "58",
            "--at",
            "0.5",
            "--onset",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
