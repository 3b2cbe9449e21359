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
use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use super::error::ConfigError;

/// The default clip length, in samples.
pub const DEFAULT_WINDOW_SIZE: usize = 2048;

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_maps_sample_rate() -> u32 {
    crate::sources::maps::MAPS_SAMPLE_RATE
}

/// A YAML representation of a dataset.
#[derive(Deserialize, Clone, Debug)]
pub struct DatasetConfig {
    /// The data sources to read, in order.
    #[serde(default)]
    sources: Vec<SourceConfig>,

    /// The clip length, in samples.
    #[serde(default = "default_window_size")]
    window_size: usize,

    /// The seed for sample and clip selection. Random if not set.
    seed: Option<u64>,
}

/// A YAML representation of one data source.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// The MAPS isolated-note corpus.
    Maps {
        /// The corpus root. Relative paths are relative to the config file.
        root: PathBuf,
        /// The sample rate used to convert annotation times.
        #[serde(default = "default_maps_sample_rate")]
        sample_rate: u32,
    },
}

impl DatasetConfig {
    /// Parse a dataset config from a YAML file. Relative source roots are
    /// resolved against the directory holding the file.
    pub fn deserialize(path: &Path) -> Result<DatasetConfig, ConfigError> {
        let mut dataset = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<DatasetConfig>()?;

        if dataset.window_size == 0 {
            return Err(ConfigError::Invalid {
                field: "window_size",
                reason: "must be greater than zero".to_string(),
            });
        }

        let base_path = path.parent().unwrap_or_else(|| Path::new(""));
        for source in dataset.sources.iter_mut() {
            match source {
                SourceConfig::Maps { root, .. } => {
                    if root.is_relative() {
                        *root = base_path.join(&*root);
                    }
                }
            }
        }

        Ok(dataset)
    }

    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
