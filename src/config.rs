use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BriscolaError, BriscolaResult};

pub const DEFAULT_SAMPLES: usize = 1_024;
pub const DEFAULT_BATCH_SIZE: usize = 64;
pub const WINNING_SCORE: u32 = 60;
pub const TOTAL_POINTS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of determinized games per run.
    pub samples: usize,
    /// Base seed. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Spread trials over the rayon pool.
    pub parallel: bool,
    /// Trials per parallel batch; each batch owns its generator.
    pub batch_size: usize,
    pub win_threshold: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            samples: DEFAULT_SAMPLES,
            seed: None,
            parallel: false,
            batch_size: DEFAULT_BATCH_SIZE,
            win_threshold: WINNING_SCORE,
        }
    }
}

impl EngineConfig {
    pub fn from_path(path: impl AsRef<Path>) -> BriscolaResult<EngineConfig> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let config: EngineConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BriscolaResult<()> {
        if self.samples == 0 {
            return Err(BriscolaError::InvalidConfig(
                "samples must be positive".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(BriscolaError::InvalidConfig(
                "batch_size must be positive".to_string(),
            ));
        }
        if self.win_threshold > TOTAL_POINTS {
            return Err(BriscolaError::InvalidConfig(format!(
                "win_threshold {} exceeds the {} points in the deck",
                self.win_threshold, TOTAL_POINTS
            )));
        }
        Ok(())
    }
}
