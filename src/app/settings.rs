use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Filed, Mode};

const STEP_MS: u64 = 600;
const LIGHT_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub mode: Mode,
    /// Time between two cues of a replay.
    pub step_ms: u64,
    /// How long a pad stays lit.
    pub light_ms: u64,

    /// Only ever comes from the command line.
    #[serde(skip)]
    pub seed: Option<u64>,
    /// `--step-ms` for this run, never written back.
    #[serde(skip)]
    pub step_override: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            step_ms: STEP_MS,
            light_ms: LIGHT_MS,
            seed: None,
            step_override: None,
        }
    }
}

impl Settings {
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_override.unwrap_or(self.step_ms).max(1))
    }

    pub fn light(&self) -> Duration {
        Duration::from_millis(self.light_ms)
    }
}

impl Filed for Settings {
    const NAME: &'static str = "Settings";
}
