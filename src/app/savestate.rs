use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::Filed;

#[derive(Default, Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Scoreboard {
    pub avg_score: f32,
    pub num_entries: u32,
    pub best: u32,
    pub last_played: Option<DateTime<Local>>,
}

impl Scoreboard {
    pub fn update(&mut self, score: u32) {
        self.avg_score = (self.avg_score * self.num_entries as f32 + score as f32)
            / (self.num_entries + 1) as f32;
        self.num_entries += 1;
        self.best = self.best.max(score);
        self.last_played = Some(Local::now());
    }
}

impl Filed for Scoreboard {
    const NAME: &'static str = "Scoreboard";
}
