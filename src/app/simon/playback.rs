use std::time::{Duration, Instant};

use super::tile::Tile;

/// Replays a sequence one cue per step. Cue `i` is due `step * (i + 1)`
/// after `started`, so the first cue waits a full step like an interval timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    cues: Vec<Tile>,
    next: usize,
    started: Instant,
    step: Duration,
}

impl Playback {
    pub fn new(cues: &[Tile], started: Instant, step: Duration) -> Self {
        Self {
            cues: cues.to_vec(),
            next: 0,
            started,
            step,
        }
    }

    /// Yields at most one cue per call, and only once its slot has arrived.
    pub fn poll(&mut self, now: Instant) -> Option<Tile> {
        let tile = *self.cues.get(self.next)?;
        let due = self.step * (self.next as u32 + 1);

        if now.saturating_duration_since(self.started) < due {
            return None;
        }

        self.next += 1;
        Some(tile)
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.cues.len()
    }

    /// (played, total)
    pub fn progress(&self) -> (usize, usize) {
        (self.next, self.cues.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(600);

    #[test]
    fn nothing_is_due_before_the_first_step() {
        let start = Instant::now();
        let mut pb = Playback::new(&[Tile::Red], start, STEP);

        assert_eq!(pb.poll(start), None);
        assert_eq!(pb.poll(start + Duration::from_millis(599)), None);
        assert!(!pb.is_finished());
    }

    #[test]
    fn yields_cues_in_order_at_the_cadence() {
        let start = Instant::now();
        let mut pb = Playback::new(&[Tile::Red, Tile::Blue, Tile::Green], start, STEP);

        assert_eq!(pb.poll(start + STEP), Some(Tile::Red));
        assert_eq!(pb.poll(start + STEP), None);
        assert_eq!(pb.poll(start + STEP * 2), Some(Tile::Blue));
        assert!(!pb.is_finished());
        assert_eq!(pb.poll(start + STEP * 3), Some(Tile::Green));
        assert!(pb.is_finished());
        assert_eq!(pb.poll(start + STEP * 10), None);
    }

    #[test]
    fn a_late_poll_still_yields_one_cue_at_a_time() {
        let start = Instant::now();
        let mut pb = Playback::new(&[Tile::Yellow, Tile::Yellow], start, STEP);
        let late = start + STEP * 5;

        assert_eq!(pb.poll(late), Some(Tile::Yellow));
        assert_eq!(pb.progress(), (1, 2));
        assert_eq!(pb.poll(late), Some(Tile::Yellow));
        assert_eq!(pb.progress(), (2, 2));
    }

    #[test]
    fn empty_playback_is_finished_immediately() {
        let start = Instant::now();
        let mut pb = Playback::new(&[], start, STEP);
        assert!(pb.is_finished());
        assert_eq!(pb.poll(start + STEP), None);
    }
}
