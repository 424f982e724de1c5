use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, trace};

use super::{
    mode::Mode,
    playback::Playback,
    state::{Outcome, State},
    tile::Tile,
};

/// Everything the game asks of the screen. The session never draws or
/// plays anything itself.
pub trait Presenter {
    fn present_cue(&mut self, tile: Tile, mode: Mode);
    fn bind_input(&mut self);
    fn unbind_input(&mut self);
    fn show_loss_indicator(&mut self);
    fn hide_loss_indicator(&mut self);
    fn display_round(&mut self, round: u32);
}

/// Where new cues come from.
pub trait CueSource {
    fn next_tile(&mut self) -> Tile;
}

/// Uniform draw over the four tiles.
#[derive(Debug, Clone)]
pub struct RandomCues<R>(R);

impl RandomCues<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl<R: Rng> CueSource for RandomCues<R> {
    fn next_tile(&mut self) -> Tile {
        Tile::ALL[self.0.random_range(0..Tile::ALL.len())]
    }
}

/// One player's game: the cue sequence, the part of it still expected,
/// and the lock/unlock discipline around playback.
#[derive(Debug)]
pub struct Session<P, C> {
    sequence: Vec<Tile>,
    pending: VecDeque<Tile>,
    round: u32,
    active: bool,
    mode: Mode,
    state: State,
    input_bound: bool,
    step: Duration,

    presenter: P,
    cues: C,
}

impl<P: Presenter, C: CueSource> Session<P, C> {
    pub fn new(presenter: P, cues: C, step: Duration, mode: Mode) -> Self {
        Self {
            sequence: Vec::new(),
            pending: VecDeque::new(),
            round: 0,
            active: true,
            mode,
            state: State::Idle,
            input_bound: false,
            step,
            presenter,
            cues,
        }
    }

    /// Throws away any game in progress and plays the first cue.
    pub fn start_game(&mut self, now: Instant) {
        self.reset();
        info!(mode = %self.mode, "game started");
        self.new_round(now);
    }

    fn reset(&mut self) {
        self.unbind_input();
        self.sequence.clear();
        self.pending.clear();
        self.round = 0;
        self.active = true;
        self.presenter.hide_loss_indicator();
    }

    pub fn new_round(&mut self, now: Instant) {
        self.round += 1;
        self.presenter.display_round(self.round);

        let tile = self.cues.next_tile();
        self.sequence.push(tile);
        self.pending = self.sequence.iter().copied().collect();

        debug!(round = self.round, %tile, "new round");
        self.state = State::Animating(Playback::new(&self.sequence, now, self.step));
    }

    /// Advances playback. Returns the cue presented on this tick, if any.
    pub fn tick(&mut self, now: Instant) -> Option<Tile> {
        let State::Animating(playback) = &mut self.state else {
            return None;
        };

        let tile = playback.poll(now)?;
        let finished = playback.is_finished();

        trace!(%tile, "cue");
        self.presenter.present_cue(tile, self.mode);

        if finished {
            self.state = State::AwaitingInput;
            self.bind_input();
        }
        Some(tile)
    }

    pub fn accepts_input(&self) -> bool {
        self.input_bound && !self.state.is_idle()
    }

    pub fn register_click(&mut self, tile: Tile, now: Instant) -> Outcome {
        if !self.accepts_input() {
            trace!(%tile, "click ignored");
            return Outcome::Ignored;
        }

        let expected = self.pending.pop_front();
        self.active = expected == Some(tile);
        trace!(%tile, ?expected, "click");

        self.check_outcome(now)
    }

    fn check_outcome(&mut self, now: Instant) -> Outcome {
        if self.pending.is_empty() && self.active {
            self.unbind_input();
            self.new_round(now);
            Outcome::RoundComplete
        } else if !self.active {
            self.unbind_input();
            self.end_game();
            Outcome::Lost
        } else {
            Outcome::Continue
        }
    }

    pub fn end_game(&mut self) {
        info!(round = self.round, score = self.score(), "game lost");
        self.presenter.show_loss_indicator();
        self.presenter.display_round(0);
        self.state = State::Idle;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        debug!(%mode, "mode changed");
        self.mode = mode;
    }

    fn bind_input(&mut self) {
        self.input_bound = true;
        self.presenter.bind_input();
    }

    fn unbind_input(&mut self) {
        if self.mode.keeps_input_bound() {
            return;
        }
        self.input_bound = false;
        self.presenter.unbind_input();
    }

    /// Rounds completed in the current or last game.
    pub fn score(&self) -> u32 {
        self.round.saturating_sub(1)
    }

    pub fn sequence(&self) -> &[Tile] {
        &self.sequence
    }

    pub fn pending(&self) -> &VecDeque<Tile> {
        &self.pending
    }

    #[cfg(test)]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    #[cfg(test)]
    pub fn input_bound(&self) -> bool {
        self.input_bound
    }

    #[cfg(test)]
    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}
