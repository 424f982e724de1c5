use super::playback::Playback;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Before the first game or after a loss. The board is inert.
    #[default]
    Idle,
    /// Cues are replaying.
    Animating(Playback),
    AwaitingInput,
}

impl State {
    pub fn is_idle(&self) -> bool {
        matches!(self, State::Idle)
    }

    pub fn is_animating(&self) -> bool {
        matches!(self, State::Animating(_))
    }
}

/// What a single tile activation led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The board was not accepting input.
    Ignored,
    /// Correct so far, more tiles expected.
    Continue,
    RoundComplete,
    Lost,
}
