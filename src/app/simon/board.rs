use std::time::{Duration, Instant};

use ratatui::layout::{Constraint, Direction, Flex, Layout, Position, Rect};

use super::{mode::Mode, session::Presenter, tile::Tile};

pub const TILE_HEIGHT: u16 = 7;
pub const TILE_WIDTH: u16 = TILE_HEIGHT * 2 + 2;
const GAP: u16 = 1;

/// What the terminal shows: which pad is lit, which tone is sounding, the
/// round label and whether the pads take clicks.
#[derive(Debug, Clone)]
pub struct Board {
    lit: Option<(Tile, Instant)>,
    tone: Option<(Tile, Instant)>,
    bell: bool,
    loss_visible: bool,
    round: u32,
    hoverable: bool,
    light: Duration,
}

impl Board {
    pub fn new(light: Duration) -> Self {
        Self {
            lit: None,
            tone: None,
            bell: false,
            loss_visible: false,
            round: 0,
            hoverable: false,
            light,
        }
    }

    /// Feedback for the player's own press. The pad always lights up,
    /// the tone follows the mode.
    pub fn press(&mut self, tile: Tile, mode: Mode) {
        let now = Instant::now();
        self.lit = Some((tile, now));
        if mode.plays_sound() {
            self.sound(tile, now);
        }
    }

    fn sound(&mut self, tile: Tile, now: Instant) {
        self.tone = Some((tile, now));
        self.bell = true;
    }

    pub fn lit_tile(&self, now: Instant) -> Option<Tile> {
        self.fresh(self.lit, now)
    }

    pub fn tone(&self, now: Instant) -> Option<Tile> {
        self.fresh(self.tone, now)
    }

    fn fresh(&self, slot: Option<(Tile, Instant)>, now: Instant) -> Option<Tile> {
        let (tile, at) = slot?;
        (now.saturating_duration_since(at) < self.light).then_some(tile)
    }

    /// True once per sounded tone.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }

    pub fn loss_visible(&self) -> bool {
        self.loss_visible
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn hoverable(&self) -> bool {
        self.hoverable
    }
}

impl Presenter for Board {
    fn present_cue(&mut self, tile: Tile, mode: Mode) {
        let now = Instant::now();
        if mode.shows_light() {
            self.lit = Some((tile, now));
        }
        if mode.plays_sound() {
            self.sound(tile, now);
        }
    }

    fn bind_input(&mut self) {
        self.hoverable = true;
    }

    fn unbind_input(&mut self) {
        self.hoverable = false;
    }

    fn show_loss_indicator(&mut self) {
        self.loss_visible = true;
    }

    fn hide_loss_indicator(&mut self) {
        self.loss_visible = false;
    }

    fn display_round(&mut self, round: u32) {
        self.round = round;
    }
}

/// The four pads centred in `area`, in board order.
pub fn tile_rects(area: Rect) -> [(Tile, Rect); 4] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .flex(Flex::Center)
        .constraints([
            Constraint::Length(TILE_HEIGHT), // Top
            Constraint::Length(GAP),         // ---
            Constraint::Length(TILE_HEIGHT), // Bot
        ])
        .split(area);

    let cols = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .flex(Flex::Center)
            .constraints([
                Constraint::Length(TILE_WIDTH), // Left
                Constraint::Length(GAP * 2),    // ---
                Constraint::Length(TILE_WIDTH), // Right
            ])
            .split(row)
    };

    let top = cols(rows[0]);
    let bot = cols(rows[2]);

    [
        (Tile::Green, top[0]),
        (Tile::Red, top[2]),
        (Tile::Yellow, bot[0]),
        (Tile::Blue, bot[2]),
    ]
}

/// Maps a mouse position to a pad. Anything off the pads is not a tile.
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<Tile> {
    let pos = Position::new(column, row);
    tile_rects(area)
        .into_iter()
        .find(|(_, rect)| rect.contains(pos))
        .map(|(tile, _)| tile)
}
