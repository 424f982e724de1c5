mod board;
mod mode;
mod playback;
mod session;
mod state;
mod tile;

pub use mode::Mode;

use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use board::{Board, hit_test, tile_rects};
use rand::rngs::StdRng;
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::{
        event::{self, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
        execute,
        style::Print,
    },
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style, Styled, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use session::{RandomCues, Session};
use state::{Outcome, State};
use tile::Tile;
use tracing::{info, warn};

use super::{Filed, Game, Settings, savestate::Scoreboard};

// how long to wait for terminal events before advancing playback
const TICK: Duration = Duration::from_millis(20);

pub struct Simon {
    exit: bool,
    session: Session<Board, RandomCues<StdRng>>,
    scoreboard: Scoreboard,
    scoreboard_file: Option<PathBuf>,
}

impl Simon {
    fn new(settings: &Settings) -> Self {
        let cues = match settings.seed {
            Some(seed) => RandomCues::seeded(seed),
            None => RandomCues::from_os_rng(),
        };

        Self {
            exit: false,
            session: Session::new(
                Board::new(settings.light()),
                cues,
                settings.step(),
                settings.mode,
            ),
            scoreboard: Scoreboard::load_or_default(),
            scoreboard_file: Scoreboard::save_file().ok(),
        }
    }

    fn start(&mut self) {
        self.session.start_game(Instant::now());
    }

    fn click(&mut self, tile: Tile) {
        if self.session.accepts_input() {
            let mode = self.session.mode();
            self.session.presenter_mut().press(tile, mode);
        }

        if self.session.register_click(tile, Instant::now()) == Outcome::Lost {
            self.record();
        }
    }

    fn record(&mut self) {
        let score = self.session.score();
        self.scoreboard.update(score);
        info!(score, best = self.scoreboard.best, "score recorded");

        let Some(path) = &self.scoreboard_file else {
            warn!("no data directory, scoreboard not saved");
            return;
        };
        if let Err(e) = self.scoreboard.save_to(path) {
            warn!(error = %e, "could not save scoreboard");
        }
    }

    fn cycle_mode(&mut self) {
        self.session.set_mode(self.session.mode().next());
    }

    fn key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
            KeyCode::Enter | KeyCode::Char('s') => self.start(),
            KeyCode::Char('m') => self.cycle_mode(),
            KeyCode::Char(ch) => {
                if let Some(tile) = Tile::from_key(ch) {
                    self.click(tile);
                }
            }
            _ => (),
        }
    }

    fn mouse_event(&mut self, mouse: MouseEvent, area: Rect) {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return;
        };

        let board = layout(area)[2];
        if let Some(tile) = hit_test(board, mouse.column, mouse.row) {
            self.click(tile);
        }
    }
}

/// Title, playing field, the pads inside it and the status rows.
fn layout(area: Rect) -> [Rect; 4] {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Board
            Constraint::Length(4), // Status
        ])
        .split(area);

    let board = vert[1].inner(Margin {
        horizontal: 1,
        vertical: 1,
    });

    [vert[0], vert[1], board, vert[2]]
}

impl Game for Simon {
    fn run(terminal: &mut DefaultTerminal, settings: &mut Settings) -> io::Result<()> {
        let mut game = Self::new(settings);

        while !game.exit {
            terminal.draw(|frame| game.draw(frame))?;
            game.handle_input(terminal)?;
            game.session.tick(Instant::now());

            if game.session.presenter_mut().take_bell() {
                execute!(io::stdout(), Print('\x07'))?;
            }
        }

        settings.mode = game.session.mode();
        Ok(())
    }

    fn handle_input(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        if event::poll(TICK)? {
            match event::read()? {
                event::Event::Key(key) => self.key_event(key),
                event::Event::Mouse(mouse) => {
                    let area = terminal.get_frame().area();
                    self.mouse_event(mouse, area);
                }
                _ => (),
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &Simon {
    fn render(self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer)
    where
        Self: Sized,
    {
        let [title, field, board_area, status] = layout(area);
        let now = Instant::now();
        let board = self.session.presenter();

        Paragraph::new(Span::from("Simon").fg(Color::Red))
            .centered()
            .block(Block::bordered().border_set(border::DOUBLE))
            .render(title, buf);

        let field_title = match self.session.state() {
            State::Idle => "╡ Idle ╞".to_owned(),
            State::Animating(playback) => {
                let (played, total) = playback.progress();
                format!("╡ Watch.. {played}/{total} ╞")
            }
            State::AwaitingInput => format!(
                "╡ Your turn {}/{} ╞",
                self.session.sequence().len() - self.session.pending().len(),
                self.session.sequence().len()
            ),
        };
        Block::bordered()
            .border_set(border::DOUBLE)
            .title(field_title)
            .render(field, buf);

        let lit = board.lit_tile(now);
        for (tile, rect) in tile_rects(board_area) {
            render_tile(tile, rect, lit == Some(tile), board.hoverable(), buf);
        }

        render_status(self, board, now, status, buf);
    }
}

fn render_tile(
    tile: Tile,
    area: Rect,
    lit: bool,
    hoverable: bool,
    buf: &mut ratatui::prelude::Buffer,
) {
    let inner = area.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });

    if lit {
        Block::bordered()
            .border_set(border::QUADRANT_INSIDE)
            .set_style(Style::default().fg(tile.color()))
            .render(area, buf);
        Block::new()
            .set_style(Style::default().bg(tile.color()))
            .render(inner, buf);
    } else {
        let set = if hoverable {
            border::THICK
        } else {
            border::PLAIN
        };
        Block::bordered()
            .border_set(set)
            .set_style(Style::default().fg(tile.dim_color()))
            .render(area, buf);
    }

    let label = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner)[1];
    let style = if lit {
        Style::default().fg(Color::Black).bg(tile.color())
    } else {
        Style::default().fg(tile.dim_color())
    };
    Paragraph::new(tile.id().to_string())
        .centered()
        .set_style(style)
        .render(label, buf);
}

fn render_status(
    game: &Simon,
    board: &Board,
    now: Instant,
    area: Rect,
    buf: &mut ratatui::prelude::Buffer,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let tone = match board.tone(now) {
        Some(tile) => Span::from(format!("♪ {}", tile.tone())).fg(tile.color()),
        None => Span::from("   "),
    };
    Paragraph::new(Line::from(vec![
        Span::from(format!("Round: {}", board.round())),
        Span::from("   "),
        Span::from(format!("Mode: {}", game.session.mode().label())),
        Span::from("   "),
        tone,
    ]))
    .centered()
    .render(rows[0], buf);

    if board.loss_visible() {
        Paragraph::new(
            Span::from(format!(
                "You lose! You completed {} round(s). ENTER to play again.",
                game.session.score()
            ))
            .fg(Color::LightRed),
        )
        .centered()
        .render(rows[1], buf);
    } else if game.session.state().is_idle() {
        Paragraph::new("Press ENTER to start...")
            .centered()
            .render(rows[1], buf);
    } else if game.session.state().is_animating() && !game.session.accepts_input() {
        Paragraph::new("Watch the pads...")
            .centered()
            .render(rows[1], buf);
    }

    let scores = &game.scoreboard;
    let last = scores
        .last_played
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_owned());
    Paragraph::new(format!(
        "Best: {}   Avg: {:.1}   Games: {}   Last played: {}",
        scores.best, scores.avg_score, scores.num_entries, last
    ))
    .centered()
    .set_style(Color::DarkGray)
    .render(rows[2], buf);

    Paragraph::new("1-4/click pads · ENTER/'s' start · 'm' mode · Esc/'q' back")
        .centered()
        .set_style(Color::DarkGray)
        .render(rows[3], buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(mode: Mode, seed: u64) -> Simon {
        Simon {
            exit: false,
            session: Session::new(
                Board::new(Duration::from_millis(300)),
                RandomCues::seeded(seed),
                Duration::from_millis(600),
                mode,
            ),
            scoreboard: Scoreboard::default(),
            scoreboard_file: None,
        }
    }

    fn mouse_down(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: event::KeyModifiers::NONE,
        }
    }

    #[test]
    fn clicks_off_the_pads_never_reach_the_game() {
        let mut g = game(Mode::Normal, 1);
        let now = Instant::now();
        g.session.start_game(now);
        g.session.tick(now + g.session.step());
        assert!(g.session.accepts_input());

        let area = Rect::new(0, 0, 80, 30);
        g.mouse_event(mouse_down(0, 0), area);
        g.mouse_event(mouse_down(79, 29), area);

        assert_eq!(g.session.pending().len(), 1);
        assert!(g.session.is_active());
    }

    #[test]
    fn clicking_the_right_pad_advances_the_round() {
        let mut g = game(Mode::Normal, 3);
        let now = Instant::now();
        g.session.start_game(now);
        g.session.tick(now + g.session.step());

        let area = Rect::new(0, 0, 80, 30);
        let expected = g.session.sequence()[0];
        let (_, rect) = tile_rects(layout(area)[2])
            .into_iter()
            .find(|(tile, _)| *tile == expected)
            .unwrap();
        g.mouse_event(mouse_down(rect.x + 1, rect.y + 1), area);

        assert_eq!(g.session.round(), 2);
    }

    #[test]
    fn right_clicks_and_stray_keys_are_ignored() {
        let mut g = game(Mode::Normal, 5);
        let now = Instant::now();
        g.session.start_game(now);
        g.session.tick(now + g.session.step());

        let area = Rect::new(0, 0, 80, 30);
        let (_, rect) = tile_rects(layout(area)[2])[0];
        let mut right = mouse_down(rect.x + 1, rect.y + 1);
        right.kind = MouseEventKind::Down(MouseButton::Right);
        g.mouse_event(right, area);
        g.key_event(KeyEvent::from(KeyCode::Char('9')));

        assert_eq!(g.session.pending().len(), 1);
        assert!(g.session.is_active());
    }

    #[test]
    fn a_wrong_key_loses_and_records_the_score() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Scoreboard.json");
        let mut g = game(Mode::Normal, 11);
        g.scoreboard_file = Some(path.clone());

        let now = Instant::now();
        g.session.start_game(now);
        g.session.tick(now + g.session.step());

        let expected = g.session.sequence()[0];
        let wrong = Tile::ALL.into_iter().find(|t| *t != expected).unwrap();
        let key = char::from(b'0' + wrong.id());
        g.key_event(KeyEvent::from(KeyCode::Char(key)));

        assert!(g.session.state().is_idle());
        assert!(g.session.presenter().loss_visible());
        assert_eq!(g.session.presenter().round(), 0);
        assert_eq!(g.scoreboard.num_entries, 1);
        assert_eq!(g.scoreboard.best, 0);

        let saved = Scoreboard::load_from(&path).unwrap();
        assert_eq!(saved, g.scoreboard);
    }

    #[test]
    fn a_lost_game_ignores_further_presses() {
        let mut g = game(Mode::FreeBoard, 11);
        let now = Instant::now();
        g.session.start_game(now);
        g.session.tick(now + g.session.step());

        let expected = g.session.sequence()[0];
        let wrong = Tile::ALL.into_iter().find(|t| *t != expected).unwrap();
        g.click(wrong);
        g.click(expected);

        assert_eq!(g.scoreboard.num_entries, 1);
        assert!(g.session.state().is_idle());
    }

    #[test]
    fn mode_key_cycles_without_touching_the_game() {
        let mut g = game(Mode::Normal, 8);
        g.session.start_game(Instant::now());
        let sequence = g.session.sequence().to_vec();

        g.key_event(KeyEvent::from(KeyCode::Char('m')));
        assert_eq!(g.session.mode(), Mode::SoundOnly);
        assert_eq!(g.session.sequence(), sequence.as_slice());
        assert_eq!(g.session.round(), 1);
    }

    #[test]
    fn quitting_sets_exit() {
        let mut g = game(Mode::Normal, 0);
        g.key_event(KeyEvent::from(KeyCode::Esc));
        assert!(g.exit);
    }
}
