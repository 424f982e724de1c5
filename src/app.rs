mod savestate;
mod settings;
mod simon;

pub use settings::Settings;
pub use simon::Mode;

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::BaseDirs;
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, KeyCode, KeyEventKind},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Styled},
    symbols::border,
    text::Line,
    widgets::{Block, Paragraph, Widget},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{Error, Result};

const DIR_NAME: &str = "SimonCLI";
pub const DATA_DIR_ENV: &str = "SIMON_DATA_DIR";

pub trait Game {
    fn run(terminal: &mut DefaultTerminal, settings: &mut Settings) -> io::Result<()>;
    fn handle_input(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()>;
    fn draw(&self, frame: &mut Frame);
}

/// Where everything we write lives. `SIMON_DATA_DIR` wins over the
/// platform data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let dirs = BaseDirs::new().ok_or(Error::NoDataDir)?;
    Ok(dirs.data_dir().join(DIR_NAME))
}

/// A value persisted as `<data dir>/<NAME>.json`.
pub trait Filed: Serialize + DeserializeOwned + Default {
    const NAME: &'static str;

    fn save_file() -> Result<PathBuf> {
        Ok(data_dir()?.join(format!("{}.json", Self::NAME)))
    }

    fn load() -> Result<Self> {
        Self::load_from(&Self::save_file()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Missing files are normal on a first run; anything else is logged.
    fn load_or_default() -> Self {
        match Self::load() {
            Ok(value) => value,
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!(name = Self::NAME, "no save file yet");
                Self::default()
            }
            Err(e) => {
                warn!(name = Self::NAME, error = %e, "could not load save file, using defaults");
                Self::default()
            }
        }
    }

    fn save(&self) -> Result<()> {
        self.save_to(&Self::save_file()?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Start screen: pick a mode on a 2x2 grid, Enter to play.
pub struct Menu {
    exit: bool,
    index: usize,
    settings: Settings,
}

impl Menu {
    pub fn new(settings: Settings) -> Self {
        let index = Mode::ALL
            .iter()
            .position(|&mode| mode == settings.mode)
            .unwrap_or_default();
        Self {
            exit: false,
            index,
            settings,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        while !self.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_input(terminal)?;
        }

        if let Err(e) = self.settings.save() {
            warn!(error = %e, "could not save settings");
        }
        Ok(())
    }

    fn handle_input(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        if event::poll(Duration::from_millis(250))? {
            if let event::Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
                    KeyCode::Enter | KeyCode::Char(' ') => self.go(terminal)?,
                    KeyCode::Right => self.right(),
                    KeyCode::Left => self.left(),
                    KeyCode::Up => self.up(),
                    KeyCode::Down => self.down(),
                    _ => (),
                }
            }
        }
        Ok(())
    }

    fn go(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        self.settings.mode = Mode::ALL[self.index];
        simon::Simon::run(terminal, &mut self.settings)?;
        // the mode may have been cycled in game
        self.index = Mode::ALL
            .iter()
            .position(|&mode| mode == self.settings.mode)
            .unwrap_or(self.index);
        Ok(())
    }

    fn right(&mut self) {
        if self.index % 2 == 0 {
            self.index += 1;
        }
    }

    fn left(&mut self) {
        if self.index % 2 == 1 {
            self.index -= 1;
        }
    }

    fn down(&mut self) {
        if self.index < 2 {
            self.index += 2;
        }
    }

    fn up(&mut self) {
        if self.index >= 2 {
            self.index -= 2;
        }
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &Menu {
    fn render(self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer)
    where
        Self: Sized,
    {
        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // ---
                Constraint::Length(5), // Top
                Constraint::Length(5), // Bot
                Constraint::Min(0),    // ---
                Constraint::Length(1), // Help
            ])
            .split(area);

        let row = |area: Rect| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Min(0),         // ---
                    Constraint::Percentage(25), // Left
                    Constraint::Percentage(25), // Right
                    Constraint::Min(0),         // ---
                ])
                .split(area)
        };
        let top_row = row(vert[2]);
        let bot_row = row(vert[3]);

        // title
        Paragraph::new("Simon")
            .set_style(Color::Blue)
            .centered()
            .block(Block::bordered().border_set(border::DOUBLE))
            .render(vert[0], buf);

        let cells = [top_row[1], top_row[2], bot_row[1], bot_row[2]];
        for (i, (mode, cell)) in Mode::ALL.iter().zip(cells).enumerate() {
            widget(mode.label(), self.index == i, cell, buf);
        }

        Paragraph::new(Line::from("arrows to choose a mode · ENTER to play · Esc/'q' to quit"))
            .centered()
            .set_style(Color::DarkGray)
            .render(vert[5], buf);
    }
}

fn widget(text: &str, selected: bool, area: Rect, buf: &mut ratatui::prelude::Buffer) {
    let paragraph = Paragraph::new(text)
        .centered()
        .block(Block::bordered().border_set(border::THICK));
    if selected {
        paragraph.set_style(Color::LightRed).render(area, buf);
    } else {
        paragraph.render(area, buf);
    }
}
