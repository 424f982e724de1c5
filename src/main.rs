mod app;
mod error;
mod logging;

use std::io::{self, stdout};

use app::{Filed, Menu, Mode, Settings};
use clap::Parser;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tracing::{info, warn};

/// Simon in the terminal: watch the pads, then repeat the sequence.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// normal, sound-only, light-only or free-board
    #[arg(long)]
    mode: Option<Mode>,
    /// Milliseconds between cues while a sequence replays
    #[arg(long)]
    step_ms: Option<u64>,
    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
        settings.step_override = self.step_ms;
        settings.seed = self.seed;
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    match app::data_dir() {
        Ok(dir) => {
            if let Err(e) = logging::init(&dir) {
                eprintln!("{e}");
            }
        }
        Err(e) => eprintln!("{e}"),
    }

    let mut settings = Settings::load_or_default();
    args.apply(&mut settings);
    info!(?settings, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnableMouseCapture)?;

    let mut terminal = ratatui::init();

    let app_result = Menu::new(settings).run(&mut terminal);

    // Restore terminal settings
    execute!(stdout, DisableMouseCapture)?;
    disable_raw_mode()?;
    ratatui::restore();

    if let Err(e) = &app_result {
        warn!(error = %e, "exited with an error");
    }
    app_result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_overrides_saved_settings() {
        let args = Args::parse_from([
            "simon-cli",
            "--mode",
            "free-board",
            "--seed",
            "4",
            "--step-ms",
            "100",
        ]);
        let mut settings = Settings {
            mode: Mode::SoundOnly,
            step_ms: 450,
            ..Default::default()
        };
        args.apply(&mut settings);

        assert_eq!(settings.mode, Mode::FreeBoard);
        assert_eq!(settings.step_ms, 450);
        assert_eq!(settings.step_override, Some(100));
        assert_eq!(settings.step(), std::time::Duration::from_millis(100));
        assert_eq!(settings.seed, Some(4));
    }

    #[test]
    fn unknown_mode_is_rejected_on_the_command_line() {
        let result = Args::try_parse_from(["simon-cli", "--mode", "strobe"]);
        assert!(result.is_err());
    }
}
