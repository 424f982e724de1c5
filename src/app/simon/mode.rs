use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Presentation setting. Never affects the sequence or round logic.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Normal,
    SoundOnly,
    LightOnly,
    FreeBoard,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Normal, Mode::SoundOnly, Mode::LightOnly, Mode::FreeBoard];

    pub fn shows_light(self) -> bool {
        self != Mode::SoundOnly
    }

    pub fn plays_sound(self) -> bool {
        self != Mode::LightOnly
    }

    /// Free board keeps the tiles live while a sequence is playing.
    pub fn keeps_input_bound(self) -> bool {
        self == Mode::FreeBoard
    }

    pub fn next(self) -> Self {
        match self {
            Mode::Normal => Mode::SoundOnly,
            Mode::SoundOnly => Mode::LightOnly,
            Mode::LightOnly => Mode::FreeBoard,
            Mode::FreeBoard => Mode::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::SoundOnly => "sound-only",
            Mode::LightOnly => "light-only",
            Mode::FreeBoard => "free-board",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "Normal",
            Mode::SoundOnly => "Sound Only",
            Mode::LightOnly => "Light Only",
            Mode::FreeBoard => "Free Board",
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::UnknownMode(s.to_owned()))
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_four_known_names() {
        assert_eq!("normal".parse::<Mode>().unwrap(), Mode::Normal);
        assert_eq!("sound-only".parse::<Mode>().unwrap(), Mode::SoundOnly);
        assert_eq!("light-only".parse::<Mode>().unwrap(), Mode::LightOnly);
        assert_eq!("free-board".parse::<Mode>().unwrap(), Mode::FreeBoard);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "strobe".parse::<Mode>().unwrap_err();
        assert!(matches!(err, Error::UnknownMode(ref s) if s == "strobe"));
        assert!("Normal".parse::<Mode>().is_err());
    }

    #[test]
    fn presentation_flags() {
        assert!(!Mode::SoundOnly.shows_light());
        assert!(Mode::SoundOnly.plays_sound());
        assert!(Mode::LightOnly.shows_light());
        assert!(!Mode::LightOnly.plays_sound());
        assert!(Mode::FreeBoard.keeps_input_bound());
        assert!(!Mode::Normal.keeps_input_bound());
    }

    #[test]
    fn serde_uses_kebab_case_names() {
        let json = serde_json::to_string(&Mode::FreeBoard).unwrap();
        assert_eq!(json, "\"free-board\"");
        let back: Mode = serde_json::from_str("\"light-only\"").unwrap();
        assert_eq!(back, Mode::LightOnly);
    }

    #[test]
    fn cycling_visits_every_mode() {
        let mut mode = Mode::Normal;
        for expected in [Mode::SoundOnly, Mode::LightOnly, Mode::FreeBoard, Mode::Normal] {
            mode = mode.next();
            assert_eq!(mode, expected);
        }
    }
}
