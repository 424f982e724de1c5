use std::fmt::Display;

use ratatui::style::Color;

use crate::error::Error;

/// One of the four coloured pads. The discriminant is the tile id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Green = 1,
    Red = 2,
    Yellow = 3,
    Blue = 4,
}

impl Tile {
    /// Board order: top-left, top-right, bottom-left, bottom-right.
    pub const ALL: [Tile; 4] = [Tile::Green, Tile::Red, Tile::Yellow, Tile::Blue];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn color(self) -> Color {
        match self {
            Tile::Green => Color::LightGreen,
            Tile::Red => Color::LightRed,
            Tile::Yellow => Color::LightYellow,
            Tile::Blue => Color::LightBlue,
        }
    }

    pub fn dim_color(self) -> Color {
        match self {
            Tile::Green => Color::Green,
            Tile::Red => Color::Red,
            Tile::Yellow => Color::Yellow,
            Tile::Blue => Color::Blue,
        }
    }

    // the classic pad tones
    pub fn tone(self) -> &'static str {
        match self {
            Tile::Green => "E4",
            Tile::Red => "A4",
            Tile::Yellow => "C#5",
            Tile::Blue => "E5",
        }
    }

    pub fn from_key(ch: char) -> Option<Self> {
        let id = ch.to_digit(10)?;
        Self::try_from(id as u8).ok()
    }
}

impl TryFrom<u8> for Tile {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tile::Green),
            2 => Ok(Tile::Red),
            3 => Ok(Tile::Yellow),
            4 => Ok(Tile::Blue),
            other => Err(Error::UnknownTile(other)),
        }
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tile::Green => "green",
            Tile::Red => "red",
            Tile::Yellow => "yellow",
            Tile::Blue => "blue",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_board_order() {
        let ids: Vec<u8> = Tile::ALL.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn rejects_ids_outside_the_board() {
        assert!(matches!(Tile::try_from(0), Err(Error::UnknownTile(0))));
        assert!(matches!(Tile::try_from(5), Err(Error::UnknownTile(5))));
    }

    #[test]
    fn only_digit_keys_one_to_four_map_to_tiles() {
        assert_eq!(Tile::from_key('1'), Some(Tile::Green));
        assert_eq!(Tile::from_key('4'), Some(Tile::Blue));
        assert_eq!(Tile::from_key('0'), None);
        assert_eq!(Tile::from_key('5'), None);
        assert_eq!(Tile::from_key('x'), None);
    }
}
