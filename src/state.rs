use std::fmt;
use std::str::FromStr;

use crate::error::CrosswordError;

pub const GRID_ROWS: usize = 7;
pub const GRID_COLS: usize = 6;

/// Largest accepted row or column count
pub const MAX_GRID_DIM: usize = 100;

/// Prefix shared by the three mode buttons (`button-edit-char`, ...).
pub const MODE_BUTTON_PREFIX: &str = "button-edit-";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position of a row-major cell id in a grid `cols` wide
    pub fn from_id(id: usize, cols: usize) -> Self {
        Self::new(id / cols, id % cols)
    }

    /// Row-major cell id of this position in a grid `cols` wide
    pub fn to_id(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}

/// Global interaction mode of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Clicking a cell edits its letters
    #[default]
    Char,
    /// Clicking a cell cycles it between solid, empty and editable
    Type,
    /// Clicking a cell edits its hint number
    Hint,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Char, Mode::Type, Mode::Hint];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Char => "char",
            Mode::Type => "type",
            Mode::Hint => "hint",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mode::Char => "Click on a cell to edit its text content.",
            Mode::Type => "Click on a cell to toggle between solid, empty and editable state.",
            Mode::Hint => "Click on a cell to add or edit the hint number it contains.",
        }
    }

    pub fn button_id(&self) -> String {
        format!("{}{}", MODE_BUTTON_PREFIX, self.name())
    }

    /// Resolve a mode button id, or a bare mode name
    pub fn from_button_id(id: &str) -> Result<Self, CrosswordError> {
        id.strip_prefix(MODE_BUTTON_PREFIX).unwrap_or(id).parse()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = CrosswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "char" => Ok(Mode::Char),
            "type" => Ok(Mode::Type),
            "hint" => Ok(Mode::Hint),
            other => Err(CrosswordError::InvalidModeRequest(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_round_trip() {
        let pos = CellPosition::from_id(13, GRID_COLS);
        assert_eq!(pos, CellPosition::new(2, 1));
        assert_eq!(pos.to_id(GRID_COLS), 13);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("hint".parse::<Mode>(), Ok(Mode::Hint));
        assert_eq!(
            "letters".parse::<Mode>(),
            Err(CrosswordError::InvalidModeRequest("letters".to_string()))
        );
    }

    #[test]
    fn test_mode_button_ids() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_button_id(&mode.button_id()), Ok(mode));
        }
        assert_eq!(Mode::from_button_id("type"), Ok(Mode::Type));
        assert!(Mode::from_button_id("button-edit-").is_err());
    }

    #[test]
    fn test_default_mode_is_char() {
        assert_eq!(Mode::default(), Mode::Char);
    }
}
