use unicode_segmentation::UnicodeSegmentation;

use crate::error::CrosswordError;

/// Prefix of a cell's rendered id (`cell-<id>`)
pub const CELL_ID_PREFIX: &str = "cell";

/// Longest text, in graphemes, a cell field can hold
pub const TEXT_MAX_LEN: usize = 5;

/// Edit state of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellType {
    /// Solid block
    Filled,
    /// Blank space, not part of the puzzle
    Empty,
    /// Editable cell with a hint label and text
    #[default]
    Text,
}

impl CellType {
    /// Next state in the type-mode cycle
    pub fn next(self) -> Self {
        match self {
            CellType::Filled => CellType::Empty,
            CellType::Empty => CellType::Text,
            CellType::Text => CellType::Filled,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CellType::Filled => "filled",
            CellType::Empty => "empty",
            CellType::Text => "text",
        }
    }
}

/// One grid position.
///
/// `hint_num` and `text` survive type changes: a filled or empty cell keeps
/// them so they reappear once the cell is editable again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub id: usize,
    pub cell_type: CellType,
    pub hint_num: Option<u32>,
    pub text: String,
}

impl Cell {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            cell_type: CellType::Text,
            hint_num: None,
            text: String::new(),
        }
    }

    pub fn rendered_id(&self) -> String {
        format!("{}-{}", CELL_ID_PREFIX, self.id)
    }

    /// Convert a rendered id (`cell-42`) back to the numeric id.
    ///
    /// Only the last `-` separated token is read, so prefixes may contain
    /// separators of their own.
    pub fn parse_id(rendered: &str) -> Result<usize, CrosswordError> {
        rendered
            .rsplit('-')
            .next()
            .and_then(|token| token.parse::<usize>().ok())
            .ok_or_else(|| CrosswordError::MalformedIdentifier(rendered.to_string()))
    }
}

/// Cut `text` down to at most `TEXT_MAX_LEN` graphemes
pub fn clamp_text(text: &str) -> String {
    text.graphemes(true).take(TEXT_MAX_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_defaults() {
        let cell = Cell::new(3);
        assert_eq!(cell.id, 3);
        assert_eq!(cell.cell_type, CellType::Text);
        assert_eq!(cell.hint_num, None);
        assert!(cell.text.is_empty());
        assert_eq!(cell.rendered_id(), "cell-3");
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(Cell::parse_id("cell-42"), Ok(42));
        assert_eq!(Cell::parse_id("cell-7-extra-9"), Ok(9));
        assert_eq!(Cell::parse_id("17"), Ok(17));
    }

    #[test]
    fn test_parse_id_malformed() {
        for bad in ["cell-", "cell-x", "cell-4a", ""] {
            assert_eq!(
                Cell::parse_id(bad),
                Err(CrosswordError::MalformedIdentifier(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_type_cycle() {
        assert_eq!(CellType::Filled.next(), CellType::Empty);
        assert_eq!(CellType::Empty.next(), CellType::Text);
        assert_eq!(CellType::Text.next(), CellType::Filled);
    }

    #[test]
    fn test_clamp_text_counts_graphemes() {
        assert_eq!(clamp_text("CROSSWORD"), "CROSS");
        assert_eq!(clamp_text("CAT"), "CAT");
        assert_eq!(clamp_text("e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}e"), "e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}");
    }
}
