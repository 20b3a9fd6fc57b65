use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Row-major symbol grid, indexed `[[row, col]]`.
pub type SymbolGrid = Array2<Symbol>;

/// Row-major solution grid aligned with a pattern, indexed `[[row, col]]`.
pub type SolutionGrid = Array2<SolutionMark>;

/// Symbols shared by board windows and rule patterns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum Symbol {
    /// Pattern wildcard, matches anything.
    Any,
    /// Revealed space forced to zero.
    Cleared,
    Unknown,
    Flag,
    Number(u8),
    OffBoard,
}

impl TryFrom<char> for Symbol {
    type Error = UiError;

    fn try_from(value: char) -> Result<Self> {
        Ok(match value {
            ' ' => Self::Any,
            '-' => Self::Cleared,
            '?' => Self::Unknown,
            'F' => Self::Flag,
            'E' => Self::OffBoard,
            '0'..='8' => Self::Number(value as u8 - b'0'),
            other => return Err(UiError::UnsupportedSymbol(other)),
        })
    }
}

impl From<Symbol> for char {
    fn from(value: Symbol) -> Self {
        match value {
            Symbol::Any => ' ',
            Symbol::Cleared => '-',
            Symbol::Unknown => '?',
            Symbol::Flag => 'F',
            Symbol::OffBoard => 'E',
            Symbol::Number(count) => char::from(b'0' + count.min(8)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum SolutionMark {
    Nothing,
    Click,
    Mine,
}

impl TryFrom<char> for SolutionMark {
    type Error = UiError;

    fn try_from(value: char) -> Result<Self> {
        match value {
            '+' => Ok(Self::Click),
            'X' => Ok(Self::Mine),
            // solutions may echo the pattern underneath
            other => Symbol::try_from(other).map(|_| Self::Nothing),
        }
    }
}

impl From<SolutionMark> for char {
    fn from(value: SolutionMark) -> Self {
        match value {
            SolutionMark::Nothing => ' ',
            SolutionMark::Click => '+',
            SolutionMark::Mine => 'X',
        }
    }
}

/// Anything that can answer "what does the player see at this coordinate".
pub trait SymbolSource {
    fn board_size(&self) -> Coord2;

    /// Symbol for an in-bounds coordinate.
    fn symbol_at(&self, coords: Coord2) -> Result<Symbol>;
}

/// Rotates a grid one quarter turn clockwise: an R×C grid becomes C×R with
/// `new[i][j] = old[R-1-j][i]`.
pub fn rotate<T: Clone>(grid: &Array2<T>) -> Array2<T> {
    let (rows, cols) = grid.dim();
    Array2::from_shape_fn((cols, rows), |(i, j)| grid[[rows - 1 - j, i]].clone())
}

/// Builds a row-major grid from text rows of equal length.
pub fn parse_rows<T, S: AsRef<str>>(rows: &[S]) -> Result<Array2<T>>
where
    T: TryFrom<char, Error = UiError>,
{
    let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
    let mut cells = Vec::with_capacity(width * rows.len());
    for row in rows {
        let before = cells.len();
        for ch in row.as_ref().chars() {
            cells.push(T::try_from(ch)?);
        }
        if cells.len() - before != width {
            return Err(UiError::RuleShape);
        }
    }
    Array2::from_shape_vec((rows.len(), width), cells).map_err(|_| UiError::RuleShape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(rows: usize, cols: usize) -> Array2<u32> {
        Array2::from_shape_fn((rows, cols), |(r, c)| (r * cols + c) as u32)
    }

    #[test]
    fn quarter_turn_is_clockwise() {
        let grid = letters(2, 3);
        let turned = rotate(&grid);

        assert_eq!(turned.dim(), (3, 2));
        assert_eq!(turned[[0, 0]], grid[[1, 0]]);
        assert_eq!(turned[[0, 1]], grid[[0, 0]]);
        assert_eq!(turned[[2, 1]], grid[[0, 2]]);
    }

    #[test]
    fn four_turns_are_identity() {
        for (rows, cols) in [(1, 1), (3, 3), (2, 5), (5, 5), (4, 1)] {
            let grid = letters(rows, cols);
            let back = (0..4).fold(grid.clone(), |acc, _| rotate(&acc));
            assert_eq!(back, grid);
        }
    }

    #[test]
    fn parse_rejects_unknown_symbols_and_ragged_rows() {
        assert_eq!(
            parse_rows::<Symbol, _>(&["1?", "Z "]),
            Err(UiError::UnsupportedSymbol('Z'))
        );
        assert_eq!(
            parse_rows::<Symbol, _>(&["1?", "?"]),
            Err(UiError::RuleShape)
        );
    }

    #[test]
    fn symbols_round_trip_through_chars() {
        let grid: SymbolGrid = parse_rows(&["E?F", "-3 "]).unwrap();
        assert_eq!(grid[[0, 0]], Symbol::OffBoard);
        assert_eq!(grid[[1, 1]], Symbol::Number(3));
        assert_eq!(char::from(grid[[1, 2]]), ' ');
    }

    #[test]
    fn solution_marks_accept_pattern_echo() {
        let grid: SolutionGrid = parse_rows(&["+X", "1?"]).unwrap();
        assert_eq!(grid[[0, 0]], SolutionMark::Click);
        assert_eq!(grid[[0, 1]], SolutionMark::Mine);
        assert_eq!(grid[[1, 0]], SolutionMark::Nothing);
    }
}
