//! Square board excerpts and the board/window coordinate transform shared by
//! every tip pane.

use ndarray::Array2;

use crate::*;

/// Window-local position `(x, y)`, i.e. `(col, row)` in the symbol grid.
pub type Local = (usize, usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Window {
    center: Coord2,
    radius: (usize, usize),
    symbols: SymbolGrid,
}

impl Window {
    /// Extracts a `size`×`size` excerpt centred on `center`. Positions off the
    /// board read as [`Symbol::OffBoard`].
    pub fn extract(source: &impl SymbolSource, center: Coord2, size: usize) -> Result<Self> {
        let board_size = source.board_size();
        if !in_bounds(center, board_size) {
            return Err(UiError::missing_cell(center.0, center.1));
        }

        let radius = (size / 2, size / 2);
        let mut symbols = Array2::from_elem((size, size), Symbol::OffBoard);
        for ((row, col), symbol) in symbols.indexed_iter_mut() {
            if let Some(coords) = to_board(center, radius, (col, row), board_size) {
                *symbol = source.symbol_at(coords)?;
            }
        }

        Ok(Self {
            center,
            radius,
            symbols,
        })
    }

    pub fn radius(&self) -> (usize, usize) {
        self.radius
    }

    pub fn size(&self) -> usize {
        self.symbols.nrows()
    }

    pub fn symbols(&self) -> &SymbolGrid {
        &self.symbols
    }

    pub fn symbol(&self, (x, y): Local) -> Symbol {
        self.symbols[[y, x]]
    }

    pub fn is_focus(&self, local: Local) -> bool {
        local == self.radius
    }

    /// Window-local position of a board coordinate, if it falls inside.
    pub fn to_local(&self, pos: Coord2) -> Option<Local> {
        to_local(self.center, self.radius, pos, self.size())
    }

    /// Whether any of `positions` maps onto `local`.
    pub fn hits(&self, positions: &[Position], local: Local) -> bool {
        positions
            .iter()
            .any(|pos| self.to_local(pos.coords()) == Some(local))
    }
}

/// `local = pos - center + radius` per axis, `None` when outside `0..size`.
pub fn to_local(center: Coord2, radius: (usize, usize), pos: Coord2, size: usize) -> Option<Local> {
    let axis = |p: Coord, c: Coord, r: usize| {
        let local = isize::from(p) - isize::from(c) + r as isize;
        usize::try_from(local).ok().filter(|&local| local < size)
    };
    Some((axis(pos.0, center.0, radius.0)?, axis(pos.1, center.1, radius.1)?))
}

/// Inverse of [`to_local`], `None` when the position is off the board.
pub fn to_board(center: Coord2, radius: (usize, usize), local: Local, board_size: Coord2) -> Option<Coord2> {
    let axis = |l: usize, c: Coord, r: usize| {
        let board = isize::from(c) + l as isize - r as isize;
        Coord::try_from(board).ok()
    };
    let coords = (axis(local.0, center.0, radius.0)?, axis(local.1, center.1, radius.1)?);
    in_bounds(coords, board_size).then_some(coords)
}
