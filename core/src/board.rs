use ndarray::Array2;

use crate::*;

/// Grid of visual cells, indexed by `(x, y)`. Replaced wholesale on new game.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardView {
    cells: Array2<CellView>,
    focus: Option<Coord2>,
}

impl BoardView {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            focus: None,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        (
            Coord::try_from(x).unwrap_or(Coord::MAX),
            Coord::try_from(y).unwrap_or(Coord::MAX),
        )
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn length(&self) -> Coord {
        self.size().1
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn cell(&self, coords: Coord2) -> Result<&CellView> {
        self.cells
            .get(coords.to_nd_index())
            .ok_or_else(|| UiError::missing_cell(coords.0, coords.1))
    }

    pub fn cell_mut(&mut self, coords: Coord2) -> Result<&mut CellView> {
        self.cells
            .get_mut(coords.to_nd_index())
            .ok_or_else(|| UiError::missing_cell(coords.0, coords.1))
    }

    pub fn state_at(&self, coords: Coord2) -> Result<CellState> {
        self.cell(coords).map(CellView::state)
    }

    /// `coords` and its in-bounds neighbours.
    pub fn neighborhood(&self, coords: Coord2) -> Result<CellSet> {
        self.cell(coords)?;
        Ok(self.cells.neighborhood(coords))
    }

    pub fn press(&mut self, cells: &[Coord2]) -> Result<()> {
        for &coords in cells {
            self.cell_mut(coords)?.press();
        }
        Ok(())
    }

    pub fn unpress(&mut self, cells: &[Coord2]) -> Result<()> {
        for &coords in cells {
            self.cell_mut(coords)?.unpress();
        }
        Ok(())
    }

    pub fn focus(&self) -> Option<Coord2> {
        self.focus
    }

    /// Moves the single solver focus marker to `coords`.
    pub fn set_focus(&mut self, coords: Coord2) -> Result<()> {
        self.cell(coords)?;
        if let Some(previous) = self.focus.take() {
            self.cell_mut(previous)?.remove_hint(Hints::FOCUS);
        }
        self.cell_mut(coords)?.add_hint(Hints::FOCUS);
        self.focus = Some(coords);
        Ok(())
    }

    /// Marks a still-hidden cell with a move hint. Settled and flagged cells
    /// are left alone.
    pub fn mark_hint(&mut self, coords: Coord2, hint: Hints) -> Result<bool> {
        let cell = self.cell_mut(coords)?;
        if cell.state().is_hidden() {
            cell.add_hint(hint);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Rows of cells, top to bottom, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = (Coord2, &CellView)>> {
        let (width, length) = self.size();
        (0..length).map(move |y| {
            (0..width).map(move |x| ((x, y), &self.cells[(x, y).to_nd_index()]))
        })
    }
}

impl SymbolSource for BoardView {
    fn board_size(&self) -> Coord2 {
        self.size()
    }

    fn symbol_at(&self, coords: Coord2) -> Result<Symbol> {
        use CellState::*;

        Ok(match self.state_at(coords)? {
            Hidden | Pressed => Symbol::Unknown,
            Flagged => Symbol::Flag,
            Revealed(count) => Symbol::Number(count),
            Mine | MineLosing | Disabled => Symbol::Unknown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_outside_board_is_fatal() {
        let board = BoardView::new((3, 2));
        assert_eq!(board.cell((2, 1)).map(CellView::state), Ok(CellState::Hidden));
        assert_eq!(board.cell((3, 0)).err(), Some(UiError::missing_cell(3, 0)));
        assert!(board.neighborhood((0, 2)).is_err());
    }

    #[test]
    fn focus_is_unique() {
        let mut board = BoardView::new((3, 3));
        board.set_focus((0, 0)).unwrap();
        board.set_focus((2, 1)).unwrap();

        let focused: alloc::vec::Vec<_> = board
            .rows()
            .flatten()
            .filter(|(_, cell)| cell.has_hint(Hints::FOCUS))
            .map(|(coords, _)| coords)
            .collect();
        assert_eq!(focused, [(2, 1)]);
        assert_eq!(board.focus(), Some((2, 1)));
    }

    #[test]
    fn hints_only_mark_hidden_cells() {
        let mut board = BoardView::new((2, 1));
        board.cell_mut((1, 0)).unwrap().settle(CellState::Revealed(1));

        assert!(board.mark_hint((0, 0), Hints::CLICKABLE).unwrap());
        assert!(board.mark_hint((0, 0), Hints::CLICKABLE).unwrap());
        assert!(!board.mark_hint((1, 0), Hints::MINEABLE).unwrap());
        assert_eq!(board.cell((0, 0)).unwrap().hints(), Hints::CLICKABLE);
    }

    #[test]
    fn rows_are_row_major() {
        let board = BoardView::new((2, 2));
        let order: alloc::vec::Vec<_> = board.rows().flatten().map(|(pos, _)| pos).collect();
        assert_eq!(order, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
