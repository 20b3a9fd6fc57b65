use alloc::vec::Vec;

use crate::*;

/// Solver that only knows the two single-cell heuristics. The catalog is
/// exposed for tip rendering but never matched against the board.
#[derive(Clone, Debug, Default)]
pub struct BasicSolver {
    catalog: RuleCatalog,
    last_scouted: Option<Coord2>,
}

impl BasicSolver {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self {
            catalog,
            last_scouted: None,
        }
    }

    fn scout_cell<G: Game>(game: &G, coords: Coord2) -> Option<Move> {
        let Ok(Symbol::Number(count)) = game.symbol_at(coords) else {
            return None;
        };

        let mut unknown: Vec<Position> = Vec::new();
        let mut flagged = 0u8;
        for pos in NeighborIter::new(coords, game.board_size()) {
            match game.symbol_at(pos) {
                Ok(Symbol::Unknown) => unknown.push(pos.into()),
                Ok(Symbol::Flag) => flagged += 1,
                _ => {}
            }
        }
        if unknown.is_empty() {
            return None;
        }

        let (x, y) = coords;
        if flagged == count {
            Some(Move {
                x,
                y,
                rule_key: RULE_SATISFIED_FLAGS,
                rotation: 0,
                can_click: unknown,
                can_mine: Vec::new(),
            })
        } else if usize::from(flagged) + unknown.len() == usize::from(count) {
            Some(Move {
                x,
                y,
                rule_key: RULE_ALL_MINES,
                rotation: 0,
                can_click: Vec::new(),
                can_mine: unknown,
            })
        } else {
            None
        }
    }
}

impl Solver for BasicSolver {
    type Rules = RuleCatalog;

    fn new_game<G: Game>(&mut self, _game: &G) {
        self.last_scouted = None;
    }

    fn all_plays<G: Game>(&mut self, game: &G) -> Vec<Move> {
        self.last_scouted = game.last_played();

        let (width, length) = game.board_size();
        let moves: Vec<Move> = (0..length)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter_map(|coords| Self::scout_cell(game, coords))
            .collect();
        log::debug!("scouted {:?}: {} moves", self.last_scouted, moves.len());
        moves
    }

    fn last_scouted(&self) -> Option<Coord2> {
        self.last_scouted
    }

    fn rules(&self) -> &RuleCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn layout(size: Coord2, mines: &[Coord2]) -> PlayEngine {
        PlayEngine::with_layout(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn fresh_game_has_no_moves() {
        let game = layout((4, 4), &[(3, 3)]);
        let mut solver = BasicSolver::default();
        solver.new_game(&game);

        assert!(solver.all_plays(&game).is_empty());
        assert_eq!(solver.last_scouted(), None);
    }

    #[test]
    fn finds_forced_mines() {
        let mut game = layout((4, 3), &[(2, 0), (2, 1), (2, 2)]);
        game.click((0, 1)).unwrap();
        let mut solver = BasicSolver::default();

        let moves = solver.all_plays(&game);

        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|play| play.rule_key == RULE_ALL_MINES));
        assert!(moves.iter().all(|play| play.can_click.is_empty()));
        assert_eq!(moves[0].coords(), (1, 0));
        assert_eq!(moves[0].can_mine.len(), 2);
        assert!(moves[0].can_mine.contains(&Position::new(2, 1)));
        assert_eq!(moves[1].can_mine.len(), 3);
        assert_eq!(solver.last_scouted(), Some((0, 1)));
    }

    #[test]
    fn finds_satisfied_flags() {
        let mut game = layout((3, 1), &[(0, 0)]);
        game.click((1, 0)).unwrap();
        game.toggle_flag((0, 0)).unwrap();
        let mut solver = BasicSolver::default();

        let moves = solver.all_plays(&game);

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].rule_key, RULE_SATISFIED_FLAGS);
        assert_eq!(moves[0].can_click, vec![Position::new(2, 0)]);
        assert_eq!(solver.area(&game, (0, 0), 3).unwrap()[[1, 1]], Symbol::Flag);
    }
}
