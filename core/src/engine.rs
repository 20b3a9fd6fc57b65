use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Canonical player-visible state stored by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCell {
    Hidden,
    Revealed(u8),
    Flagged,
}

impl Default for EngineCell {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Reference [`Game`] implementation. Mines are placed on the first reveal
/// so the opening cell is always a zero when the board has room for it.
#[derive(Clone, Debug)]
pub struct PlayEngine {
    config: GameConfig,
    mine_layout: Option<MineLayout>,
    board: Array2<EngineCell>,
    revealed_count: CellCount,
    state: EngineState,
    triggered_mine: Option<Coord2>,
    last_played: Option<Coord2>,
    rng: SmallRng,
}

impl PlayEngine {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            mine_layout: None,
            board: Array2::default(config.size.to_nd_index()),
            revealed_count: 0,
            state: EngineState::Ready,
            triggered_mine: None,
            last_played: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Engine over a fixed layout, skipping first-move generation.
    pub fn with_layout(mine_layout: MineLayout) -> Self {
        let config = GameConfig::new_unchecked(mine_layout.size(), mine_layout.mine_count());
        let mut engine = Self::new(config, 0);
        engine.mine_layout = Some(mine_layout);
        engine
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn cell_at(&self, coords: Coord2) -> EngineCell {
        self.board[coords.to_nd_index()]
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mine_layout
            .as_ref()
            .is_some_and(|layout| layout.contains_mine(coords))
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.config.size) {
            Ok(coords)
        } else {
            Err(UiError::InvalidCoords)
        }
    }

    fn ensure_layout(&mut self, start: Coord2) -> &MineLayout {
        let Self {
            mine_layout,
            config,
            rng,
            ..
        } = self;
        mine_layout.get_or_insert_with(|| {
            let seed = rng.next_u64();
            log::debug!("placing {} mines around first move {:?}", config.mines, start);
            RandomLayoutGenerator::new(seed, start, FirstMovePolicy::Zero).generate(*config)
        })
    }

    fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.board.iter_neighbors(coords)
    }

    fn count_neighbors(&self, coords: Coord2, pred: impl Fn(EngineCell) -> bool) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| pred(self.cell_at(pos)))
            .count() as u8
    }

    fn reveal_single_cell(&mut self, coords: Coord2, outcomes: &mut Vec<Outcome>) {
        if self.cell_at(coords) != EngineCell::Hidden {
            return;
        }

        if self.ensure_layout(coords).contains_mine(coords) {
            self.lose(coords, outcomes);
            return;
        }

        let mut visited = BTreeSet::from([coords]);
        let mut to_visit = VecDeque::from([coords]);
        while let Some(visit_coords) = to_visit.pop_front() {
            if self.cell_at(visit_coords) != EngineCell::Hidden {
                continue;
            }

            let adjacent_mines = self
                .mine_layout
                .as_ref()
                .map_or(0, |layout| layout.adjacent_mine_count(visit_coords));
            self.board[visit_coords.to_nd_index()] = EngineCell::Revealed(adjacent_mines);
            self.revealed_count += 1;
            outcomes.push(Outcome::revealed(visit_coords, RevealValue::Count(adjacent_mines)));

            if adjacent_mines == 0 {
                let next: Vec<Coord2> = self
                    .neighbors(visit_coords)
                    .filter(|&pos| self.cell_at(pos) == EngineCell::Hidden)
                    .filter(|&pos| visited.insert(pos))
                    .collect();
                to_visit.extend(next);
            }
        }

        let safe_cells = self
            .mine_layout
            .as_ref()
            .map_or(CellCount::MAX, MineLayout::safe_cell_count);
        if self.revealed_count >= safe_cells {
            self.win(outcomes);
        } else if self.state == EngineState::Ready {
            self.state = EngineState::Active;
        }
    }

    fn lose(&mut self, coords: Coord2, outcomes: &mut Vec<Outcome>) {
        self.state = EngineState::Lost;
        self.triggered_mine = Some(coords);

        let hidden_mines: Vec<Coord2> = self
            .mine_layout
            .iter()
            .flat_map(MineLayout::mines)
            .filter(|&pos| pos != coords && self.cell_at(pos) == EngineCell::Hidden)
            .collect();
        outcomes.extend(
            hidden_mines
                .into_iter()
                .map(|pos| Outcome::revealed(pos, RevealValue::Mine)),
        );
        outcomes.push(Outcome::lost_at(coords));
    }

    fn win(&mut self, outcomes: &mut Vec<Outcome>) {
        self.state = EngineState::Won;

        let hidden_mines: Vec<Coord2> = self
            .mine_layout
            .iter()
            .flat_map(MineLayout::mines)
            .filter(|&pos| self.cell_at(pos) == EngineCell::Hidden)
            .collect();
        for pos in hidden_mines {
            self.board[pos.to_nd_index()] = EngineCell::Flagged;
            outcomes.push(Outcome::flag(pos, true));
        }
        outcomes.push(Outcome::won());
    }
}

impl SymbolSource for PlayEngine {
    fn board_size(&self) -> Coord2 {
        self.config.size
    }

    fn symbol_at(&self, coords: Coord2) -> Result<Symbol> {
        let coords = self.validate_coords(coords)?;
        Ok(match self.cell_at(coords) {
            EngineCell::Hidden => Symbol::Unknown,
            EngineCell::Flagged => Symbol::Flag,
            EngineCell::Revealed(count) => Symbol::Number(count),
        })
    }
}

impl Game for PlayEngine {
    fn new_game(&mut self, config: GameConfig) {
        log::debug!("new game: {:?}", config);
        let seed = self.rng.next_u64();
        *self = Self::new(config, seed);
    }

    fn width(&self) -> Coord {
        self.config.size.0
    }

    fn length(&self) -> Coord {
        self.config.size.1
    }

    fn is_over(&self) -> bool {
        self.state.is_finished()
    }

    fn last_played(&self) -> Option<Coord2> {
        self.last_played
    }

    fn click(&mut self, coords: Coord2) -> Result<Vec<Outcome>> {
        let coords = self.validate_coords(coords)?;
        if self.is_over() || self.cell_at(coords) != EngineCell::Hidden {
            return Ok(vec![]);
        }

        self.last_played = Some(coords);
        let mut outcomes = Vec::new();
        self.reveal_single_cell(coords, &mut outcomes);
        Ok(outcomes)
    }

    fn toggle_flag(&mut self, coords: Coord2) -> Result<Vec<Outcome>> {
        let coords = self.validate_coords(coords)?;
        if self.is_over() {
            return Ok(vec![]);
        }

        let (next, outcome) = match self.cell_at(coords) {
            EngineCell::Hidden => (EngineCell::Flagged, Outcome::flag(coords, true)),
            EngineCell::Flagged => (EngineCell::Hidden, Outcome::flag(coords, false)),
            EngineCell::Revealed(_) => return Ok(vec![]),
        };
        self.board[coords.to_nd_index()] = next;
        self.last_played = Some(coords);
        Ok(vec![outcome])
    }

    fn clear_neighbors(&mut self, coords: Coord2) -> Result<Vec<Outcome>> {
        let coords = self.validate_coords(coords)?;
        if self.is_over() {
            return Ok(vec![]);
        }

        match self.cell_at(coords) {
            EngineCell::Hidden => self.click(coords),
            EngineCell::Revealed(count)
                if count == self.count_neighbors(coords, |cell| cell == EngineCell::Flagged) =>
            {
                let hidden: Vec<Coord2> = self
                    .neighbors(coords)
                    .filter(|&pos| self.cell_at(pos) == EngineCell::Hidden)
                    .collect();
                if hidden.is_empty() {
                    return Ok(vec![]);
                }

                self.last_played = Some(coords);
                let mut outcomes = Vec::new();
                for pos in hidden {
                    if self.is_over() {
                        break;
                    }
                    self.reveal_single_cell(pos, &mut outcomes);
                }
                Ok(outcomes)
            }
            _ => Ok(vec![]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord2, mines: &[Coord2]) -> PlayEngine {
        PlayEngine::with_layout(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn hitting_a_mine_reveals_the_rest_and_loses() {
        let mut engine = engine((3, 3), &[(0, 0), (2, 2), (2, 0)]);
        engine.toggle_flag((2, 0)).unwrap();

        let outcomes = engine.click((0, 0)).unwrap();

        assert_eq!(
            outcomes,
            [
                Outcome::revealed((2, 2), RevealValue::Mine),
                Outcome::lost_at((0, 0)),
            ]
        );
        assert_eq!(engine.state(), EngineState::Lost);
        assert!(engine.is_over());
        assert_eq!(engine.triggered_mine(), Some((0, 0)));
        assert!(engine.click((1, 1)).unwrap().is_empty());
    }

    #[test]
    fn flood_fill_reports_every_revealed_cell_then_wins() {
        let mut engine = engine((3, 3), &[(2, 2)]);

        let outcomes = engine.click((0, 0)).unwrap();

        let revealed = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, Outcome::Revealed { .. }))
            .count();
        assert_eq!(revealed, 8);
        assert_eq!(
            &outcomes[outcomes.len() - 2..],
            &[Outcome::flag((2, 2), true), Outcome::won()]
        );
        assert_eq!(engine.cell_at((1, 1)), EngineCell::Revealed(1));
        assert_eq!(engine.symbol_at((2, 2)), Ok(Symbol::Flag));
    }

    #[test]
    fn clear_neighbors_needs_matching_flags() {
        let mut engine = engine((3, 3), &[(0, 1), (2, 1)]);
        engine.click((1, 1)).unwrap();

        assert!(engine.clear_neighbors((1, 1)).unwrap().is_empty());

        engine.toggle_flag((0, 1)).unwrap();
        engine.toggle_flag((2, 1)).unwrap();
        let outcomes = engine.clear_neighbors((1, 1)).unwrap();

        assert!(outcomes.contains(&Outcome::revealed((1, 0), RevealValue::Count(2))));
        assert_eq!(outcomes.last(), Some(&Outcome::won()));
        assert_eq!(engine.last_played(), Some((1, 1)));
    }

    #[test]
    fn toggle_flag_round_trips() {
        let mut engine = engine((2, 2), &[(0, 0)]);
        assert_eq!(engine.toggle_flag((1, 1)).unwrap(), [Outcome::flag((1, 1), true)]);
        assert_eq!(engine.toggle_flag((1, 1)).unwrap(), [Outcome::flag((1, 1), false)]);
        assert_eq!(engine.toggle_flag((5, 5)), Err(UiError::InvalidCoords));
    }

    #[test]
    fn first_click_is_always_an_opening() {
        for seed in 0..10 {
            let mut engine = PlayEngine::new(GameConfig::new((8, 8), 10), seed);
            let outcomes = engine.click((4, 4)).unwrap();
            assert_eq!(
                outcomes.first(),
                Some(&Outcome::revealed((4, 4), RevealValue::Count(0)))
            );
            assert!(!engine.is_over() || engine.state() == EngineState::Won);
        }
    }

    #[test]
    fn new_game_resets_everything() {
        let mut engine = PlayEngine::new(GameConfig::new((8, 8), 10), 3);
        engine.click((0, 0)).unwrap();
        engine.new_game(GameConfig::new((5, 4), 3));

        assert_eq!((engine.width(), engine.length()), (5, 4));
        assert_eq!(engine.last_played(), None);
        assert_eq!(engine.state(), EngineState::Ready);
        assert_eq!(engine.symbol_at((0, 0)), Ok(Symbol::Unknown));
    }
}
