use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(UiError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (
            Coord::try_from(x).unwrap_or(Coord::MAX),
            Coord::try_from(y).unwrap_or(Coord::MAX),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }

    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// How much of the first revealed cell is kept clear of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstMovePolicy {
    Random,
    Safe,
    Zero,
}

/// Purely random placement, optionally keeping the first move safe or zero.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    start: Coord2,
    policy: FirstMovePolicy,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, start: Coord2, policy: FirstMovePolicy) -> Self {
        Self {
            seed,
            start,
            policy,
        }
    }

    pub fn generate(self, config: GameConfig) -> MineLayout {
        use FirstMovePolicy::*;

        let size = config.size;
        let total_cells = config.total_cells();

        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Minefield already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return MineLayout::from_mine_mask(Array2::from_elem(size.to_nd_index(), true));
        }

        let reserved: CellSet = match self.policy {
            Random => CellSet::new(),
            Safe | Zero if config.mines + 1 > total_cells => {
                log::warn!("Cannot make start cell safe, fallback to random");
                CellSet::new()
            }
            Zero => {
                let mask: Array2<bool> = Array2::default(size.to_nd_index());
                let cells = mask.neighborhood(self.start);
                if usize::from(config.mines) + cells.len() > usize::from(total_cells) {
                    log::warn!("Cannot make start cell zero, fallback to simple safe");
                    CellSet::from_slice(&[self.start])
                } else {
                    cells
                }
            }
            Safe => CellSet::from_slice(&[self.start]),
        };

        let mut candidates: Vec<Coord2> = (0..size.1)
            .flat_map(|y| (0..size.0).map(move |x| (x, y)))
            .filter(|coords| !reserved.contains(coords))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (chosen, _) = candidates.partial_shuffle(&mut rng, config.mines.into());

        let layout = match MineLayout::from_mine_coords(size, chosen) {
            Ok(layout) => layout,
            Err(err) => {
                log::warn!("Generated layout rejected ({}), leaving board empty", err);
                MineLayout::from_mine_mask(Array2::default(size.to_nd_index()))
            }
        };
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        layout
    }
}
