use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    pub const fn coords(self) -> Coord2 {
        (self.x, self.y)
    }
}

impl From<Coord2> for Position {
    fn from((x, y): Coord2) -> Self {
        Self { x, y }
    }
}

/// A solver suggestion anchored at the clue cell `(x, y)`.
///
/// `can_click` and `can_mine` hold board coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Move {
    pub x: Coord,
    pub y: Coord,
    pub rule_key: RuleKey,
    #[serde(default)]
    pub rotation: u8,
    #[serde(default)]
    pub can_click: Vec<Position>,
    #[serde(default)]
    pub can_mine: Vec<Position>,
}

impl Move {
    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }
}

/// Moves fetched for one scouted position plus the cycling cursor of the
/// help button.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoveCache {
    moves: Vec<Move>,
    index: usize,
}

impl MoveCache {
    /// Swaps in a fresh move list; the cursor keeps its place and wraps on
    /// the next [`MoveCache::next_move`].
    pub fn replace(&mut self, moves: Vec<Move>) {
        self.moves = moves;
    }

    pub fn next_move(&mut self) -> Option<&Move> {
        if self.moves.is_empty() {
            return None;
        }
        if self.index >= self.moves.len() {
            self.index = 0;
        }
        let index = self.index;
        self.index += 1;
        self.moves.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn at(x: Coord) -> Move {
        Move {
            x,
            y: 0,
            rule_key: RULE_SATISFIED_FLAGS,
            rotation: 0,
            can_click: vec![],
            can_mine: vec![],
        }
    }

    #[test]
    fn cursor_cycles_through_moves() {
        let mut cache = MoveCache::default();
        assert!(cache.next_move().is_none());

        cache.replace(vec![at(0), at(1)]);
        assert_eq!(cache.next_move().map(Move::coords), Some((0, 0)));
        assert_eq!(cache.next_move().map(Move::coords), Some((1, 0)));
        assert_eq!(cache.next_move().map(Move::coords), Some((0, 0)));
    }

    #[test]
    fn cursor_wraps_when_list_shrinks() {
        let mut cache = MoveCache::default();
        cache.replace(vec![at(0), at(1), at(2)]);
        cache.next_move();
        cache.next_move();
        cache.next_move();

        cache.replace(vec![at(7)]);
        assert_eq!(cache.next_move().map(Move::coords), Some((7, 0)));
    }

    #[test]
    fn decodes_camel_case_moves() {
        let json = r#"{"x":3,"y":3,"ruleKey":-1,"rotation":2,"canClick":[],"canMine":[{"x":2,"y":3}]}"#;
        let mv: Move = serde_json::from_str(json).unwrap();
        assert_eq!(mv.rule_key, RULE_ALL_MINES);
        assert_eq!(mv.can_mine, vec![Position::new(2, 3)]);
    }

    #[test]
    fn rejects_unrecognized_move_shape() {
        let json = r#"{"x":3,"y":3,"ruleKey":0,"target":"somewhere"}"#;
        assert!(serde_json::from_str::<Move>(json).is_err());
    }
}
