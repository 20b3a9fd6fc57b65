use serde::{Deserialize, Serialize};

use crate::*;

/// What a revealed cell turned out to be.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRevealValue", into = "RawRevealValue")]
pub enum RevealValue {
    Count(u8),
    Mine,
}

#[derive(Copy, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawRevealValue {
    Count(u8),
    Symbol(char),
}

impl TryFrom<RawRevealValue> for RevealValue {
    type Error = UiError;

    fn try_from(value: RawRevealValue) -> Result<Self> {
        match value {
            RawRevealValue::Count(count @ 0..=8) => Ok(Self::Count(count)),
            RawRevealValue::Count(_) => Err(UiError::UnsupportedOutcome),
            RawRevealValue::Symbol('X') => Ok(Self::Mine),
            RawRevealValue::Symbol(other) => Err(UiError::UnsupportedSymbol(other)),
        }
    }
}

impl From<RevealValue> for RawRevealValue {
    fn from(value: RevealValue) -> Self {
        match value {
            RevealValue::Count(count) => Self::Count(count),
            RevealValue::Mine => Self::Symbol('X'),
        }
    }
}

/// One record produced by the game engine for a gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", deny_unknown_fields)]
pub enum Outcome {
    GameOver {
        result: GameResult,
        #[serde(default)]
        x: Option<Coord>,
        #[serde(default)]
        y: Option<Coord>,
    },
    #[serde(rename_all = "camelCase")]
    FlagChanged {
        x: Coord,
        y: Coord,
        is_flagged: bool,
    },
    Revealed {
        x: Coord,
        y: Coord,
        value: RevealValue,
    },
}

impl Outcome {
    pub const fn won() -> Self {
        Self::GameOver {
            result: GameResult::Win,
            x: None,
            y: None,
        }
    }

    pub const fn lost_at((x, y): Coord2) -> Self {
        Self::GameOver {
            result: GameResult::Lose,
            x: Some(x),
            y: Some(y),
        }
    }

    pub const fn flag((x, y): Coord2, is_flagged: bool) -> Self {
        Self::FlagChanged { x, y, is_flagged }
    }

    pub const fn revealed((x, y): Coord2, value: RevealValue) -> Self {
        Self::Revealed { x, y, value }
    }
}

/// Applies engine outcomes to the board and header strictly in order.
///
/// Nothing is batched or rolled back: each outcome is final once applied.
pub struct OutcomeApplier<'a, H> {
    board: &'a mut BoardView,
    header: &'a mut Header<H>,
}

impl<'a, H> OutcomeApplier<'a, H> {
    pub fn new(board: &'a mut BoardView, header: &'a mut Header<H>) -> Self {
        Self { board, header }
    }

    pub fn apply_all<'o>(&mut self, outcomes: impl IntoIterator<Item = &'o Outcome>) -> Result<()> {
        outcomes
            .into_iter()
            .try_for_each(|outcome| self.apply(outcome))
    }

    pub fn apply(&mut self, outcome: &Outcome) -> Result<()> {
        log::debug!("outcome: {:?}", outcome);

        match *outcome {
            Outcome::GameOver {
                result: GameResult::Lose,
                x: Some(x),
                y: Some(y),
            } => {
                self.board.cell_mut((x, y))?.settle(CellState::MineLosing);
                self.header.announce(GameResult::Lose);
            }
            Outcome::GameOver {
                result: GameResult::Lose,
                ..
            } => return Err(UiError::UnsupportedOutcome),
            Outcome::GameOver {
                result: GameResult::Win,
                ..
            } => self.header.announce(GameResult::Win),
            Outcome::FlagChanged { x, y, is_flagged } => {
                self.board.cell_mut((x, y))?.set_flagged(is_flagged);
                if is_flagged {
                    self.header.mines.flag_placed();
                } else {
                    self.header.mines.flag_removed();
                }
            }
            Outcome::Revealed {
                x,
                y,
                value: RevealValue::Mine,
            } => {
                let cell = self.board.cell_mut((x, y))?;
                cell.settle(CellState::Mine);
                cell.clear_label();
            }
            Outcome::Revealed {
                x,
                y,
                value: RevealValue::Count(0),
            } => {
                let cell = self.board.cell_mut((x, y))?;
                cell.settle(CellState::Revealed(0));
                cell.clear_label();
            }
            Outcome::Revealed {
                x,
                y,
                value: RevealValue::Count(count),
            } => {
                let cell = self.board.cell_mut((x, y))?;
                cell.settle(CellState::Revealed(count));
                cell.set_label(count);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::tests::CountingClock;

    fn fixture() -> (BoardView, Header<<CountingClock as Clock>::Handle>) {
        (BoardView::new((4, 4)), Header::new(10))
    }

    #[test]
    fn zero_reveal_sets_no_label() {
        let (mut board, mut header) = fixture();
        OutcomeApplier::new(&mut board, &mut header)
            .apply(&Outcome::revealed((1, 1), RevealValue::Count(0)))
            .unwrap();

        let cell = board.cell((1, 1)).unwrap();
        assert_eq!(cell.label(), None);
        assert!(cell.classes().contains(&"zero"));
        assert!(cell.classes().contains(&"disabled"));
    }

    #[test]
    fn numbered_reveal_sets_label_and_class() {
        let (mut board, mut header) = fixture();
        OutcomeApplier::new(&mut board, &mut header)
            .apply(&Outcome::revealed((2, 3), RevealValue::Count(5)))
            .unwrap();

        let cell = board.cell((2, 3)).unwrap();
        assert_eq!(cell.label(), Some("5"));
        assert!(cell.classes().contains(&"five"));
    }

    #[test]
    fn revealed_mine_is_not_the_losing_one() {
        let (mut board, mut header) = fixture();
        OutcomeApplier::new(&mut board, &mut header)
            .apply_all(&[
                Outcome::revealed((0, 0), RevealValue::Mine),
                Outcome::lost_at((3, 3)),
            ])
            .unwrap();

        assert_eq!(board.state_at((0, 0)), Ok(CellState::Mine));
        assert_eq!(board.state_at((3, 3)), Ok(CellState::MineLosing));
        assert_eq!(header.result, Some(GameResult::Lose));
    }

    #[test]
    fn game_over_stops_timer() {
        let mut clock = CountingClock::default();
        let (mut board, mut header) = fixture();
        header.timer.toggle(&mut clock);

        OutcomeApplier::new(&mut board, &mut header)
            .apply(&Outcome::won())
            .unwrap();

        assert!(!header.timer.is_running());
        assert_eq!(clock.live.get(), 0);
        assert_eq!(header.result, Some(GameResult::Win));
        assert!(board.rows().flatten().all(|(_, cell)| cell.state() == CellState::Hidden));
    }

    #[test]
    fn flag_round_trip_restores_counter() {
        let (mut board, mut header) = fixture();
        let mut applier = OutcomeApplier::new(&mut board, &mut header);
        for _ in 0..2 {
            applier.apply(&Outcome::flag((1, 2), true)).unwrap();
            applier.apply(&Outcome::flag((1, 2), false)).unwrap();
        }
        assert_eq!(header.mines.value(), 10);
        assert_eq!(board.state_at((1, 2)), Ok(CellState::Hidden));
    }

    #[test]
    fn outcome_for_missing_cell_is_fatal() {
        let (mut board, mut header) = fixture();
        let result = OutcomeApplier::new(&mut board, &mut header)
            .apply(&Outcome::revealed((9, 0), RevealValue::Count(1)));
        assert_eq!(result, Err(UiError::missing_cell(9, 0)));
    }

    #[test]
    fn losing_without_position_is_rejected() {
        let (mut board, mut header) = fixture();
        let outcome = Outcome::GameOver {
            result: GameResult::Lose,
            x: None,
            y: None,
        };
        let result = OutcomeApplier::new(&mut board, &mut header).apply(&outcome);
        assert_eq!(result, Err(UiError::UnsupportedOutcome));
    }

    #[test]
    fn decodes_tagged_outcomes() {
        let json = r#"[
            {"kind":"revealed","x":1,"y":2,"value":3},
            {"kind":"revealed","x":0,"y":0,"value":"X"},
            {"kind":"flagChanged","x":4,"y":4,"isFlagged":true},
            {"kind":"gameOver","result":"Win"}
        ]"#;
        let outcomes: alloc::vec::Vec<Outcome> = serde_json::from_str(json).unwrap();
        assert_eq!(
            outcomes,
            [
                Outcome::revealed((1, 2), RevealValue::Count(3)),
                Outcome::revealed((0, 0), RevealValue::Mine),
                Outcome::flag((4, 4), true),
                Outcome::won(),
            ]
        );
    }

    #[test]
    fn rejects_unknown_outcome_kind() {
        let json = r#"{"kind":"exploded","x":1,"y":2}"#;
        assert!(serde_json::from_str::<Outcome>(json).is_err());
        let json = r#"{"kind":"revealed","x":1,"y":2,"value":9}"#;
        assert!(serde_json::from_str::<Outcome>(json).is_err());
    }
}
