//! Solver tips: the board window around a suggested move, the matching rule
//! turned to the board's orientation, and the move overlay. All three panes
//! share one [`Window`] so their coordinates always agree.

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

pub const BOARD_PANE_TITLE: &str = "Board State:";
pub const PATTERN_PANE_TITLE: &str = "Pattern Match:";
pub const MOVES_PANE_TITLE: &str = "Moves:";

/// Window side used when the move comes from a built-in heuristic.
pub const DEFAULT_TIP_SIZE: usize = 3;

/// What a tip cell depicts, before any overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipKind {
    /// Off the board, or a pattern position that does not matter.
    Dead,
    /// Revealed and forced to zero.
    Cleared,
    Unknown,
    Flag,
    Revealed(u8),
}

impl From<Symbol> for TipKind {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::Any | Symbol::OffBoard => Self::Dead,
            Symbol::Cleared => Self::Cleared,
            Symbol::Unknown => Self::Unknown,
            Symbol::Flag => Self::Flag,
            Symbol::Number(count) => Self::Revealed(count),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipCell {
    pub kind: TipKind,
    pub hints: Hints,
}

impl TipCell {
    pub fn new(kind: TipKind) -> Self {
        Self {
            kind,
            hints: Hints::empty(),
        }
    }

    fn with_mark(mut self, mark: SolutionMark) -> Self {
        match mark {
            SolutionMark::Click => self.hints.insert(Hints::CLICKABLE),
            SolutionMark::Mine => self.hints.insert(Hints::MINEABLE),
            SolutionMark::Nothing => {}
        }
        self
    }

    pub fn classes(&self) -> ClassList {
        let mut classes = ClassList::new();
        classes.push("cell-btn");
        match self.kind {
            TipKind::Dead => classes.push("dead"),
            TipKind::Cleared => classes.extend(["zero", "disabled"]),
            TipKind::Unknown => {}
            TipKind::Flag => classes.push("flag"),
            TipKind::Revealed(count) => classes.extend([number_class(count), "disabled"]),
        }
        if self.hints.contains(Hints::CLICKABLE) {
            classes.push("clickable");
        }
        if self.hints.contains(Hints::MINEABLE) {
            classes.push("mineable");
        }
        if self.hints.contains(Hints::FOCUS) {
            classes.push("solver-focus");
        }
        classes
    }
}

/// Square grid of tip cells, stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Pane {
    pub title: &'static str,
    pub cells: Vec<Vec<TipCell>>,
}

impl Pane {
    fn build(title: &'static str, size: usize, mut cell: impl FnMut(Local) -> TipCell) -> Self {
        let cells = (0..size)
            .map(|y| (0..size).map(|x| cell((x, y))).collect())
            .collect();
        Self { title, cells }
    }

    /// Cell at window-local `(x, y)`.
    pub fn cell(&self, (x, y): Local) -> Option<&TipCell> {
        self.cells.get(y).and_then(|row| row.get(x))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PatternPane {
    Grid {
        rule_number: i32,
        pane: Pane,
    },
    /// Built-in heuristics have no pattern, only a description.
    Description {
        rule_number: i32,
        description: &'static str,
        directive: &'static str,
    },
}

impl PatternPane {
    pub fn rule_number(&self) -> i32 {
        match *self {
            Self::Grid { rule_number, .. } | Self::Description { rule_number, .. } => rule_number,
        }
    }

    fn describe(key: RuleKey) -> Self {
        let (description, directive) = if key == RULE_SATISFIED_FLAGS {
            (
                "This space has the number of mines flagged in neighbors.",
                "Can click all unflagged neighbors.",
            )
        } else {
            (
                "The number of unrevealed spaces equals this space.",
                "Can flag all neighbors.",
            )
        };
        Self::Description {
            rule_number: display_number(key),
            description,
            directive,
        }
    }

    /// Turns the rule `rotation` quarter turns with the catalog's own rotation.
    fn rotated(key: RuleKey, rule: &Rule, rotation: u8, rules: &impl Rules) -> Self {
        let mut pattern = rule.pattern().clone();
        let mut solution = rule.solution().clone();
        for _ in 0..rotation % 4 {
            pattern = rules.rotate(&pattern);
            solution = rules.rotate(&solution);
        }
        let center = rule.size() / 2;
        let pane = Pane::build(PATTERN_PANE_TITLE, rule.size(), |(x, y)| {
            let mark = solution[[y, x]];
            let mut cell = match pattern[[y, x]] {
                Symbol::Any if mark != SolutionMark::Nothing => {
                    TipCell::new(TipKind::Unknown).with_mark(mark)
                }
                Symbol::Unknown => TipCell::new(TipKind::Unknown).with_mark(mark),
                symbol => TipCell::new(symbol.into()),
            };
            if (x, y) == (center, center) {
                cell.hints.insert(Hints::FOCUS);
            }
            cell
        });
        Self::Grid {
            rule_number: display_number(key),
            pane,
        }
    }
}

/// The three rendered panes for one suggested move.
#[derive(Clone, Debug, PartialEq)]
pub struct Tip {
    pub board: Pane,
    pub pattern: PatternPane,
    pub moves: Pane,
}

fn window_cell(window: &Window, local: Local) -> TipCell {
    let mut cell = TipCell::new(window.symbol(local).into());
    if window.is_focus(local) {
        cell.hints.insert(Hints::FOCUS);
    }
    cell
}

/// Renders the tip panes for `play`. Pure: the board is only read.
pub fn render_tip(board: &impl SymbolSource, play: &Move, rules: &impl Rules) -> Result<Tip> {
    let rule = rules.rule(play.rule_key);
    let size = rule.map_or(DEFAULT_TIP_SIZE, Rule::size);
    let window = Window::extract(board, play.coords(), size)?;
    log::debug!(
        "rendering tip for rule {} at {:?}, rotation {}",
        play.rule_key,
        play.coords(),
        play.rotation
    );

    let board_pane = Pane::build(BOARD_PANE_TITLE, size, |local| window_cell(&window, local));

    let pattern = match rule {
        Some(rule) => PatternPane::rotated(play.rule_key, rule, play.rotation, rules),
        None => PatternPane::describe(play.rule_key),
    };

    let moves = Pane::build(MOVES_PANE_TITLE, size, |local| {
        let mut cell = window_cell(&window, local);
        if cell.kind == TipKind::Unknown {
            if window.hits(&play.can_mine, local) {
                cell.hints.insert(Hints::MINEABLE);
            } else if window.hits(&play.can_click, local) {
                cell.hints.insert(Hints::CLICKABLE);
            }
        }
        cell
    });

    Ok(Tip {
        board: board_pane,
        pattern,
        moves,
    })
}

/// Moves the board focus to the move and hints its hidden target cells.
/// Repeating it for the same move changes nothing.
pub fn prime_board(board: &mut BoardView, play: &Move) -> Result<()> {
    board.set_focus(play.coords())?;
    for pos in &play.can_click {
        board.mark_hint(pos.coords(), Hints::CLICKABLE)?;
    }
    for pos in &play.can_mine {
        board.mark_hint(pos.coords(), Hints::MINEABLE)?;
    }
    Ok(())
}
