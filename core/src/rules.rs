use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Key of a rule behind a suggested move. Non-negative keys index the rule
/// catalog, the two negative keys are built-in heuristics.
pub type RuleKey = i32;

/// Flagged-neighbour count already satisfied, every other neighbour is safe.
pub const RULE_SATISFIED_FLAGS: RuleKey = -2;

/// Unrevealed-neighbour count equals the clue, every neighbour is a mine.
pub const RULE_ALL_MINES: RuleKey = -1;

/// Number shown to the player for a rule key: the two built-ins come first,
/// then the zero-indexed catalog.
pub const fn display_number(key: RuleKey) -> i32 {
    key + 3
}

/// Canonical pattern/solution template pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleRows", into = "RuleRows")]
pub struct Rule {
    pattern: SymbolGrid,
    solution: SolutionGrid,
}

impl Rule {
    pub fn new(pattern: SymbolGrid, solution: SolutionGrid) -> Result<Self> {
        let (rows, cols) = pattern.dim();
        if rows != cols || solution.dim() != pattern.dim() {
            return Err(UiError::RuleShape);
        }
        Ok(Self { pattern, solution })
    }

    pub fn parse<S: AsRef<str>>(pattern: &[S], solution: &[S]) -> Result<Self> {
        Self::new(parse_rows(pattern)?, parse_rows(solution)?)
    }

    pub fn pattern(&self) -> &SymbolGrid {
        &self.pattern
    }

    pub fn solution(&self) -> &SolutionGrid {
        &self.solution
    }

    /// Side length of the square pattern.
    pub fn size(&self) -> usize {
        self.pattern.nrows()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RuleRows {
    pattern: Vec<String>,
    solution: Vec<String>,
}

impl TryFrom<RuleRows> for Rule {
    type Error = UiError;

    fn try_from(rows: RuleRows) -> Result<Self> {
        Self::parse(&rows.pattern, &rows.solution)
    }
}

impl From<Rule> for RuleRows {
    fn from(rule: Rule) -> Self {
        fn rows<T: Copy + Into<char>>(grid: &ndarray::Array2<T>) -> Vec<String> {
            grid.rows()
                .into_iter()
                .map(|row| row.iter().map(|&cell| cell.into()).collect())
                .collect()
        }
        Self {
            pattern: rows(&rule.pattern),
            solution: rows(&rule.solution),
        }
    }
}

/// Lookup side of the solver's rule catalog.
pub trait Rules {
    /// The catalog rule for `key`, `None` for built-ins or unknown keys.
    fn rule(&self, key: RuleKey) -> Option<&Rule>;

    /// One clockwise quarter turn, applied alike to patterns and solutions.
    fn rotate<T: Clone>(&self, grid: &Array2<T>) -> Array2<T> {
        rotate(grid)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl Rules for RuleCatalog {
    fn rule(&self, key: RuleKey) -> Option<&Rule> {
        usize::try_from(key).ok().and_then(|index| self.rules.get(index))
    }
}
