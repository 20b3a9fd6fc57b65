use alloc::string::{String, ToString};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Style class for a revealed count, indexed by the count.
pub const NUMBER_CLASSES: [&str; 9] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight",
];

pub const fn number_class(count: u8) -> &'static str {
    if (count as usize) < NUMBER_CLASSES.len() {
        NUMBER_CLASSES[count as usize]
    } else {
        "eight"
    }
}

/// Visual state of a single board cell.
///
/// `Revealed`, `Mine`, `MineLosing` and `Disabled` are terminal: once entered
/// the cell only leaves them when the whole board is rebuilt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Pressed,
    Flagged,
    Revealed(u8),
    Mine,
    MineLosing,
    Disabled,
}

impl CellState {
    pub const fn is_disabled(self) -> bool {
        matches!(
            self,
            Self::Revealed(_) | Self::Mine | Self::MineLosing | Self::Disabled
        )
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden | Self::Pressed)
    }

    /// Cells that may be shown depressed while a button is held over them.
    pub const fn is_pressable(self) -> bool {
        !self.is_disabled() && !matches!(self, Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

bitflags! {
    /// Overlay markers that live independently of the cell state.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Hints: u8 {
        const CLICKABLE = 1;
        const MINEABLE  = 1 << 1;
        const FOCUS     = 1 << 2;
    }
}

impl Default for Hints {
    fn default() -> Self {
        Self::empty()
    }
}

pub type ClassList = SmallVec<[&'static str; 6]>;

/// One visual cell handle: state, overlay markers and text label.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    state: CellState,
    hints: Hints,
    label: Option<String>,
}

impl CellView {
    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn hints(&self) -> Hints {
        self.hints
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn has_hint(&self, hint: Hints) -> bool {
        self.hints.contains(hint)
    }

    pub fn add_hint(&mut self, hint: Hints) {
        self.hints.insert(hint);
    }

    pub fn remove_hint(&mut self, hint: Hints) {
        self.hints.remove(hint);
    }

    pub fn set_label(&mut self, label: impl ToString) {
        self.label = Some(label.to_string());
    }

    pub fn clear_label(&mut self) {
        self.label = None;
    }

    /// Shows the cell depressed; returns whether anything changed.
    pub fn press(&mut self) -> bool {
        if self.state == CellState::Hidden {
            self.state = CellState::Pressed;
            true
        } else {
            false
        }
    }

    pub fn unpress(&mut self) -> bool {
        if self.state == CellState::Pressed {
            self.state = CellState::Hidden;
            true
        } else {
            false
        }
    }

    pub fn set_flagged(&mut self, flagged: bool) {
        match (self.state, flagged) {
            (CellState::Hidden | CellState::Pressed, true) => self.state = CellState::Flagged,
            (CellState::Flagged, false) => self.state = CellState::Hidden,
            (state, _) if state.is_disabled() => {
                log::warn!("ignoring flag change on settled cell ({:?})", state);
            }
            _ => {}
        }
    }

    /// Moves the cell into a terminal state, dropping move hints.
    pub fn settle(&mut self, state: CellState) {
        debug_assert!(state.is_disabled());
        self.state = state;
        self.hints.remove(Hints::CLICKABLE | Hints::MINEABLE);
    }

    pub fn classes(&self) -> ClassList {
        use CellState::*;

        let mut classes = ClassList::new();
        classes.push("cell-btn");
        match self.state {
            Hidden => {}
            Pressed => classes.push("active"),
            Flagged => classes.push("flag"),
            Revealed(count) => classes.extend([number_class(count), "disabled"]),
            Mine => classes.extend(["mine", "disabled"]),
            MineLosing => classes.extend(["mine", "losing-move", "disabled"]),
            Disabled => classes.push("disabled"),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flagged_cells_cannot_be_pressed() {
        let mut cell = CellView::default();
        cell.set_flagged(true);
        assert!(!cell.press());
        assert_eq!(cell.state(), CellState::Flagged);
        assert!(!cell.state().is_pressable());
    }

    #[test]
    fn settled_cells_never_return_to_hidden() {
        let mut cell = CellView::default();
        cell.add_hint(Hints::CLICKABLE | Hints::FOCUS);
        cell.settle(CellState::Revealed(3));

        cell.set_flagged(false);
        assert!(!cell.unpress());
        assert_eq!(cell.state(), CellState::Revealed(3));
        assert_eq!(cell.hints(), Hints::FOCUS);
    }

    #[test]
    fn losing_mine_classes() {
        let mut cell = CellView::default();
        cell.settle(CellState::MineLosing);
        assert_eq!(
            cell.classes().as_slice(),
            &["cell-btn", "mine", "losing-move", "disabled"]
        );
    }

    #[test]
    fn number_class_covers_all_counts() {
        assert_eq!(number_class(0), "zero");
        assert_eq!(number_class(5), "five");
        assert_eq!(number_class(8), "eight");
    }
}
