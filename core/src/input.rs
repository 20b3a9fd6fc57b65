//! Pointer/keyboard classification.
//!
//! [`PointerState`] is a plain value; [`PointerState::step`] folds one
//! [`PointerEvent`] into a new state plus at most one [`Gesture`]. The board is
//! only read, never written, so the same step can be replayed against any
//! rendering substrate.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::*;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MouseButtons: u8 {
        const LEFT   = 1;
        const RIGHT  = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Left,
    Middle,
    Right,
}

impl Button {
    /// Maps a DOM `MouseEvent.button` value.
    pub const fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }

    const fn flag(self) -> MouseButtons {
        match self {
            Self::Left => MouseButtons::LEFT,
            Self::Middle => MouseButtons::MIDDLE,
            Self::Right => MouseButtons::RIGHT,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverTarget {
    /// The whole board container.
    Board,
    Cell(Coord2),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvent {
    Hover(Coord2),
    HoverExit(HoverTarget),
    Down { button: Button, ctrl: bool },
    Up { button: Button, ctrl: bool },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    Preview(CellSet),
    Clear(CellSet),
    Reveal(Coord2),
    ToggleFlag(Coord2),
    /// Clears the previewed neighbourhood, then asks the engine to clear the
    /// neighbours of the cell.
    ChordReveal(Coord2),
}

/// Side effects of one step besides the new state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    pub gesture: Option<Gesture>,
    /// Set on the first release after a new game.
    pub start_timer: bool,
    /// Set on every release over a cell.
    pub released: bool,
}

/// `(left && right) || middle || (left && ctrl)`; right+ctrl alone is not a chord.
pub const fn chord_condition(left: bool, right: bool, middle: bool, ctrl: bool) -> bool {
    (left && right) || middle || (left && ctrl)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerState {
    pub buttons: MouseButtons,
    pub ctrl: bool,
    pub hovered: Option<Coord2>,
    pub first_release_pending: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            buttons: MouseButtons::empty(),
            ctrl: false,
            hovered: None,
            first_release_pending: true,
        }
    }
}

impl PointerState {
    pub fn left_down(&self) -> bool {
        self.buttons.contains(MouseButtons::LEFT)
    }

    pub fn right_down(&self) -> bool {
        self.buttons.contains(MouseButtons::RIGHT)
    }

    pub fn middle_down(&self) -> bool {
        self.buttons.contains(MouseButtons::MIDDLE)
    }

    pub fn is_chord(&self) -> bool {
        chord_condition(
            self.left_down(),
            self.right_down(),
            self.middle_down(),
            self.ctrl,
        )
    }

    pub fn step(mut self, event: PointerEvent, board: &BoardView) -> Result<(Self, Reaction)> {
        use PointerEvent::*;

        let mut reaction = Reaction::default();
        match event {
            Hover(coords) => {
                self.hovered = Some(coords);
                reaction.gesture = self.preview(coords, board)?;
            }
            HoverExit(HoverTarget::Board) => {
                self.hovered = None;
                // middle stays held on purpose, only left/right are dropped
                self.buttons.remove(MouseButtons::LEFT | MouseButtons::RIGHT);
            }
            HoverExit(HoverTarget::Cell(coords)) => {
                self.hovered = None;
                reaction.gesture = self.clear(coords, board)?;
            }
            Down { button, ctrl } => {
                self.buttons.insert(button.flag());
                self.ctrl = ctrl;
                if let Some(coords) = self.hovered {
                    reaction.gesture = self.preview(coords, board)?;
                }
            }
            Up { button, ctrl } => {
                if let Some(coords) = self.hovered {
                    reaction.released = true;
                    reaction.start_timer = core::mem::take(&mut self.first_release_pending);
                    reaction.gesture = self.classify_release(coords, board)?;
                }
                self.buttons.remove(button.flag());
                self.ctrl = ctrl;
            }
        }

        if let Some(gesture) = &reaction.gesture {
            log::trace!("{:?} -> {:?}", event, gesture);
        }
        Ok((self, reaction))
    }

    fn preview(&self, coords: Coord2, board: &BoardView) -> Result<Option<Gesture>> {
        if self.is_chord() {
            let mut cells = board.neighborhood(coords)?;
            cells.retain(|&mut pos| {
                board
                    .state_at(pos)
                    .map(CellState::is_pressable)
                    .unwrap_or(false)
            });
            Ok(Some(Gesture::Preview(cells)))
        } else if self.left_down() && board.state_at(coords)?.is_pressable() {
            Ok(Some(Gesture::Preview(CellSet::from_slice(&[coords]))))
        } else {
            Ok(None)
        }
    }

    fn clear(&self, coords: Coord2, board: &BoardView) -> Result<Option<Gesture>> {
        if self.is_chord() {
            Ok(Some(Gesture::Clear(board.neighborhood(coords)?)))
        } else if self.left_down() {
            board.cell(coords)?;
            Ok(Some(Gesture::Clear(CellSet::from_slice(&[coords]))))
        } else {
            Ok(None)
        }
    }

    fn classify_release(&self, coords: Coord2, board: &BoardView) -> Result<Option<Gesture>> {
        let state = board.state_at(coords)?;
        Ok(if self.is_chord() {
            Some(Gesture::ChordReveal(coords))
        } else if self.left_down() {
            state.is_pressable().then_some(Gesture::Reveal(coords))
        } else if self.right_down() {
            (!state.is_disabled()).then_some(Gesture::ToggleFlag(coords))
        } else {
            None
        })
    }
}
