//! Presentation core of a mine-clearing game with solver tips.
//!
//! Rendering-agnostic: a substrate feeds [`PointerEvent`]s into a
//! [`Frontend`] and draws whatever [`BoardView`], [`Header`] and [`Tip`] hold
//! afterwards.

#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use frontend::*;
pub use game::*;
pub use header::*;
pub use input::*;
pub use layout::*;
pub use moves::*;
pub use outcome::*;
pub use rules::*;
pub use session::*;
pub use solver::*;
pub use symbol::*;
pub use tip::*;
pub use types::*;
pub use window::*;

mod board;
mod cell;
mod config;
mod engine;
mod error;
mod frontend;
mod game;
mod header;
mod input;
mod layout;
mod moves;
mod outcome;
mod rules;
mod session;
mod solver;
mod symbol;
mod tip;
mod types;
mod window;
