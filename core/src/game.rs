use alloc::vec::Vec;

use crate::*;

/// The mine-placement/flood-fill/win-lose engine behind the board.
///
/// Every gesture returns the ordered outcome records to apply to the view.
pub trait Game: SymbolSource {
    fn new_game(&mut self, config: GameConfig);

    fn width(&self) -> Coord;

    fn length(&self) -> Coord;

    fn is_over(&self) -> bool;

    fn last_played(&self) -> Option<Coord2>;

    fn click(&mut self, coords: Coord2) -> Result<Vec<Outcome>>;

    fn toggle_flag(&mut self, coords: Coord2) -> Result<Vec<Outcome>>;

    fn clear_neighbors(&mut self, coords: Coord2) -> Result<Vec<Outcome>>;
}

/// Suggests moves for the current position of a [`Game`].
pub trait Solver {
    type Rules: Rules;

    fn new_game<G: Game>(&mut self, game: &G);

    /// Every move the solver is sure of; records the scouted position.
    fn all_plays<G: Game>(&mut self, game: &G) -> Vec<Move>;

    fn last_scouted(&self) -> Option<Coord2>;

    fn rules(&self) -> &Self::Rules;

    /// Square excerpt of the game's visible board centred on `center`.
    fn area<G: Game>(&self, game: &G, center: Coord2, size: usize) -> Result<SymbolGrid> {
        Window::extract(game, center, size).map(|window| window.symbols().clone())
    }
}
