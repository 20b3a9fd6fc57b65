use crate::*;

pub const NO_MOVES_ADVISORY: &str = "Not sure of any moves at the moment. Take a guess";

/// Everything that lives for exactly one game. Dropping it drops the timer
/// handle, which cancels the interval.
#[derive(Debug)]
pub struct Session<H> {
    pub board: BoardView,
    pub pointer: PointerState,
    pub header: Header<H>,
    pub moves: MoveCache,
    pub advisory: Option<&'static str>,
    pub tip: Option<Tip>,
}

impl<H> Session<H> {
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: BoardView::new(config.size),
            pointer: PointerState::default(),
            header: Header::new(config.mines),
            moves: MoveCache::default(),
            advisory: None,
            tip: None,
        }
    }

    pub fn apply(&mut self, outcomes: &[Outcome]) -> Result<()> {
        OutcomeApplier::new(&mut self.board, &mut self.header).apply_all(outcomes)
    }
}
