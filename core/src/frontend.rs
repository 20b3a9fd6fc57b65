use crate::*;

/// Orchestrates one game: pointer events go through [`PointerState::step`],
/// gestures go to the [`Game`], and outcomes land on the board.
pub struct Frontend<G, S, C: Clock> {
    game: G,
    solver: Option<S>,
    clock: C,
    session: Session<C::Handle>,
}

impl<G: Game, S: Solver, C: Clock> Frontend<G, S, C> {
    pub fn new(game: G, solver: Option<S>, clock: C, config: GameConfig) -> Self {
        let mut frontend = Self {
            game,
            solver,
            clock,
            session: Session::new(config),
        };
        frontend.new_game(config);
        frontend
    }

    /// Starts over; the previous session, timer included, is discarded.
    pub fn new_game(&mut self, config: GameConfig) {
        log::debug!("starting {}x{} game with {} mines", config.size.0, config.size.1, config.mines);
        self.game.new_game(config);
        if let Some(solver) = self.solver.as_mut() {
            solver.new_game(&self.game);
        }
        self.session = Session::new(config);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn has_solver(&self) -> bool {
        self.solver.is_some()
    }

    pub fn board(&self) -> &BoardView {
        &self.session.board
    }

    pub fn header(&self) -> &Header<C::Handle> {
        &self.session.header
    }

    pub fn advisory(&self) -> Option<&'static str> {
        self.session.advisory
    }

    pub fn tip(&self) -> Option<&Tip> {
        self.session.tip.as_ref()
    }

    /// One second has passed; returns whether the display changed.
    pub fn tick(&mut self) -> bool {
        self.session.header.timer.tick()
    }

    pub fn pointer(&mut self, event: PointerEvent) -> Result<()> {
        log::trace!("pointer event: {:?}", event);
        let (pointer, reaction) = self.session.pointer.step(event, &self.session.board)?;
        self.session.pointer = pointer;

        if reaction.released {
            self.session.advisory = None;
        }
        if reaction.start_timer {
            self.session.header.timer.toggle(&mut self.clock);
        }
        match reaction.gesture {
            Some(gesture) => self.dispatch(gesture),
            None => Ok(()),
        }
    }

    fn dispatch(&mut self, gesture: Gesture) -> Result<()> {
        log::debug!("gesture: {:?}", gesture);
        let board = &mut self.session.board;
        let outcomes = match gesture {
            Gesture::Preview(cells) => return board.press(&cells),
            Gesture::Clear(cells) => return board.unpress(&cells),
            Gesture::Reveal(coords) => {
                board.unpress(&[coords])?;
                self.game.click(coords)?
            }
            Gesture::ToggleFlag(coords) => self.game.toggle_flag(coords)?,
            Gesture::ChordReveal(coords) => {
                let cells = board.neighborhood(coords)?;
                board.unpress(&cells)?;
                self.game.clear_neighbors(coords)?
            }
        };
        self.session.apply(&outcomes)
    }

    /// Shows the next suggested move, or the advisory when there is none.
    pub fn help(&mut self) -> Result<()> {
        if self.game.is_over() {
            return Ok(());
        }
        let Some(solver) = self.solver.as_mut() else {
            return Ok(());
        };

        let session = &mut self.session;
        if self.game.last_played() != solver.last_scouted() {
            session.moves.replace(solver.all_plays(&self.game));
        }

        let Some(play) = session.moves.next_move().cloned() else {
            log::debug!("solver has no moves");
            session.advisory = Some(NO_MOVES_ADVISORY);
            session.tip = None;
            return Ok(());
        };

        let tip = render_tip(&session.board, &play, solver.rules())?;
        prime_board(&mut session.board, &play)?;
        session.tip = Some(tip);
        session.advisory = None;
        Ok(())
    }
}
