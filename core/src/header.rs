use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

pub const MINE_COUNTER_DIGITS: usize = 2;
pub const TIMER_DIGITS: usize = 3;
pub const TIMER_MAX: u32 = 999;

/// Zero-pads `num` to `digits` characters, the sign counting as one of them.
pub fn format_counter(num: i32, digits: usize) -> String {
    format!("{:0width$}", num, width = digits)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Lose,
}

/// The displayed mine counter. It only ever moves by deltas against what is
/// currently shown and may go negative.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MineCounter {
    shown: i32,
}

impl MineCounter {
    pub fn new(mines: CellCount) -> Self {
        Self {
            shown: mines.into(),
        }
    }

    pub fn value(&self) -> i32 {
        self.shown
    }

    pub fn flag_placed(&mut self) {
        self.shown -= 1;
    }

    pub fn flag_removed(&mut self) {
        self.shown += 1;
    }

    pub fn display(&self) -> String {
        format_counter(self.shown, MINE_COUNTER_DIGITS)
    }
}

/// Source of the recurring one-second callback that drives [`GameTimer`].
///
/// Dropping the returned handle must cancel the callback.
pub trait Clock {
    type Handle;

    fn start_interval(&mut self) -> Self::Handle;
}

/// Elapsed-seconds counter with at most one live interval.
#[derive(Debug)]
pub struct GameTimer<H> {
    interval: Option<H>,
    elapsed: u32,
}

impl<H> Default for GameTimer<H> {
    fn default() -> Self {
        Self {
            interval: None,
            elapsed: 0,
        }
    }
}

impl<H> GameTimer<H> {
    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Starts counting from zero when stopped, stops when running.
    pub fn toggle<C: Clock<Handle = H>>(&mut self, clock: &mut C) {
        if self.stop() {
            return;
        }
        self.elapsed = 0;
        self.interval = Some(clock.start_interval());
        log::debug!("timer started");
    }

    /// Cancels the live interval, if any; returns whether one was cancelled.
    pub fn stop(&mut self) -> bool {
        match self.interval.take() {
            Some(interval) => {
                drop(interval);
                log::debug!("timer stopped at {}s", self.elapsed);
                true
            }
            None => false,
        }
    }

    /// Called from the interval; late ticks after a stop are ignored.
    pub fn tick(&mut self) -> bool {
        if self.is_running() {
            self.elapsed = self.elapsed.saturating_add(1);
            true
        } else {
            false
        }
    }

    pub fn display(&self) -> String {
        let shown = self.elapsed.min(TIMER_MAX) as i32;
        format_counter(shown, TIMER_DIGITS)
    }
}

/// Metrics strip above the board.
#[derive(Debug)]
pub struct Header<H> {
    pub mines: MineCounter,
    pub timer: GameTimer<H>,
    pub result: Option<GameResult>,
}

impl<H> Header<H> {
    pub fn new(mines: CellCount) -> Self {
        Self {
            mines: MineCounter::new(mines),
            timer: GameTimer::default(),
            result: None,
        }
    }

    pub fn announce(&mut self, result: GameResult) {
        log::debug!("game over: {:?}", result);
        self.result = Some(result);
        self.timer.stop();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    /// Counts live intervals so tests can check nothing leaks.
    #[derive(Clone, Default)]
    pub(crate) struct CountingClock {
        pub(crate) live: Rc<Cell<u32>>,
        pub(crate) started: Rc<Cell<u32>>,
    }

    pub(crate) struct CountingHandle(Rc<Cell<u32>>);

    impl Drop for CountingHandle {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    impl Clock for CountingClock {
        type Handle = CountingHandle;

        fn start_interval(&mut self) -> CountingHandle {
            self.live.set(self.live.get() + 1);
            self.started.set(self.started.get() + 1);
            CountingHandle(self.live.clone())
        }
    }

    #[test]
    fn counter_keeps_sign_and_padding() {
        assert_eq!(format_counter(10, 2), "10");
        assert_eq!(format_counter(9, 2), "09");
        assert_eq!(format_counter(0, 2), "00");
        assert_eq!(format_counter(-1, 2), "-1");
        assert_eq!(format_counter(-12, 2), "-12");
        assert_eq!(format_counter(7, 3), "007");
        assert_eq!(format_counter(-7, 3), "-07");
    }

    #[test]
    fn flag_deltas_round_trip() {
        let mut counter = MineCounter::new(10);
        for _ in 0..2 {
            counter.flag_placed();
            counter.flag_removed();
        }
        assert_eq!(counter.value(), 10);
        assert_eq!(counter.display(), "10");
    }

    #[test]
    fn counter_goes_negative() {
        let mut counter = MineCounter::new(1);
        counter.flag_placed();
        counter.flag_placed();
        assert_eq!(counter.display(), "-1");
    }

    #[test]
    fn toggle_starts_and_cancels_exactly_once() {
        let mut clock = CountingClock::default();
        let mut timer = GameTimer::default();

        timer.toggle(&mut clock);
        assert!(timer.is_running());
        assert_eq!(clock.live.get(), 1);

        timer.tick();
        timer.tick();
        assert_eq!(timer.display(), "002");

        timer.toggle(&mut clock);
        assert!(!timer.is_running());
        assert_eq!(clock.live.get(), 0);
        assert!(!timer.tick());
        assert_eq!(timer.elapsed(), 2);

        timer.toggle(&mut clock);
        assert_eq!(timer.elapsed(), 0);
        assert_eq!(clock.started.get(), 2);
        assert_eq!(clock.live.get(), 1);
    }

    #[test]
    fn timer_display_caps_at_999() {
        let mut clock = CountingClock::default();
        let mut timer = GameTimer::default();
        timer.toggle(&mut clock);
        for _ in 0..1200 {
            timer.tick();
        }
        assert_eq!(timer.display(), "999");
    }

    #[test]
    fn dropping_header_cancels_interval() {
        let mut clock = CountingClock::default();
        let mut header = Header::new(10);
        header.timer.toggle(&mut clock);
        assert_eq!(clock.live.get(), 1);
        drop(header);
        assert_eq!(clock.live.get(), 0);
    }
}
