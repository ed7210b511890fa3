//! Interval-timer state machine for one training session.
//!
//! All transitions are synchronous mutations of [`TimerState`]; the wall-clock
//! drive lives in [`crate::session`]. Keeping the machine pure makes the
//! guard conditions testable without real time.

use crate::types::{Difficulty, Speed};
use crate::{Error, Result};

/// Result of applying one tick to the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick arrived while the timer was not running and was discarded
    Ignored,
    /// Countdown decremented, rep still in progress
    Counting,
    /// Countdown reached zero: the timer stopped itself and the rep counted
    RepComplete,
}

/// State of the per-exercise interval timer
///
/// Invariants upheld by the transition methods:
/// - `current_set` stays within `[1, total_sets + 1]`
/// - `current_rep` stays within `[0, reps_per_set]`
/// - the countdown only decreases while running
/// - the session clock only increases while running
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerState {
    speed: Speed,
    difficulty: Difficulty,
    countdown_remaining: u32,
    running: bool,
    current_rep: u32,
    current_set: u32,
    session_elapsed: u32,
}

impl TimerState {
    pub fn new(speed: Speed, difficulty: Difficulty) -> Self {
        Self {
            speed,
            difficulty,
            countdown_remaining: 0,
            running: false,
            current_rep: 0,
            current_set: 1,
            session_elapsed: 0,
        }
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn countdown_remaining(&self) -> u32 {
        self.countdown_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_rep(&self) -> u32 {
        self.current_rep
    }

    pub fn current_set(&self) -> u32 {
        self.current_set
    }

    /// Seconds the timer has spent running since the session began
    pub fn session_elapsed(&self) -> u32 {
        self.session_elapsed
    }

    pub fn reps_per_set(&self) -> u32 {
        self.difficulty.reps_per_set()
    }

    pub fn total_sets(&self) -> u32 {
        self.difficulty.total_sets()
    }

    /// All reps of the current set are done
    pub fn set_complete(&self) -> bool {
        self.current_rep >= self.reps_per_set()
    }

    /// Derived terminal state: the set counter has moved past the last set
    pub fn is_complete(&self) -> bool {
        self.current_set > self.total_sets()
    }

    /// The final set's reps are exhausted and no further set can be started
    pub fn workout_done(&self) -> bool {
        self.is_complete() || (self.current_set == self.total_sets() && self.set_complete())
    }

    /// Begin a countdown from the configured speed duration
    ///
    /// Rejected while a countdown is already running and once the current
    /// set's reps are exhausted.
    pub fn start(&mut self) -> Result<()> {
        if self.running {
            return Err(Error::Timer("countdown already running".into()));
        }
        if self.set_complete() {
            return Err(Error::Timer(
                "set complete - advance to the next set or reset".into(),
            ));
        }
        self.countdown_remaining = self.speed.countdown_seconds();
        self.running = true;
        tracing::debug!(
            "Countdown started: {}s, set {}/{}, rep {}/{}",
            self.countdown_remaining,
            self.current_set,
            self.total_sets(),
            self.current_rep,
            self.reps_per_set()
        );
        Ok(())
    }

    /// Apply one second of wall-clock time
    ///
    /// The whole transition is atomic with respect to the pre-tick state: the
    /// session clock, the countdown decrement, and (on zero) the self-stop
    /// plus rep increment all happen in this one call. A tick that arrives
    /// after a stop or reset sees `running == false` and is discarded, so a
    /// stale timer firing can never advance the rep counter.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }

        self.session_elapsed += 1;
        self.countdown_remaining = self.countdown_remaining.saturating_sub(1);

        if self.countdown_remaining == 0 {
            self.running = false;
            self.current_rep += 1;
            tracing::debug!(
                "Rep complete: {}/{} in set {}",
                self.current_rep,
                self.reps_per_set(),
                self.current_set
            );
            TickOutcome::RepComplete
        } else {
            TickOutcome::Counting
        }
    }

    /// Move to the next set
    ///
    /// Only callable once the current set's reps are exhausted and a further
    /// set remains. Resets the rep counter for the new set.
    pub fn advance_set(&mut self) -> Result<()> {
        if !self.set_complete() {
            return Err(Error::Timer("reps remaining in the current set".into()));
        }
        if self.current_set >= self.total_sets() {
            return Err(Error::Timer("no sets remaining".into()));
        }
        self.current_set += 1;
        self.current_rep = 0;
        tracing::debug!("Advanced to set {}/{}", self.current_set, self.total_sets());
        Ok(())
    }

    /// Return every counter to its initial value and stop any countdown
    pub fn reset(&mut self) {
        self.running = false;
        self.countdown_remaining = 0;
        self.current_rep = 0;
        self.current_set = 1;
        self.session_elapsed = 0;
        tracing::debug!("Timer reset");
    }

    /// Change the countdown pace; rejected while running
    pub fn set_speed(&mut self, speed: Speed) -> Result<()> {
        if self.running {
            return Err(Error::Timer("stop the countdown before changing speed".into()));
        }
        self.speed = speed;
        Ok(())
    }

    /// Change the difficulty; rejected while running
    ///
    /// Switching to a difficulty with fewer reps per set clamps the rep
    /// counter so it never exceeds the new set size.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        if self.running {
            return Err(Error::Timer(
                "stop the countdown before changing difficulty".into(),
            ));
        }
        self.difficulty = difficulty;
        self.current_rep = self.current_rep.min(self.reps_per_set());
        Ok(())
    }
}
