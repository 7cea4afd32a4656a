//! Level countdown.
//!
//! The timer only ever touches the shared [`GameState`] to read the phase and,
//! on expiry, to end the run.
use super::config::GameConfig;
use super::scheduler::{Scheduler, Task, TaskId};
use super::state::{GameState, Phase};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Ticked { remaining: u32 },
    Expired,
}

#[derive(Debug, Default)]
pub struct CountdownTimer {
    remaining: u32,
    handle: Option<TaskId>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Resets the clock for the state's current level and schedules the first
    /// tick. Returns the starting number of seconds.
    pub fn start<S: Scheduler>(
        &mut self,
        state: &GameState,
        config: &GameConfig,
        scheduler: &mut S,
    ) -> u32 {
        self.stop(scheduler);
        self.remaining = config.countdown_secs(state.level());
        self.schedule_tick(state, config, scheduler);
        tracing::debug!(level = state.level(), seconds = self.remaining, "countdown started");
        self.remaining
    }

    pub fn stop<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn tick<S: Scheduler>(
        &mut self,
        generation: u64,
        state: &mut GameState,
        config: &GameConfig,
        scheduler: &mut S,
    ) -> TickOutcome {
        if generation != state.generation() {
            tracing::debug!(generation, current = state.generation(), "stale tick dropped");
            return TickOutcome::Ignored;
        }
        // The task being run is the one the handle pointed at.
        self.handle = None;
        if state.phase() != Phase::Playing {
            return TickOutcome::Ignored;
        }

        if self.remaining > 0 {
            self.remaining -= 1;
            self.schedule_tick(state, config, scheduler);
            return TickOutcome::Ticked {
                remaining: self.remaining,
            };
        }

        state.time_out(config.min_level);
        self.stop(scheduler);
        TickOutcome::Expired
    }

    fn schedule_tick<S: Scheduler>(
        &mut self,
        state: &GameState,
        config: &GameConfig,
        scheduler: &mut S,
    ) {
        let task = Task::Tick {
            generation: state.generation(),
        };
        self.handle = Some(scheduler.schedule(config.time_unit(), task));
    }
}
