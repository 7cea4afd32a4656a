//! Wires the game state, the countdown, a scheduler and a presenter together.
use super::config::GameConfig;
use super::presenter::{Presenter, Status};
use super::scheduler::{ManualScheduler, Scheduler, Task};
use super::state::{GameState, Phase, SelectionOutcome};
use super::timer::{CountdownTimer, TickOutcome};

pub struct Game<S, P> {
    config: GameConfig,
    state: GameState,
    timer: CountdownTimer,
    scheduler: S,
    presenter: P,
}

impl<S: Scheduler, P: Presenter> Game<S, P> {
    pub fn new(config: GameConfig, scheduler: S, presenter: P) -> Self {
        let state = GameState::new(&config);
        Self::with_state(config, state, scheduler, presenter)
    }

    pub fn with_state(config: GameConfig, state: GameState, scheduler: S, presenter: P) -> Self {
        Game {
            config,
            state,
            timer: CountdownTimer::new(),
            scheduler,
            presenter,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn on_start_requested(&mut self) {
        self.begin_level(self.config.min_level);
    }

    pub fn on_restart_requested(&mut self) {
        self.presenter.set_restart_visible(false);
        self.begin_level(self.config.min_level);
    }

    pub fn on_select(&mut self, index: usize) {
        match self.state.handle_selection(index) {
            SelectionOutcome::Ignored => {}
            SelectionOutcome::Revealed { index, symbol } => {
                self.presenter.set_slot_display(index, true, symbol);
            }
            SelectionOutcome::Matched {
                index,
                symbol,
                pairs,
            } => {
                self.presenter.set_slot_display(index, true, symbol);
                self.presenter.set_status(&Status::Matched {
                    pairs,
                    level: self.state.level(),
                });
            }
            SelectionOutcome::LevelComplete {
                index,
                symbol,
                pairs,
                next_level,
            } => {
                let level = self.state.level();
                self.presenter.set_slot_display(index, true, symbol);
                self.presenter.set_status(&Status::Matched { pairs, level });
                self.presenter.set_status(&Status::LevelComplete { level });
                // No tick may land between now and the next level's countdown.
                self.timer.stop(&mut self.scheduler);
                let task = Task::StartNextLevel {
                    generation: self.state.generation(),
                    level: next_level,
                };
                self.scheduler.schedule(self.config.time_unit(), task);
            }
            SelectionOutcome::Mismatched { index, symbol, .. } => {
                self.presenter.set_slot_display(index, true, symbol);
                self.presenter.set_status(&Status::Mismatch);
                let task = Task::HideMismatch {
                    generation: self.state.generation(),
                };
                self.scheduler.schedule(self.config.time_unit(), task);
            }
        }
    }

    /// Runs a task whose delay has elapsed.
    pub fn run_task(&mut self, task: Task) {
        match task {
            Task::HideMismatch { generation } => self.hide_mismatch(generation),
            Task::StartNextLevel { generation, level } => {
                let expected = Phase::Transitioning { next_level: level };
                if generation != self.state.generation() || self.state.phase() != expected {
                    tracing::debug!(generation, level, "stale level advance dropped");
                    return;
                }
                self.begin_level(level);
            }
            Task::Tick { generation } => self.tick(generation),
        }
    }

    fn begin_level(&mut self, level: u8) {
        self.state.start_level(level);
        let deck_size = self.state.deck().len();
        self.presenter.render_grid(deck_size, self.config.columns);
        self.presenter.set_status(&Status::LevelPrompt {
            level: self.state.level(),
        });
        let seconds = self.timer.start(&self.state, &self.config, &mut self.scheduler);
        self.presenter.set_timer(seconds);
    }

    fn hide_mismatch(&mut self, generation: u64) {
        if generation != self.state.generation() {
            tracing::debug!(generation, "stale mismatch reset dropped");
            return;
        }
        let Some((first, second)) = self.state.resolve_mismatch() else {
            return;
        };
        for index in [first, second] {
            if let Some(symbol) = self.state.deck().get(index) {
                self.presenter.set_slot_display(index, false, symbol);
            }
        }
        if self.state.phase() == Phase::Playing {
            self.presenter.set_status(&Status::LevelPrompt {
                level: self.state.level(),
            });
        }
    }

    fn tick(&mut self, generation: u64) {
        let outcome = self
            .timer
            .tick(generation, &mut self.state, &self.config, &mut self.scheduler);
        match outcome {
            TickOutcome::Ignored => {}
            TickOutcome::Ticked { remaining } => {
                tracing::trace!(remaining, "tick");
                self.presenter.set_timer(remaining);
            }
            TickOutcome::Expired => {
                self.presenter.set_status(&Status::TimedOut);
                self.presenter.set_restart_visible(true);
            }
        }
    }
}

impl<P: Presenter> Game<ManualScheduler, P> {
    /// Moves the virtual clock forward, running every task that falls due.
    pub fn advance(&mut self, by: std::time::Duration) {
        let until = self.scheduler.now() + by;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.advance_to(until);
    }
}
