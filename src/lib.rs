//! Memory-matching card game core.
//!
//! A grid of face-down cards is revealed two at a time. Matching pairs stay
//! face up, mismatches flip back after a short pause, and clearing the board
//! moves on to a larger deck with less time on the clock. Running out of time
//! ends the run until the player restarts from the easiest level.
//!
//! The state machine lives in [`game::state`] and [`game::timer`]; rendering
//! and wall-clock scheduling are reached through the [`Presenter`] and
//! [`Scheduler`] traits so the whole game can be driven from tests with a
//! [`ManualScheduler`].

pub mod game;

pub use game::config::GameConfig;
pub use game::deck::{Deck, Symbol};
pub use game::error::{ConfigError, Result};
pub use game::presenter::{Presenter, Status};
pub use game::scheduler::{ManualScheduler, Scheduler, Task, TaskId};
pub use game::session::Game;
pub use game::state::{GameState, Phase, Selection, SelectionOutcome};
pub use game::timer::{CountdownTimer, TickOutcome};
