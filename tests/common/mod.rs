#![allow(dead_code)]

use std::time::Duration;

use flipmatch::{Game, GameConfig, GameState, ManualScheduler, Presenter, Status, Symbol};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const UNIT: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Grid { deck_size: usize, per_row: usize },
    Slot { index: usize, revealed: bool, symbol: Symbol },
    Status(Status),
    Timer(u32),
    Restart(bool),
}

/// Presenter that keeps a log of every call plus the latest visible values.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<Event>,
    pub faces: Vec<bool>,
    pub status: Option<Status>,
    pub timer: Option<u32>,
    pub restart_visible: bool,
}

impl RecordingPresenter {
    pub fn statuses(&self) -> Vec<Status> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Status(status) => Some(*status),
                _ => None,
            })
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.events.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn render_grid(&mut self, deck_size: usize, per_row: usize) {
        self.faces = vec![false; deck_size];
        self.events.push(Event::Grid { deck_size, per_row });
    }

    fn set_slot_display(&mut self, index: usize, revealed: bool, symbol: Symbol) {
        if let Some(face) = self.faces.get_mut(index) {
            *face = revealed;
        }
        self.events.push(Event::Slot {
            index,
            revealed,
            symbol,
        });
    }

    fn set_status(&mut self, status: &Status) {
        self.status = Some(*status);
        self.events.push(Event::Status(*status));
    }

    fn set_timer(&mut self, seconds: u32) {
        self.timer = Some(seconds);
        self.events.push(Event::Timer(seconds));
    }

    fn set_restart_visible(&mut self, visible: bool) {
        self.restart_visible = visible;
        self.events.push(Event::Restart(visible));
    }
}

pub type TestGame = Game<ManualScheduler, RecordingPresenter>;

pub fn new_game(seed: u64) -> TestGame {
    let config = GameConfig::default();
    let state = GameState::with_rng(&config, StdRng::seed_from_u64(seed));
    Game::with_state(config, state, ManualScheduler::new(), RecordingPresenter::default())
}

pub fn started_game(seed: u64) -> TestGame {
    let mut game = new_game(seed);
    game.on_start_requested();
    game
}

/// Picks one pair without letting any time pass.
pub fn match_one_pair(game: &mut TestGame) {
    let deck = game.state().deck().clone();
    let index = (0..deck.len())
        .find(|idx| !game.state().is_matched(*idx))
        .expect("board already cleared");
    let partner = deck.partner_of(index).expect("every card has a partner");
    game.on_select(index);
    game.on_select(partner);
}

pub fn clear_board(game: &mut TestGame) {
    for _ in 0..game.state().level() {
        match_one_pair(game);
    }
}

/// Two unmatched indices with different symbols.
pub fn mismatched_pair(game: &TestGame) -> (usize, usize) {
    let deck = game.state().deck();
    let first = (0..deck.len())
        .find(|idx| !game.state().is_matched(*idx))
        .expect("board already cleared");
    let second = (0..deck.len())
        .find(|idx| !game.state().is_matched(*idx) && deck.get(*idx) != deck.get(first))
        .expect("at least two different symbols remain");
    (first, second)
}
