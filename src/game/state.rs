//! Per-level game state: the deck, the current selection and the phase.
//!
//! All transitions are methods on [`GameState`] that report what happened as a
//! value, leaving display updates and scheduling to the caller.
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::GameConfig;
use super::deck::{Deck, Symbol};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Board cleared; input is locked until `next_level` starts.
    Transitioning { next_level: u8 },
    /// Countdown expired. Only a restart leaves this phase.
    TimedOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    One(usize),
    /// A pair awaiting resolution. Input is rejected while this is set.
    Two(usize, usize),
}

impl Selection {
    pub fn contains(self, index: usize) -> bool {
        match self {
            Selection::None => false,
            Selection::One(first) => first == index,
            Selection::Two(first, second) => first == index || second == index,
        }
    }

    pub fn is_locked(self) -> bool {
        matches!(self, Selection::Two(..))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    Ignored,
    Revealed {
        index: usize,
        symbol: Symbol,
    },
    Matched {
        index: usize,
        symbol: Symbol,
        pairs: u8,
    },
    LevelComplete {
        index: usize,
        symbol: Symbol,
        pairs: u8,
        next_level: u8,
    },
    Mismatched {
        index: usize,
        symbol: Symbol,
        first: usize,
    },
}

#[derive(Clone, Debug)]
pub struct GameState {
    level: u8,
    min_level: u8,
    max_level: u8,
    deck: Deck,
    matched: Vec<bool>,
    selection: Selection,
    matched_pairs: u8,
    phase: Phase,
    generation: u64,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Level bounds come from `config`. An unvalidated config still yields a
    /// usable range of at least one level.
    pub fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        let max_level = config.max_level().max(1);
        let min_level = config.min_level.clamp(1, max_level);
        GameState {
            level: min_level,
            min_level,
            max_level,
            deck: Deck::default(),
            matched: Vec::new(),
            selection: Selection::None,
            matched_pairs: 0,
            phase: Phase::Playing,
            generation: 0,
            rng,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn matched_pairs(&self) -> u8 {
        self.matched_pairs
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase != Phase::Playing
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_matched(&self, index: usize) -> bool {
        self.matched.get(index).copied().unwrap_or(false)
    }

    /// Face-up cards are the matched ones plus the current selection.
    pub fn is_revealed(&self, index: usize) -> bool {
        self.is_matched(index) || self.selection.contains(index)
    }

    pub fn start_level(&mut self, level: u8) {
        self.level = self.clamp_level(level);
        self.deck = Deck::shuffled(self.level, &mut self.rng);
        self.matched = vec![false; self.deck.len()];
        self.selection = Selection::None;
        self.matched_pairs = 0;
        self.phase = Phase::Playing;
        self.generation = self.generation.wrapping_add(1);
        tracing::info!(
            level = self.level,
            cards = self.deck.len(),
            generation = self.generation,
            "level started"
        );
    }

    pub fn handle_selection(&mut self, index: usize) -> SelectionOutcome {
        if self.phase != Phase::Playing
            || self.selection.is_locked()
            || self.selection.contains(index)
            || self.is_matched(index)
        {
            return SelectionOutcome::Ignored;
        }
        let Some(symbol) = self.deck.get(index) else {
            return SelectionOutcome::Ignored;
        };

        let first = match self.selection {
            Selection::None => {
                self.selection = Selection::One(index);
                tracing::debug!(index, "first card revealed");
                return SelectionOutcome::Revealed { index, symbol };
            }
            Selection::One(first) => first,
            Selection::Two(..) => return SelectionOutcome::Ignored,
        };

        self.selection = Selection::Two(first, index);
        if self.deck.get(first) != Some(symbol) {
            tracing::debug!(first, second = index, "mismatch");
            return SelectionOutcome::Mismatched {
                index,
                symbol,
                first,
            };
        }

        self.matched[first] = true;
        self.matched[index] = true;
        self.matched_pairs += 1;
        self.selection = Selection::None;
        tracing::debug!(first, second = index, pairs = self.matched_pairs, "pair matched");

        if self.matched_pairs < self.level {
            return SelectionOutcome::Matched {
                index,
                symbol,
                pairs: self.matched_pairs,
            };
        }

        let next_level = self.clamp_level(self.level.saturating_add(1));
        self.phase = Phase::Transitioning { next_level };
        tracing::info!(level = self.level, next_level, "level complete");
        SelectionOutcome::LevelComplete {
            index,
            symbol,
            pairs: self.matched_pairs,
            next_level,
        }
    }

    /// Flips a mismatched pair back over and unlocks input. Returns the two
    /// indices that were hidden, or `None` when no pair was pending.
    pub fn resolve_mismatch(&mut self) -> Option<(usize, usize)> {
        let Selection::Two(first, second) = self.selection else {
            return None;
        };
        self.selection = Selection::None;
        Some((first, second))
    }

    pub fn time_out(&mut self, baseline: u8) {
        self.phase = Phase::TimedOut;
        self.level = self.clamp_level(baseline);
        tracing::info!(baseline = self.level, "countdown expired");
    }

    fn clamp_level(&self, level: u8) -> u8 {
        level.clamp(self.min_level, self.max_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(level: u8) -> GameState {
        let mut state = GameState::with_rng(&GameConfig::default(), StdRng::seed_from_u64(42));
        state.start_level(level);
        state
    }

    /// Two indices holding different symbols.
    fn mismatched_pair(state: &GameState) -> (usize, usize) {
        let deck = state.deck();
        let second = (1..deck.len())
            .find(|&idx| deck.get(idx) != deck.get(0))
            .unwrap();
        (0, second)
    }

    #[test]
    fn start_level_resets_everything() {
        let mut state = state_at(4);
        let partner = state.deck().partner_of(0).unwrap();
        state.handle_selection(0);
        state.handle_selection(partner);
        state.time_out(4);

        state.start_level(6);
        assert_eq!(state.level(), 6);
        assert_eq!(state.deck().len(), 12);
        assert_eq!(state.matched_pairs(), 0);
        assert_eq!(state.selection(), Selection::None);
        assert_eq!(state.phase(), Phase::Playing);
        assert!((0..12).all(|idx| !state.is_revealed(idx)));
    }

    #[test]
    fn start_level_clamps_into_range() {
        let mut state = state_at(4);
        state.start_level(2);
        assert_eq!(state.level(), 4);
        state.start_level(12);
        assert_eq!(state.level(), 8);
        assert_eq!(state.deck().len(), 16);
    }

    #[test]
    fn each_start_bumps_generation() {
        let mut state = state_at(4);
        let generation = state.generation();
        state.start_level(4);
        assert_eq!(state.generation(), generation + 1);
    }

    #[test]
    fn first_pick_reveals_a_single_card() {
        let mut state = state_at(4);
        let symbol = state.deck().get(3).unwrap();
        assert_eq!(
            state.handle_selection(3),
            SelectionOutcome::Revealed { index: 3, symbol }
        );
        assert_eq!(state.selection(), Selection::One(3));
        assert!(state.is_revealed(3));
    }

    #[test]
    fn reselecting_the_same_card_is_ignored() {
        let mut state = state_at(4);
        state.handle_selection(2);
        let before = state.selection();
        assert_eq!(state.handle_selection(2), SelectionOutcome::Ignored);
        assert_eq!(state.selection(), before);
        assert_eq!(state.matched_pairs(), 0);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut state = state_at(4);
        assert_eq!(state.handle_selection(8), SelectionOutcome::Ignored);
        assert_eq!(state.selection(), Selection::None);
    }

    #[test]
    fn match_counts_and_clears_selection_immediately() {
        let mut state = state_at(4);
        let partner = state.deck().partner_of(0).unwrap();
        state.handle_selection(0);
        let outcome = state.handle_selection(partner);

        assert!(matches!(outcome, SelectionOutcome::Matched { pairs: 1, .. }));
        assert_eq!(state.matched_pairs(), 1);
        assert_eq!(state.selection(), Selection::None);
        assert!(state.is_revealed(0) && state.is_revealed(partner));
    }

    #[test]
    fn matched_cards_cannot_be_picked_again() {
        let mut state = state_at(4);
        let partner = state.deck().partner_of(0).unwrap();
        state.handle_selection(0);
        state.handle_selection(partner);

        assert_eq!(state.handle_selection(0), SelectionOutcome::Ignored);
        assert_eq!(state.handle_selection(partner), SelectionOutcome::Ignored);
        assert_eq!(state.selection(), Selection::None);
    }

    #[test]
    fn mismatch_locks_until_resolved() {
        let mut state = state_at(4);
        let (first, second) = mismatched_pair(&state);
        state.handle_selection(first);
        let outcome = state.handle_selection(second);

        assert!(matches!(outcome, SelectionOutcome::Mismatched { first: f, .. } if f == first));
        assert_eq!(state.selection(), Selection::Two(first, second));
        assert_eq!(state.matched_pairs(), 0);

        let other = (0..8).find(|idx| *idx != first && *idx != second).unwrap();
        assert_eq!(state.handle_selection(other), SelectionOutcome::Ignored);

        assert_eq!(state.resolve_mismatch(), Some((first, second)));
        assert_eq!(state.selection(), Selection::None);
        assert!(!state.is_revealed(first) && !state.is_revealed(second));
        assert_eq!(state.resolve_mismatch(), None);
    }

    #[test]
    fn clearing_the_board_enters_transition() {
        let mut state = state_at(4);
        let mut last = SelectionOutcome::Ignored;
        for index in 0..state.deck().len() {
            if state.is_matched(index) {
                continue;
            }
            let partner = state.deck().partner_of(index).unwrap();
            state.handle_selection(index);
            last = state.handle_selection(partner);
        }

        assert!(matches!(
            last,
            SelectionOutcome::LevelComplete {
                pairs: 4,
                next_level: 5,
                ..
            }
        ));
        assert_eq!(state.phase(), Phase::Transitioning { next_level: 5 });
        assert!(state.is_game_over());
        assert_eq!(state.handle_selection(0), SelectionOutcome::Ignored);
    }

    #[test]
    fn top_level_advances_to_itself() {
        let mut state = state_at(8);
        for index in 0..state.deck().len() {
            if state.is_matched(index) {
                continue;
            }
            let partner = state.deck().partner_of(index).unwrap();
            state.handle_selection(index);
            state.handle_selection(partner);
        }
        assert_eq!(state.phase(), Phase::Transitioning { next_level: 8 });
    }

    #[test]
    fn unvalidated_config_still_starts_a_level() {
        let empty = GameConfig {
            catalog: Vec::new(),
            ..GameConfig::default()
        };
        let mut state = GameState::with_rng(&empty, StdRng::seed_from_u64(3));
        state.start_level(4);
        assert_eq!(state.level(), 1);
        assert_eq!(state.deck().len(), 2);

        state.time_out(4);
        assert_eq!(state.level(), 1);

        let inverted = GameConfig {
            catalog: vec!["a".into(), "b".into()],
            min_level: 5,
            ..GameConfig::default()
        };
        let mut state = GameState::with_rng(&inverted, StdRng::seed_from_u64(3));
        state.start_level(0);
        assert_eq!(state.level(), 2);
        for index in 0..state.deck().len() {
            if state.is_matched(index) {
                continue;
            }
            let partner = state.deck().partner_of(index).unwrap();
            state.handle_selection(index);
            state.handle_selection(partner);
        }
        assert_eq!(state.phase(), Phase::Transitioning { next_level: 2 });
    }

    #[test]
    fn time_out_blocks_input_and_resets_level() {
        let mut state = state_at(7);
        state.time_out(4);
        assert_eq!(state.phase(), Phase::TimedOut);
        assert_eq!(state.level(), 4);
        assert_eq!(state.handle_selection(0), SelectionOutcome::Ignored);
    }
}
