use super::deck::Symbol;

/// Status line shown above the board. Hosts own the wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    LevelPrompt { level: u8 },
    Matched { pairs: u8, level: u8 },
    Mismatch,
    LevelComplete { level: u8 },
    TimedOut,
}

/// Everything the game needs from whatever draws it.
pub trait Presenter {
    /// Rebuild the board with one selectable slot per card.
    fn render_grid(&mut self, deck_size: usize, per_row: usize);

    fn set_slot_display(&mut self, index: usize, revealed: bool, symbol: Symbol);

    fn set_status(&mut self, status: &Status);

    fn set_timer(&mut self, seconds: u32);

    fn set_restart_visible(&mut self, visible: bool);
}
