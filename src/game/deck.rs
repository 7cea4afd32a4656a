use rand::Rng;
use rand::seq::SliceRandom;

/// Identity of a card face: its position in the symbol catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u8);

impl Symbol {
    pub fn new(index: u8) -> Self {
        Symbol(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The shuffled cards of one level. Each of the first `pairs` symbols of the
/// catalog appears exactly twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Symbol>,
}

impl Deck {
    pub fn shuffled<R: Rng + ?Sized>(pairs: u8, rng: &mut R) -> Self {
        let mut cards = Vec::with_capacity(pairs as usize * 2);
        for _ in 0..2 {
            cards.extend((0..pairs).map(Symbol));
        }
        cards.shuffle(rng);
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.cards.get(index).copied()
    }

    #[cfg(test)]
    fn symbols(&self) -> &[Symbol] {
        &self.cards
    }

    /// Index of the other card carrying the same symbol as `index`.
    pub fn partner_of(&self, index: usize) -> Option<usize> {
        let symbol = self.get(index)?;
        self.cards
            .iter()
            .enumerate()
            .position(|(idx, card)| idx != index && *card == symbol)
    }
}
