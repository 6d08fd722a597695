//! The draw pile.

use itertools::iproduct;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{Card, Colour, GameError, Value};

/// Passes a reclaimed deck makes over itself before play resumes. One is
/// enough; the extra passes are a house habit.
const SHUFFLE_PASSES: usize = 10;

const ACTIONS: [Value; 3] = [Value::DrawTwo, Value::Reverse, Value::Skip];
const WILDS: [Value; 2] = [Value::DrawFour, Value::Wild];

/// The pool of undealt cards, drawn from the top.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Deck::full()
    }
}

impl Deck {
    /// The full 108-card set: per colour one 0, two each of 1-9 and two each
    /// of Draw Two / Reverse / Skip, plus four Draw Fours and four Wilds on
    /// Black.
    pub fn full() -> Self {
        let mut cards = Vec::with_capacity(108);
        for &colour in Colour::all_colours() {
            for n in 0u8..10 {
                cards.push(Card::new(colour, Value::Number(n)).expect("numbers are real cards"));
            }
            for n in 1u8..10 {
                cards.push(Card::new(colour, Value::Number(n)).expect("numbers are real cards"));
            }
        }
        for (&colour, &value) in iproduct!(Colour::all_colours(), ACTIONS.iter()) {
            let card = Card::new(colour, value).expect("action cards are real cards");
            cards.push(card);
            cards.push(card);
        }
        for &value in &WILDS {
            for _ in 0..4 {
                cards.push(Card::new(Colour::Black, value).expect("wild cards are real cards"));
            }
        }
        Deck { cards }
    }

    /// The number of cards remaining in the deck.
    pub fn count_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// The undealt cards, for inspection.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Randomizes the order of the deck, `times` passes over.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R, times: usize) {
        for _ in 0..times {
            self.cards.shuffle(rng);
        }
    }

    /// Removes and returns the top card.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    /// Returns `card` to the deck and draws a fresh one. Used to re-roll the
    /// opening card until it is numeric.
    pub fn redraw<R: Rng + ?Sized>(&mut self, card: Card, rng: &mut R) -> Result<Card, GameError> {
        self.cards.push(card);
        self.shuffle(rng, 1);
        self.draw()
    }

    /// Rebuilds an emptied deck from reclaimed discards. Wild cards come
    /// back carrying whatever colour was announced for them and are restored
    /// to Black.
    pub fn recreate<I, R>(&mut self, discards: I, rng: &mut R)
    where
        I: IntoIterator<Item = Card>,
        R: Rng + ?Sized,
    {
        debug_assert!(self.cards.is_empty(), "recreate only refills an empty deck");
        self.cards.extend(discards.into_iter().map(Card::normalized));
        self.shuffle(rng, SHUFFLE_PASSES);
    }
}
