//! Automated player.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{ActionData, ActionType, Card, Colour, Event, Player, PlayerError, PlayerState, Value};

#[derive(Debug)]
struct Inner {
    rng: StdRng,
}

/// The automated participant.
#[derive(Debug)]
pub struct Robot(Mutex<Inner>);

impl Robot {
    pub fn from_seed(seed: u64) -> Self {
        Robot(Mutex::new(Inner {
            rng: StdRng::seed_from_u64(seed),
        }))
    }

    pub fn into_player(self) -> Arc<dyn Player> {
        Arc::new(self)
    }
}

impl Player for Robot {
    fn take_action(&self, state: PlayerState, action: ActionType) -> ActionData {
        let mut inner = self.0.lock().unwrap();
        match action {
            ActionType::Play => inner.choose(&state),
            ActionType::ChooseColour => ActionData::Colour {
                colour: pick_colour(state.hand()),
            },
        }
    }

    fn notify(&self, _: &Event) {}

    fn handle_error(&self, _: PlayerError) -> bool {
        false
    }
}

impl Inner {
    /// Move policy: declare uno whenever doing so is correct, answer a draw
    /// card in kind when possible, otherwise pick uniformly among the legal
    /// plays, otherwise pass.
    fn choose(&mut self, state: &PlayerState) -> ActionData {
        if !state.called_uno() && state.correct_uno_call() {
            return ActionData::CallUno;
        }
        let hand = state.hand();
        // A sole remaining draw card cannot be played (no finishing on an
        // action card), so the in-kind answer only applies to larger hands.
        let mut candidates: Vec<Card> = match state.top.value() {
            Value::DrawFour if hand.len() > 1 => hand
                .iter()
                .filter(|c| c.value() == Value::DrawFour)
                .copied()
                .collect(),
            Value::DrawTwo if hand.len() > 1 => hand
                .iter()
                .filter(|c| c.value() == Value::DrawTwo)
                .copied()
                .collect(),
            _ => vec![],
        };
        if candidates.is_empty() {
            candidates = state.legal_plays().into_iter().map(|(_, c)| c).collect();
        }
        match candidates.choose(&mut self.rng) {
            Some(&card) => ActionData::Play { card },
            None => ActionData::Pass,
        }
    }
}

/// Picks the colour the hand holds most of, with a fixed preference order
/// breaking ties and standing in for an empty hand.
fn pick_colour(hand: &[Card]) -> Colour {
    let mut best = (Colour::all_colours()[0], 0);
    for &colour in Colour::all_colours() {
        let count = hand.iter().filter(|c| c.colour() == colour).count();
        if count > best.1 {
            best = (colour, count);
        }
    }
    best.0
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::super::{Direction, PlayerId, Seat};
    use super::*;

    fn card(s: &str) -> Card {
        Card::from_str(s).unwrap()
    }

    fn seat(hand: &[&str]) -> Seat {
        let mut seat = Seat::new(PlayerId::new(1));
        seat.hand = hand.iter().map(|s| card(s)).collect();
        seat
    }

    fn choose(seat: &Seat, top: Card, pending: u8) -> ActionData {
        let state = PlayerState::new(
            seat.id,
            top,
            Direction::Clockwise,
            pending,
            seat,
            std::slice::from_ref(seat),
        );
        Robot::from_seed(0).take_action(state, ActionType::Play)
    }

    #[test]
    fn test_answers_draw_four_in_kind() {
        let seat = seat(&["K+4", "R5"]);
        let top = card("K+4").painted(Colour::Red);
        assert_eq!(choose(&seat, top, 4), ActionData::Play { card: card("K+4") });
    }

    #[test]
    fn test_answers_draw_two_in_kind() {
        // The red DrawTwo is preferred even though the blue zero matches.
        let seat = seat(&["R+2", "B0"]);
        assert_eq!(
            choose(&seat, card("B+2"), 2),
            ActionData::Play { card: card("R+2") }
        );
    }

    #[test]
    fn test_calls_uno_once() {
        let mut seat = seat(&["R5", "G9"]);
        assert_eq!(choose(&seat, card("R3"), 0), ActionData::CallUno);
        // Once the call is on record, the actual move follows.
        seat.called_uno = true;
        assert_eq!(
            choose(&seat, card("R3"), 0),
            ActionData::Play { card: card("R5") }
        );
    }

    #[test]
    fn test_passes_without_moves() {
        let seat = seat(&["B4", "Y1"]);
        assert_matches!(choose(&seat, card("R3"), 0), ActionData::Pass);
    }

    #[test]
    fn test_wont_go_out_on_an_action_card() {
        // The sole DrawTwo matches the top card but cannot end the game.
        let seat = seat(&["R+2"]);
        assert_matches!(choose(&seat, card("R3"), 0), ActionData::Pass);
    }

    #[test]
    fn test_picks_dominant_colour() {
        assert_eq!(pick_colour(&[card("G1"), card("G2"), card("R5")]), Colour::Green);
        assert_eq!(pick_colour(&[]), Colour::Red);
        // Ties break on the fixed preference order.
        assert_eq!(pick_colour(&[card("B5"), card("Y5")]), Colour::Yellow);
    }
}
