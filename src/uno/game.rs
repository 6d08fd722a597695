//! The turn engine.
//!
//! A game is driven from the outside, the same way a player would drive it:
//! [`next_action`](Game::next_action) names the seat that owes a decision
//! and the kind of decision owed, [`apply_action`](Game::apply_action)
//! submits it, and everything automatic in between (skipping finished seats,
//! forced draws, chain resolution, uno penalties) happens inside the engine
//! when the turn is handed over. Observable side effects surface through the
//! event queue.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::{
    Action, ActionData, ActionType, Card, Colour, Deck, Direction, DrawReason, Event, ExpectAction,
    GameError, PlayerError, PlayerId, PlayerState, Seat, Status, Value,
};

mod log;
pub use log::{Log, LoggingGame};

pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 10;

/// Cards dealt to each seat at the start.
const INITIAL_HAND: usize = 7;
/// Penalty for forgetting to call uno, or for calling it without cause.
const UNO_PENALTY: u8 = 3;
/// Passes over the deck before dealing.
const SHUFFLE_PASSES: usize = 10;

/// Initial conditions for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Total seats at the table.
    pub players: u8,
    /// Seats `1..=humans` are interactive, the rest are automated.
    pub humans: u8,
    /// Seed for the engine's shuffling.
    pub seed: u64,
}

impl GameConfig {
    /// Creates a new [`GameConfig`].
    pub fn new(players: u8, humans: u8, seed: u64) -> Self {
        Self {
            players,
            humans,
            seed,
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.players < MIN_PLAYERS || self.players > MAX_PLAYERS {
            return Err(GameError::InvalidConfig("a game seats 2 to 10 players"));
        }
        if self.humans > self.players {
            return Err(GameError::InvalidConfig("more humans than seats"));
        }
        Ok(())
    }
}

/// A game of Uno.
#[derive(Debug)]
pub struct Game {
    deck: Deck,
    /// Discards; the last element is the card due a legal response.
    pile: Vec<Card>,
    seats: Vec<Seat>,
    direction: Direction,
    /// Cards owed by whoever next fails to extend the draw chain.
    pending_draw: u8,
    /// Seats that have gone out, in finishing order.
    rankings: Vec<PlayerId>,
    next_action: Option<ExpectAction>,
    events: VecDeque<Event>,
    rng: StdRng,
}

impl Game {
    /// Deals a new game: seven cards to each seat, and a numbered opening
    /// card (wild and action cards cannot open, having no play to answer).
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut deck = Deck::full();
        deck.shuffle(&mut rng, SHUFFLE_PASSES);
        let mut seats: Vec<Seat> = (1..=config.players)
            .map(|id| Seat::new(PlayerId::new(id)))
            .collect();
        for _ in 0..INITIAL_HAND {
            for seat in &mut seats {
                seat.hand.push(deck.draw()?);
            }
        }
        let mut top = deck.draw()?;
        while !top.value().is_number() {
            top = deck.redraw(top, &mut rng)?;
        }
        let mut game = Game {
            deck,
            pile: vec![top],
            seats,
            direction: Direction::Clockwise,
            pending_draw: 0,
            rankings: vec![],
            next_action: None,
            events: VecDeque::new(),
            rng,
        };
        game.events.push_back(Event::Opened(top));
        game.begin_turn(PlayerId::new(1))?;
        Ok(game)
    }

    /// The card due a legal response.
    pub fn top_card(&self) -> Card {
        *self.pile.last().expect("pile is never empty")
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_draw(&self) -> u8 {
        self.pending_draw
    }

    /// Returns the next action that's required to advance the state of the
    /// game, or None if the game is over.
    pub fn next_action(&self) -> Option<ExpectAction> {
        self.next_action
    }

    /// Pops the oldest event from the queue of events.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Returns a bundle of state visible to the specified seat.
    pub fn player_state(&self, id: PlayerId) -> PlayerState<'_> {
        PlayerState::new(
            id,
            self.top_card(),
            self.direction,
            self.pending_draw,
            &self.seats[id.index()],
            &self.seats,
        )
    }

    pub fn is_done(&self) -> bool {
        self.next_action.is_none()
    }

    /// The finishing order, once the game is over. The last seat left
    /// holding cards receives no rank.
    pub fn rankings(&self) -> Option<&[PlayerId]> {
        if self.is_done() {
            Some(&self.rankings)
        } else {
            None
        }
    }

    /// Applies the specified action.
    pub fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        match (self.next_action, action) {
            (None, _) => Err(GameError::GameOver),
            (Some(ExpectAction { player, action }), a) if player != a.player || action != a.action => {
                Err(GameError::ExpectActioned { player, action })
            }
            (_, a) => self.handle(a),
        }
    }

    fn handle(&mut self, Action { player, action, data }: Action) -> Result<(), GameError> {
        match (action, data) {
            (ActionType::Play, ActionData::Play { card }) => self.play(player, card),
            (ActionType::Play, ActionData::Pass) => self.pass(player),
            (ActionType::Play, ActionData::CallUno) => self.call_uno(player),
            (ActionType::ChooseColour, ActionData::Colour { colour }) => {
                self.choose_colour(player, colour)
            }
            _ => Err(GameError::InvalidActionData),
        }
    }

    fn play(&mut self, player: PlayerId, card: Card) -> Result<(), GameError> {
        let top = self.top_card();
        let seat = &self.seats[player.index()];
        let index = seat
            .find_card(card)
            .ok_or(PlayerError::CardNotHeld(player, card))?;
        if !card.is_valid_move(top) {
            return Err(PlayerError::NotPlayable(player, card, top).into());
        }
        if seat.hand.len() == 1 && !card.value().is_number() {
            return Err(PlayerError::MustEndOnNumber(player, card).into());
        }
        // The move is committed. Answering a pending chain with anything but
        // another draw card means absorbing the chain first; drawn cards
        // append to the hand, so the index stays good.
        if self.pending_draw > 0 && !card.value().is_draw() {
            self.draw_pending(player)?;
        }
        self.seats[player.index()].hand.remove(index);
        self.events.push_back(Event::Played(player, card));
        self.resolve(player, card)
    }

    /// Resolves the effect of a freshly played card and hands the turn over.
    fn resolve(&mut self, player: PlayerId, card: Card) -> Result<(), GameError> {
        self.pile.push(card);
        match card.value() {
            Value::DrawTwo => self.pending_draw += card.value().draw_penalty(),
            Value::DrawFour => {
                self.pending_draw += card.value().draw_penalty();
                // The chain keeps pending while the colour is announced.
                self.next_action = Some(ExpectAction::new(player, ActionType::ChooseColour));
                return Ok(());
            }
            Value::Wild => {
                self.next_action = Some(ExpectAction::new(player, ActionType::ChooseColour));
                return Ok(());
            }
            Value::Skip => {
                // Advancing past finished seats is free; the first live seat
                // is the one that loses its turn.
                let mut skipped = self.next_id(player);
                while self.seats[skipped.index()].is_finished() {
                    skipped = self.next_id(skipped);
                }
                self.events.push_back(Event::Skipped(skipped));
                let next = self.next_id(skipped);
                return self.end_turn(next);
            }
            Value::Reverse => {
                if self.seats.len() == 2 {
                    // With two seats a Reverse hands the turn straight back.
                    return self.end_turn(player);
                }
                self.direction = self.direction.flipped();
                self.events.push_back(Event::Reversed(self.direction));
            }
            Value::Number(_) => (),
        }
        let next = self.next_id(player);
        self.end_turn(next)
    }

    fn pass(&mut self, player: PlayerId) -> Result<(), GameError> {
        if self.pending_draw > 0 {
            self.draw_pending(player)?;
        }
        self.events.push_back(Event::Passed(player));
        let next = self.next_id(player);
        self.end_turn(next)
    }

    /// An uno call is judged on the spot: a correct one goes on record and
    /// the same turn proceeds to the actual move, an incorrect one costs
    /// three cards with the turn retained.
    fn call_uno(&mut self, player: PlayerId) -> Result<(), GameError> {
        let top = self.top_card();
        let seat = &mut self.seats[player.index()];
        if seat.correct_uno_call(top) {
            seat.called_uno = true;
            self.events.push_back(Event::UnoCalled(player));
        } else {
            self.draw_cards(player, UNO_PENALTY, DrawReason::WrongUnoCall)?;
        }
        Ok(())
    }

    fn choose_colour(&mut self, player: PlayerId, colour: Colour) -> Result<(), GameError> {
        if colour == Colour::Black {
            return Err(PlayerError::InvalidColour(colour).into());
        }
        let top = self.pile.last_mut().expect("pile is never empty");
        *top = top.painted(colour);
        self.events.push_back(Event::ColourChosen(player, colour));
        let next = self.next_id(player);
        self.end_turn(next)
    }

    /// Closes out a completed turn: newly emptied hands finish, the game
    /// ends once at most one live seat remains, and otherwise the next turn
    /// begins.
    fn end_turn(&mut self, next: PlayerId) -> Result<(), GameError> {
        self.check_finished();
        if self.live_players() <= 1 {
            self.next_action = None;
            self.events.push_back(Event::Over(self.rankings.clone()));
            return Ok(());
        }
        self.begin_turn(next)
    }

    /// Runs the automatic preamble from the given seat until some live seat
    /// owes a decision: finished seats are passed over, a forgotten uno call
    /// is penalized, and a pending chain is either answerable or absorbed
    /// (costing that seat its turn).
    fn begin_turn(&mut self, mut id: PlayerId) -> Result<(), GameError> {
        loop {
            if self.seats[id.index()].is_finished() {
                id = self.next_id(id);
                continue;
            }
            if self.seats[id.index()].hand.len() == 1 && !self.seats[id.index()].called_uno {
                self.draw_cards(id, UNO_PENALTY, DrawReason::ForgotUno)?;
            }
            // The call is spent; a future low hand needs a fresh one.
            self.seats[id.index()].called_uno = false;
            if self.pending_draw > 0 {
                if self.seats[id.index()].can_counter(self.top_card()) {
                    self.next_action = Some(ExpectAction::new(id, ActionType::Play));
                    return Ok(());
                }
                self.draw_pending(id)?;
                id = self.next_id(id);
                continue;
            }
            if !self.seats[id.index()].has_valid_move(self.top_card()) {
                self.draw_cards(id, 1, DrawReason::NoValidMove)?;
            }
            self.next_action = Some(ExpectAction::new(id, ActionType::Play));
            return Ok(());
        }
    }

    /// Promotes every newly emptied hand to finished, next rank first.
    fn check_finished(&mut self) {
        for index in 0..self.seats.len() {
            if self.seats[index].is_finished() || !self.seats[index].hand.is_empty() {
                continue;
            }
            let rank = self.rankings.len() as u8 + 1;
            let id = self.seats[index].id;
            self.seats[index].status = Status::Finished { rank };
            self.rankings.push(id);
            self.events.push_back(Event::Finished(id, rank));
        }
    }

    fn live_players(&self) -> usize {
        self.seats.len() - self.rankings.len()
    }

    fn next_id(&self, id: PlayerId) -> PlayerId {
        id.next(self.direction, self.seats.len() as u8)
    }

    fn draw_pending(&mut self, player: PlayerId) -> Result<(), GameError> {
        let owed = self.pending_draw;
        self.pending_draw = 0;
        self.draw_cards(player, owed, DrawReason::Chain)
    }

    fn draw_cards(&mut self, player: PlayerId, n: u8, reason: DrawReason) -> Result<(), GameError> {
        for _ in 0..n {
            let card = self.draw_one()?;
            self.seats[player.index()].hand.push(card);
        }
        self.events.push_back(Event::Drew(player, n, reason));
        Ok(())
    }

    /// Draws a single card, reclaiming the pile (all but its top card) into
    /// the deck first when the deck has run dry. Failing even then means
    /// card conservation is broken, and the error carries that diagnosis up.
    fn draw_one(&mut self) -> Result<Card, GameError> {
        if self.deck.is_empty() {
            let top = self.pile.pop().expect("pile is never empty");
            let discards: Vec<Card> = self.pile.drain(..).collect();
            self.deck.recreate(discards, &mut self.rng);
            self.pile.push(top);
        }
        self.deck.draw()
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::super::{Player, Robot};
    use super::*;

    fn card(s: &str) -> Card {
        Card::from_str(s).unwrap()
    }

    fn cards(hand: &[&str]) -> Vec<Card> {
        hand.iter().map(|s| card(s)).collect()
    }

    fn game(players: u8) -> Game {
        Game::new(GameConfig::new(players, 0, 7)).unwrap()
    }

    fn drain(game: &mut Game) -> Vec<Event> {
        std::iter::from_fn(|| game.pop_event()).collect()
    }

    /// Puts `id` on turn with the given hand and top card, bypassing the
    /// preamble.
    fn rig(game: &mut Game, id: u8, hand: &[&str], top: Card) {
        let id = PlayerId::new(id);
        game.pile = vec![top];
        game.pending_draw = 0;
        game.seats[id.index()].hand = cards(hand);
        game.next_action = Some(ExpectAction::new(id, ActionType::Play));
        drain(game);
    }

    fn play(game: &mut Game, id: u8, s: &str) -> Result<(), GameError> {
        let id = PlayerId::new(id);
        game.apply_action(Action::new(
            id,
            ActionType::Play,
            ActionData::Play { card: card(s) },
        ))
    }

    /// Everything in play, normalized and sorted, for conservation checks.
    fn in_play(game: &Game) -> Vec<Card> {
        let mut all: Vec<Card> = game.deck.cards().to_vec();
        all.extend(game.pile.iter().copied());
        for seat in &game.seats {
            all.extend(seat.hand.iter().copied());
        }
        let mut all: Vec<Card> = all.into_iter().map(Card::normalized).collect();
        all.sort_unstable();
        all
    }

    fn full_set() -> Vec<Card> {
        let mut all = Deck::full().cards().to_vec();
        all.sort_unstable();
        all
    }

    #[test]
    fn test_deal() {
        for seed in 0..20 {
            let game = Game::new(GameConfig::new(4, 0, seed)).unwrap();
            for seat in &game.seats {
                // The first seat may have drawn already if it was dealt no
                // answer to the opening card.
                if seat.id == PlayerId::new(1) {
                    assert!(seat.hand.len() >= 7);
                } else {
                    assert_eq!(seat.hand.len(), 7);
                }
            }
            assert!(game.top_card().value().is_number());
            assert_eq!(in_play(&game), full_set());
            assert_matches!(
                game.next_action(),
                Some(ExpectAction {
                    player,
                    action: ActionType::Play,
                }) if player == PlayerId::new(1)
            );
        }
    }

    #[test]
    fn test_invalid_config() {
        assert_matches!(
            Game::new(GameConfig::new(1, 0, 0)),
            Err(GameError::InvalidConfig(_))
        );
        assert_matches!(
            Game::new(GameConfig::new(11, 0, 0)),
            Err(GameError::InvalidConfig(_))
        );
        assert_matches!(
            Game::new(GameConfig::new(4, 5, 0)),
            Err(GameError::InvalidConfig(_))
        );
    }

    #[test]
    fn test_number_rotates() {
        let mut game = game(3);
        rig(&mut game, 1, &["R5", "G9"], card("R3"));
        play(&mut game, 1, "R5").unwrap();
        assert_eq!(game.top_card(), card("R5"));
        assert_matches!(
            game.next_action(),
            Some(ExpectAction { player, .. }) if player == PlayerId::new(2)
        );
    }

    #[test]
    fn test_skip_over_finished() {
        let mut game = game(3);
        game.seats[1].hand.clear();
        game.seats[1].status = Status::Finished { rank: 1 };
        game.rankings.push(PlayerId::new(2));
        rig(&mut game, 1, &["Rs", "R5", "G7"], card("R3"));
        play(&mut game, 1, "Rs").unwrap();
        let events = drain(&mut game);
        // Finished player 2 is passed over for free; live player 3 is the
        // one skipped, and the turn lands back on player 1.
        assert!(events.contains(&Event::Skipped(PlayerId::new(3))));
        assert_matches!(
            game.next_action(),
            Some(ExpectAction { player, .. }) if player == PlayerId::new(1)
        );
    }

    #[test]
    fn test_two_player_reverse() {
        let mut game = game(2);
        rig(&mut game, 1, &["Rr", "R5"], card("R3"));
        play(&mut game, 1, "Rr").unwrap();
        // The card lands on the pile, but the turn comes straight back.
        assert_eq!(game.top_card(), card("Rr"));
        assert_eq!(game.direction(), Direction::Clockwise);
        assert_matches!(
            game.next_action(),
            Some(ExpectAction { player, .. }) if player == PlayerId::new(1)
        );
    }

    #[test]
    fn test_reverse_flips_direction() {
        let mut game = game(3);
        rig(&mut game, 1, &["Rr", "R5"], card("R3"));
        play(&mut game, 1, "Rr").unwrap();
        assert_eq!(game.direction(), Direction::Anticlockwise);
        assert_matches!(
            game.next_action(),
            Some(ExpectAction { player, .. }) if player == PlayerId::new(3)
        );
    }

    #[test]
    fn test_draw_chain_stacks_until_absorbed() {
        let mut game = game(3);
        game.seats[1].hand = cards(&["G+2", "B4"]);
        game.seats[2].hand = cards(&["B4", "B5"]);
        rig(&mut game, 1, &["R+2", "R5", "R6"], card("R3"));

        play(&mut game, 1, "R+2").unwrap();
        assert_eq!(game.pending_draw(), 2);
        assert_matches!(
            game.next_action(),
            Some(ExpectAction { player, .. }) if player == PlayerId::new(2)
        );

        // Player 2 stacks; player 3 cannot answer, absorbs all four and
        // loses the turn.
        play(&mut game, 2, "G+2").unwrap();
        let events = drain(&mut game);
        assert!(events.contains(&Event::Drew(PlayerId::new(3), 4, DrawReason::Chain)));
        assert_eq!(game.pending_draw(), 0);
        assert_eq!(game.seats[2].hand.len(), 6);
        assert_matches!(
            game.next_action(),
            Some(ExpectAction { player, .. }) if player == PlayerId::new(1)
        );
    }

    #[test]
    fn test_draw_four_colour_choice_scopes_counters() {
        let mut game = game(2);
        game.seats[1].hand = cards(&["G+2", "B9", "B8"]);
        rig(&mut game, 1, &["K+4", "R5", "R6"], card("R3"));

        play(&mut game, 1, "K+4").unwrap();
        assert_eq!(game.pending_draw(), 4);
        assert_matches!(
            game.next_action(),
            Some(ExpectAction {
                player,
                action: ActionType::ChooseColour,
            }) if player == PlayerId::new(1)
        );

        game.apply_action(Action::new(
            PlayerId::new(1),
            ActionType::ChooseColour,
            ActionData::Colour {
                colour: Colour::Green,
            },
        ))
        .unwrap();
        assert_eq!(game.top_card(), card("K+4").painted(Colour::Green));

        // The green DrawTwo answers the announced colour and extends the
        // chain to six.
        play(&mut game, 2, "G+2").unwrap();
        let events = drain(&mut game);
        assert!(events.contains(&Event::ColourChosen(PlayerId::new(1), Colour::Green)));
        assert!(events.contains(&Event::Drew(PlayerId::new(1), 6, DrawReason::Chain)));
        assert_eq!(game.pending_draw(), 0);
    }

    #[test]
    fn test_non_stacking_play_absorbs_chain() {
        let mut game = game(2);
        rig(&mut game, 1, &["R+2", "G5", "G6"], card("G+2"));
        game.pending_draw = 2;

        // Holding an answer but playing past it: the chain is drawn first,
        // then the card resolves normally.
        play(&mut game, 1, "G5").unwrap();
        let events = drain(&mut game);
        assert!(events.contains(&Event::Drew(PlayerId::new(1), 2, DrawReason::Chain)));
        assert!(events.contains(&Event::Played(PlayerId::new(1), card("G5"))));
        assert_eq!(game.pending_draw(), 0);
        assert_eq!(game.seats[0].hand.len(), 4);
        assert_eq!(game.top_card(), card("G5"));
    }

    #[test]
    fn test_pass_absorbs_chain() {
        let mut game = game(2);
        rig(&mut game, 1, &["R+2", "G5", "G6"], card("G+2"));
        game.pending_draw = 2;

        game.apply_action(Action::new(PlayerId::new(1), ActionType::Play, ActionData::Pass))
            .unwrap();
        let events = drain(&mut game);
        assert!(events.contains(&Event::Drew(PlayerId::new(1), 2, DrawReason::Chain)));
        assert!(events.contains(&Event::Passed(PlayerId::new(1))));
        assert_eq!(game.pending_draw(), 0);
        assert_eq!(game.seats[0].hand.len(), 5);
    }

    #[test]
    fn test_forgot_uno_penalty() {
        let mut game = game(2);
        game.pile = vec![card("R3")];
        game.seats[0].hand = cards(&["R5"]);
        game.seats[0].called_uno = false;
        drain(&mut game);

        game.begin_turn(PlayerId::new(1)).unwrap();
        let events = drain(&mut game);
        assert!(events.contains(&Event::Drew(PlayerId::new(1), 3, DrawReason::ForgotUno)));
        assert_eq!(game.seats[0].hand.len(), 4);
        assert!(!game.seats[0].called_uno);
    }

    #[test]
    fn test_called_uno_no_penalty() {
        let mut game = game(2);
        game.pile = vec![card("R3")];
        game.seats[0].hand = cards(&["R5"]);
        game.seats[0].called_uno = true;
        drain(&mut game);

        game.begin_turn(PlayerId::new(1)).unwrap();
        let events = drain(&mut game);
        assert!(!events
            .iter()
            .any(|e| matches!(e, Event::Drew(_, _, DrawReason::ForgotUno))));
        assert_eq!(game.seats[0].hand.len(), 1);
        // The call is spent and must be renewed on a future low hand.
        assert!(!game.seats[0].called_uno);
    }

    #[test]
    fn test_wrong_uno_call() {
        let mut game = game(2);
        rig(&mut game, 1, &["R5", "G9", "B1"], card("R3"));

        game.apply_action(Action::new(PlayerId::new(1), ActionType::Play, ActionData::CallUno))
            .unwrap();
        let events = drain(&mut game);
        assert!(events.contains(&Event::Drew(PlayerId::new(1), 3, DrawReason::WrongUnoCall)));
        assert_eq!(game.seats[0].hand.len(), 6);
        // The caller retains the turn.
        assert_matches!(
            game.next_action(),
            Some(ExpectAction { player, .. }) if player == PlayerId::new(1)
        );
    }

    #[test]
    fn test_correct_uno_call() {
        let mut game = game(2);
        rig(&mut game, 1, &["R5", "G9"], card("R3"));

        game.apply_action(Action::new(PlayerId::new(1), ActionType::Play, ActionData::CallUno))
            .unwrap();
        let events = drain(&mut game);
        assert!(events.contains(&Event::UnoCalled(PlayerId::new(1))));
        assert!(game.seats[0].called_uno);
        assert_eq!(game.seats[0].hand.len(), 2);
        // The same turn continues into the actual move.
        play(&mut game, 1, "R5").unwrap();
        assert_eq!(game.seats[0].hand.len(), 1);
    }

    #[test]
    fn test_no_valid_move_draws_once() {
        let mut game = game(2);
        game.pile = vec![card("R3")];
        game.seats[0].hand = cards(&["B4", "B5"]);
        drain(&mut game);

        game.begin_turn(PlayerId::new(1)).unwrap();
        let events = drain(&mut game);
        assert!(events.contains(&Event::Drew(PlayerId::new(1), 1, DrawReason::NoValidMove)));
        assert_eq!(game.seats[0].hand.len(), 3);
        // The choice is re-offered either way; passing stays legal.
        assert_matches!(
            game.next_action(),
            Some(ExpectAction { player, .. }) if player == PlayerId::new(1)
        );
    }

    #[test]
    fn test_illegal_last_card_leaves_state_alone() {
        let mut game = game(2);
        rig(&mut game, 1, &["R+2"], card("R3"));

        let result = play(&mut game, 1, "R+2");
        assert_matches!(
            result,
            Err(GameError::Player(PlayerError::MustEndOnNumber(..)))
        );
        assert_eq!(game.seats[0].hand, cards(&["R+2"]));
        assert_eq!(game.top_card(), card("R3"));
        assert_eq!(game.pending_draw(), 0);
    }

    #[test]
    fn test_not_playable_rejected() {
        let mut game = game(2);
        rig(&mut game, 1, &["B4", "B5"], card("R3"));
        assert_matches!(
            play(&mut game, 1, "B4"),
            Err(GameError::Player(PlayerError::NotPlayable(..)))
        );
        assert_matches!(
            play(&mut game, 1, "Y9"),
            Err(GameError::Player(PlayerError::CardNotHeld(..)))
        );
    }

    #[test]
    fn test_expect_validation() {
        let mut game = game(3);
        rig(&mut game, 1, &["R5", "G9"], card("R3"));
        assert_matches!(
            play(&mut game, 2, "R5"),
            Err(GameError::ExpectActioned { .. })
        );
        let colour = Action::new(
            PlayerId::new(1),
            ActionType::ChooseColour,
            ActionData::Colour {
                colour: Colour::Red,
            },
        );
        assert_matches!(
            game.apply_action(colour),
            Err(GameError::ExpectActioned { .. })
        );
    }

    #[test]
    fn test_finish_and_rankings() {
        let mut game = game(2);
        rig(&mut game, 1, &["R5"], card("R3"));
        play(&mut game, 1, "R5").unwrap();
        let events = drain(&mut game);
        assert!(events.contains(&Event::Finished(PlayerId::new(1), 1)));
        assert!(events.contains(&Event::Over(vec![PlayerId::new(1)])));
        assert!(game.is_done());
        assert_eq!(game.rankings(), Some(&[PlayerId::new(1)][..]));
        assert_matches!(
            play(&mut game, 2, "R5"),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn test_finish_keeps_game_going_with_three() {
        let mut game = game(3);
        rig(&mut game, 1, &["R5"], card("R3"));
        play(&mut game, 1, "R5").unwrap();
        let events = drain(&mut game);
        assert!(events.contains(&Event::Finished(PlayerId::new(1), 1)));
        assert!(!game.is_done());
        assert_eq!(game.rankings(), None);
        assert!(game.seats[0].is_finished());
        assert_eq!(game.seats[0].rank(), Some(1));
    }

    #[test]
    fn test_reclaims_pile_when_deck_runs_dry() {
        let mut game = game(2);
        game.pile = vec![card("R3")];
        game.seats[0].hand = cards(&["B4", "B5"]);
        // Move the whole deck onto the pile; the next forced draw has to
        // reclaim it.
        while !game.deck.is_empty() {
            let card = game.deck.draw().unwrap();
            game.pile.insert(0, card);
        }
        drain(&mut game);

        game.begin_turn(PlayerId::new(1)).unwrap();
        assert_eq!(game.seats[0].hand.len(), 3);
        assert_eq!(game.pile, vec![card("R3")]);
        assert!(!game.deck.is_empty());
    }

    #[test]
    fn test_empty_deck_violation_is_fatal() {
        let mut game = game(2);
        game.pile = vec![card("R3")];
        game.seats[0].hand = cards(&["B4", "B5"]);
        while !game.deck.is_empty() {
            game.deck.draw().unwrap();
        }
        drain(&mut game);

        assert_matches!(
            game.begin_turn(PlayerId::new(1)),
            Err(GameError::EmptyDeck)
        );
    }

    #[test]
    fn test_robot_game_conserves_and_finishes() {
        for seed in [11, 29, 47] {
            let config = GameConfig::new(4, 0, seed);
            let mut game = Game::new(config).unwrap();
            let robots: Vec<Robot> = (0..4).map(|i| Robot::from_seed(seed + i)).collect();
            let mut turns = 0;
            while let Some(expect) = game.next_action() {
                turns += 1;
                assert!(turns < 100_000, "game failed to terminate");
                let data = robots[expect.player.index()]
                    .take_action(game.player_state(expect.player), expect.action);
                game.apply_action(expect.with_data(data)).unwrap();
                assert_eq!(in_play(&game), full_set());
            }
            let rankings = game.rankings().unwrap();
            assert_eq!(rankings.len(), 3);
            // Ranks are dense, in order, and the loser has none.
            for (i, id) in rankings.iter().enumerate() {
                assert_eq!(game.seats[id.index()].rank(), Some(i as u8 + 1));
            }
        }
    }
}
