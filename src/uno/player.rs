//! Participants.

use std::sync::Arc;

use super::{
    ActionData, ActionType, Card, Colour, Direction, DrawReason, Event, PlayerError, PlayerId,
    Seat, Status, Value,
};

mod console;
mod robot;
pub use console::Console;
pub use robot::Robot;

/// A capability for choosing moves. The engine decides *whose* turn it is
/// and *what kind* of decision is due; implementations only decide which
/// option to take.
pub trait Player {
    /// Chooses the next action of the given type. The returned data is
    /// validated by the engine; a recoverable rejection comes back through
    /// [`handle_error`](Player::handle_error).
    fn take_action(&self, state: PlayerState, action: ActionType) -> ActionData;

    /// A notification of an event that all players can see.
    fn notify(&self, event: &Event);

    /// Indicates that the player has made an invalid selection.
    ///
    /// The implementation may return true, if a retry is desired. Otherwise,
    /// the invalid selection will be converted into a fatal error.
    fn handle_error(&self, err: PlayerError) -> bool;
}

/// Placeholder occupying the seat of a player who has gone out. It keeps the
/// seat addressable without special-casing absence, but is never consulted
/// for a real decision.
#[derive(Debug, Default)]
pub struct Finished;

impl Finished {
    pub fn into_player(self) -> Arc<dyn Player> {
        Arc::new(self)
    }
}

impl Player for Finished {
    fn take_action(&self, _: PlayerState, _: ActionType) -> ActionData {
        ActionData::Pass
    }

    fn notify(&self, _: &Event) {}

    fn handle_error(&self, _: PlayerError) -> bool {
        false
    }
}

/// Public view of one seat.
#[derive(Debug, Clone, Copy)]
pub struct SeatSummary {
    pub id: PlayerId,
    pub cards: usize,
    pub called_uno: bool,
    pub status: Status,
}

/// The state visible to a particular seat.
#[derive(Debug)]
pub struct PlayerState<'a> {
    /// The seat that has access to this state.
    pub id: PlayerId,
    /// The card due a legal response.
    pub top: Card,
    /// The current rotation sense.
    pub direction: Direction,
    /// Cards owed by whoever next fails to extend the draw chain.
    pub pending_draw: u8,
    seat: &'a Seat,
    seats: &'a [Seat],
}

impl<'a> PlayerState<'a> {
    /// Creates a new [`PlayerState`].
    pub fn new(
        id: PlayerId,
        top: Card,
        direction: Direction,
        pending_draw: u8,
        seat: &'a Seat,
        seats: &'a [Seat],
    ) -> Self {
        Self {
            id,
            top,
            direction,
            pending_draw,
            seat,
            seats,
        }
    }

    /// The player's own hand, in selection order.
    pub fn hand(&self) -> &[Card] {
        &self.seat.hand
    }

    /// Whether this player has already called uno this turn.
    pub fn called_uno(&self) -> bool {
        self.seat.called_uno
    }

    /// Public information about every seat: hand sizes, who has called uno,
    /// who has finished and at what rank.
    pub fn table(&self) -> Vec<SeatSummary> {
        self.seats
            .iter()
            .map(|seat| SeatSummary {
                id: seat.id,
                cards: seat.hand.len(),
                called_uno: seat.called_uno,
                status: seat.status,
            })
            .collect()
    }

    /// The playable (index, card) pairs against the current top card.
    pub fn legal_plays(&self) -> Vec<(usize, Card)> {
        self.seat.legal_plays(self.top)
    }

    /// Whether declaring uno right now would be correct.
    pub fn correct_uno_call(&self) -> bool {
        self.seat.correct_uno_call(self.top)
    }
}
