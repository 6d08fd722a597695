//! Error types

use super::{ActionType, Card, Colour, PlayerId, Value};

/// A colour/value pairing that does not exist in the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} {1} is not a real card")]
pub struct MalformedCard(pub Colour, pub Value);

/// A recoverable selection error. The engine leaves the game untouched and
/// the participant is asked again.
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum PlayerError {
    /// The player doesn't actually hold the card they attempted to play.
    #[error("{0} does not hold {1}")]
    CardNotHeld(PlayerId, Card),

    /// The card does not answer the current top card.
    #[error("{0} cannot play {1} on {2}")]
    NotPlayable(PlayerId, Card, Card),

    /// A final card must be a numbered card.
    #[error("{0} cannot go out on {1}")]
    MustEndOnNumber(PlayerId, Card),

    /// Wild cards resolve to one of the four announceable colours.
    #[error("{0} is not a colour a wild card can take")]
    InvalidColour(Colour),
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Both the deck and the reclaimable part of the pile are exhausted.
    /// Card conservation makes this unreachable in a healthy game.
    #[error("the deck is exhausted and the pile has nothing left to reclaim")]
    EmptyDeck,
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("action contains invalid data")]
    InvalidActionData,
    #[error("expected {player} to {action}")]
    ExpectActioned {
        player: PlayerId,
        action: ActionType,
    },
    #[error("game over")]
    GameOver,
    #[error(transparent)]
    Player(#[from] PlayerError),
}
