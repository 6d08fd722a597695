//! Actions

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{Card, Colour, PlayerId};

/// Types of actions that a player can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// Play a card, pass, or call uno.
    Play,
    /// Announce the colour a just-played wild card stands for.
    ChooseColour,
}

impl Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ActionType::Play => "play",
            ActionType::ChooseColour => "choose a colour",
        })
    }
}

/// The payload for actions that a player can take during the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionData {
    /// Play a card from the hand.
    Play { card: Card },

    /// Forfeit the turn without drawing.
    Pass,

    /// Declare being down to a final card.
    CallUno,

    /// The announced colour for a wild card.
    Colour { colour: Colour },
}

/// The action that the game's state machine expects to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectAction {
    /// The player expected to take the action.
    pub player: PlayerId,
    /// The type of action.
    pub action: ActionType,
}

impl ExpectAction {
    /// Create a new [`ExpectAction`].
    pub fn new(player: PlayerId, action: ActionType) -> Self {
        Self { player, action }
    }

    /// Bind in a payload to create an [`Action`].
    pub fn with_data(self, data: ActionData) -> Action {
        Action::new(self.player, self.action, data)
    }
}

/// An action taken by a player during the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The player taking the action.
    pub player: PlayerId,
    /// The type of action.
    pub action: ActionType,
    /// The action payload.
    pub data: ActionData,
}

impl Action {
    /// Create a new [`Action`].
    pub fn new(player: PlayerId, action: ActionType, data: ActionData) -> Self {
        Self {
            player,
            action,
            data,
        }
    }
}
