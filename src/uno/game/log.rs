//! A replayable log of actions.

use delegate::delegate;
use serde::{Deserialize, Serialize};

use crate::uno::{
    Action, Card, Event, ExpectAction, Game, GameConfig, GameError, PlayerId, PlayerState,
};

/// A record of a game: the initial conditions plus every action applied, in
/// order. Since the configuration carries the seed, replaying the actions
/// reproduces the game exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    config: GameConfig,
    actions: Vec<Action>,
}

impl Log {
    /// Creates a new, empty [`Log`] for the given configuration.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            actions: vec![],
        }
    }

    /// The initial conditions of the recorded game.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The recorded actions, oldest first.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Rebuilds the game state this log describes.
    pub fn replay(&self) -> Result<Game, GameError> {
        let mut game = Game::new(self.config)?;
        for action in &self.actions {
            game.apply_action(*action)?;
            while game.pop_event().is_some() {}
        }
        Ok(game)
    }
}

/// A [`Game`] that records every action it applies.
#[derive(Debug)]
pub struct LoggingGame {
    game: Game,
    log: Log,
}

impl LoggingGame {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Ok(Self {
            game: Game::new(config)?,
            log: Log::new(config),
        })
    }

    delegate! {
        to self.game {
            pub fn next_action(&self) -> Option<ExpectAction>;
            pub fn player_state(&self, id: PlayerId) -> PlayerState<'_>;
            pub fn pop_event(&mut self) -> Option<Event>;
            pub fn top_card(&self) -> Card;
            pub fn is_done(&self) -> bool;
            pub fn rankings(&self) -> Option<&[PlayerId]>;
        }
    }

    pub fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        self.game.apply_action(action)?;
        self.log.push(action);
        Ok(())
    }

    /// Returns an immutable reference to the log.
    pub fn log(&self) -> &Log {
        &self.log
    }
}

#[cfg(test)]
mod test {
    use crate::uno::{Player, Robot};

    use super::*;

    #[test]
    fn test_replay_reproduces_game() {
        let config = GameConfig::new(3, 0, 23);
        let mut game = LoggingGame::new(config).unwrap();
        let robots: Vec<Robot> = (0..3).map(|i| Robot::from_seed(100 + i)).collect();
        let mut turns = 0;
        while let Some(expect) = game.next_action() {
            turns += 1;
            assert!(turns < 100_000, "game failed to terminate");
            let data = robots[expect.player.index()]
                .take_action(game.player_state(expect.player), expect.action);
            game.apply_action(expect.with_data(data)).unwrap();
            while game.pop_event().is_some() {}
        }

        let replayed = game.log().replay().unwrap();
        assert!(replayed.is_done());
        assert_eq!(replayed.rankings(), game.rankings());
        assert_eq!(replayed.top_card(), game.top_card());
    }

    #[test]
    fn test_log_round_trips_through_json() {
        let config = GameConfig::new(2, 0, 5);
        let mut game = LoggingGame::new(config).unwrap();
        // Record a handful of robot turns, then serialize.
        let robot = Robot::from_seed(9);
        for _ in 0..10 {
            let expect = match game.next_action() {
                Some(expect) => expect,
                None => break,
            };
            let data = robot.take_action(game.player_state(expect.player), expect.action);
            game.apply_action(expect.with_data(data)).unwrap();
        }
        let json = serde_json::to_string(game.log()).unwrap();
        let parsed: Log = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed, game.log());
    }
}
