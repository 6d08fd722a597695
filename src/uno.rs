//! The game of Uno.

mod action;
mod card;
mod deck;
mod error;
mod game;
mod player;
mod seat;

use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use rand::Rng;

use self::action::{Action, ActionData, ActionType, ExpectAction};
use self::card::{Card, Colour, Value};
use self::deck::Deck;
use self::error::{GameError, MalformedCard, PlayerError};
use self::game::{Game, GameConfig, Log, LoggingGame};
use self::player::{Console, Finished, Player, PlayerState, Robot};
use self::seat::{Direction, PlayerId, Seat, Status};

use crate::args::Args;

/// An event that occurs during the game.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The opening card was turned up.
    Opened(Card),
    /// A player played a card.
    Played(PlayerId, Card),
    /// A player passed.
    Passed(PlayerId),
    /// A player drew cards.
    Drew(PlayerId, u8, DrawReason),
    /// A player declared being down to a final card.
    UnoCalled(PlayerId),
    /// A player lost their turn to a Skip.
    Skipped(PlayerId),
    /// A Reverse flipped the rotation.
    Reversed(Direction),
    /// A wild card was given a colour.
    ColourChosen(PlayerId, Colour),
    /// A player went out, with their finishing rank.
    Finished(PlayerId, u8),
    /// The game is over; seats listed in finishing order. The last seat
    /// still holding cards receives no rank.
    Over(Vec<PlayerId>),
}

/// Why the engine made a player draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal answer to the top card.
    NoValidMove,
    /// Absorbed a pending draw chain.
    Chain,
    /// Held a single card without having called uno.
    ForgotUno,
    /// Called uno without being down to a playable two cards.
    WrongUnoCall,
}

/// Runs the game with a simple command-line interface.
pub fn cli_main(args: &Args) -> anyhow::Result<()> {
    if let Some(path) = &args.replay {
        return replay_main(path);
    }
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let config = GameConfig::new(args.players, args.humans, seed);
    let mut game = LoggingGame::new(config)?;

    let console = Arc::new(Console::new(!args.no_color, args.humans >= 2));
    let mut choosers: Vec<Arc<dyn Player>> = (1..=config.players)
        .map(|id| {
            if id <= config.humans {
                console.clone() as Arc<dyn Player>
            } else {
                Robot::from_seed(seed.wrapping_add(u64::from(id))).into_player()
            }
        })
        .collect();

    println!(
        "Uno: {} seats, {} human (seed {seed}).",
        config.players, config.humans
    );
    println!("Declare uno *before* playing your second-to-last card, or draw three.");

    loop {
        while let Some(event) = game.pop_event() {
            console.notify(&event);
            if let Event::Finished(id, _) = event {
                choosers[id.index()] = Finished.into_player();
            }
        }
        let Some(expect) = game.next_action() else {
            break;
        };
        let state = game.player_state(expect.player);
        let data = choosers[expect.player.index()].take_action(state, expect.action);
        match game.apply_action(expect.with_data(data)) {
            Err(GameError::Player(err)) if choosers[expect.player.index()].handle_error(err) => {
                continue
            }
            Err(err) => return Err(err.into()),
            Ok(()) => (),
        }
    }
    serde_json::to_writer(std::io::stderr(), game.log())?;
    Ok(())
}

/// Replays a recorded log and reports the outcome.
fn replay_main(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::open(path)?;
    let log: Log = serde_json::from_reader(file)?;
    println!(
        "Replaying {} seats over {} actions (seed {}).",
        log.config().players,
        log.actions().len(),
        log.config().seed
    );
    let game = log.replay()?;
    match game.rankings() {
        Some(rankings) => {
            let placing = rankings.iter().map(|id| id.to_string()).join(", ");
            println!("Finishing order: {placing}");
        }
        None => println!("The recorded game is still in progress."),
    }
    Ok(())
}
