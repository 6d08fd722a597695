//! Simple console interactive player.

use std::{fmt::Display, io::Write, str::FromStr, sync::Arc};

use ansi_term::ANSIStrings;
use itertools::Itertools;

use super::{
    ActionData, ActionType, Card, Colour, DrawReason, Event, Player, PlayerError, PlayerState,
    Status,
};

/// The interactive participant. Renders the decision point, surfaces the
/// numbered option menu and blocks on stdin until a selection is made.
pub struct Console {
    colour: bool,
    /// Pause before revealing a hand, so one human's cards are not left on
    /// screen for the next.
    handoff: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(true, false)
    }
}

fn prompt<T: FromStr, S: Display>(prompt: S) -> T {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        let mut buffer = String::new();
        print!("{prompt}");
        stdout.flush().expect("flush");
        stdin.read_line(&mut buffer).expect("read");
        let trimmed = buffer.trim();
        if !trimmed.is_empty() {
            if let Ok(obj) = T::from_str(trimmed) {
                return obj;
            }
            println!("Invalid input, try again");
        }
    }
}

fn pause<S: Display>(message: S) {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut buffer = String::new();
    print!("{message}");
    stdout.flush().expect("flush");
    stdin.read_line(&mut buffer).expect("read");
}

impl Console {
    pub fn new(colour: bool, handoff: bool) -> Self {
        Self { colour, handoff }
    }

    pub fn into_player(self) -> Arc<dyn Player> {
        Arc::new(self)
    }

    fn format(&self, s: &ANSIStrings) -> String {
        if self.colour {
            s.to_string()
        } else {
            ansi_term::unstyle(s)
        }
    }

    fn format_card(&self, card: Card) -> String {
        self.format(&ANSIStrings(&[card.to_ansi_string()]))
    }

    fn choose(&self, state: &PlayerState) -> ActionData {
        if self.handoff {
            pause(format!("{}, press enter to view your hand: ", state.id));
        }
        println!("Top card: {}", self.format_card(state.top));
        if state.pending_draw > 0 {
            println!("Pending draw: {}", state.pending_draw);
        }
        let others = state
            .table()
            .iter()
            .filter(|seat| seat.id != state.id)
            .map(|seat| match seat.status {
                Status::Finished { rank } => format!("{}: out (#{rank})", seat.id),
                Status::Active if seat.called_uno => format!("{}: {} (uno!)", seat.id, seat.cards),
                Status::Active => format!("{}: {}", seat.id, seat.cards),
            })
            .join(", ");
        println!("Cards held: {others}");
        let hand = state.hand();
        for (i, card) in hand.iter().enumerate() {
            println!("{:>3} - {}", i + 1, self.format_card(*card));
        }
        println!("{:>3} - pass", hand.len() + 1);
        println!("{:>3} - call uno", hand.len() + 2);
        loop {
            let choice: usize = prompt("Choose option (enter number): ");
            if (1..=hand.len()).contains(&choice) {
                return ActionData::Play {
                    card: hand[choice - 1],
                };
            } else if choice == hand.len() + 1 {
                return ActionData::Pass;
            } else if choice == hand.len() + 2 {
                return ActionData::CallUno;
            }
            println!("Invalid option, try again");
        }
    }

    #[allow(clippy::unused_self)]
    fn choose_colour(&self) -> ActionData {
        loop {
            let colour: Colour = prompt("Next colour (red, yellow, green or blue)? ");
            if colour != Colour::Black {
                return ActionData::Colour { colour };
            }
            println!("Black is not an option, try again");
        }
    }
}

impl Player for Console {
    fn take_action(&self, state: PlayerState, action: ActionType) -> ActionData {
        match action {
            ActionType::Play => self.choose(&state),
            ActionType::ChooseColour => self.choose_colour(),
        }
    }

    fn notify(&self, event: &Event) {
        match event {
            Event::Opened(card) => println!("Opening card: {}", self.format_card(*card)),
            Event::Played(id, card) => println!("{id} played {}", self.format_card(*card)),
            Event::Passed(id) => println!("{id} passed"),
            Event::Drew(id, n, reason) => match reason {
                DrawReason::NoValidMove => println!("{id} could not play and drew a card"),
                DrawReason::Chain => println!("{id} had to draw {n} cards"),
                DrawReason::ForgotUno => {
                    println!("{id} forgot to call uno and drew {n} cards")
                }
                DrawReason::WrongUnoCall => {
                    println!("{id} called uno incorrectly and drew {n} cards")
                }
            },
            Event::UnoCalled(id) => println!("{id} called uno!"),
            Event::Skipped(id) => println!("{id} was skipped"),
            Event::Reversed(direction) => println!("play now goes {direction}"),
            Event::ColourChosen(id, colour) => println!("{id} chose {colour}"),
            Event::Finished(id, rank) => println!("{id} is out, finishing number {rank}!"),
            Event::Over(ranking) => {
                let placing = ranking.iter().map(|id| id.to_string()).join(", ");
                println!("Game over. Finishing order: {placing}");
            }
        }
    }

    fn handle_error(&self, err: PlayerError) -> bool {
        println!("Error: {err}");
        true
    }
}
