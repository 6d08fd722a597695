//! Seats at the table.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{Card, Value};

/// Identifies a seat at the table. Ids are 1-based, fixed at game start, and
/// turn order walks the ring of ids in the current direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

impl PlayerId {
    pub fn new(id: u8) -> Self {
        debug_assert!(id >= 1, "player ids are 1-based");
        PlayerId(id)
    }

    /// Zero-based position in the seating arena.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// The id after this one on a ring of `seats` players, walking in
    /// `direction`. Ids live in `[1, seats]`; stepping outside wraps around.
    pub fn next(self, direction: Direction, seats: u8) -> PlayerId {
        let next = i16::from(self.0) + i16::from(direction.step());
        if next < 1 {
            PlayerId(seats)
        } else if next > i16::from(seats) {
            PlayerId(1)
        } else {
            PlayerId(next as u8)
        }
    }
}

/// The sense in which turns rotate around the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    Anticlockwise,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Direction::Clockwise => "clockwise",
            Direction::Anticlockwise => "anticlockwise",
        })
    }
}

impl Direction {
    pub fn step(self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::Anticlockwise => -1,
        }
    }

    pub fn flipped(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::Anticlockwise,
            Direction::Anticlockwise => Direction::Clockwise,
        }
    }
}

/// Whether a seat is still playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    /// Went out, with its 1-based finishing rank.
    Finished { rank: u8 },
}

/// One player's slot at the table: their hand and call state. The engine
/// owns every seat; participants only ever see snapshots.
#[derive(Debug, Clone)]
pub struct Seat {
    pub id: PlayerId,
    pub hand: Vec<Card>,
    pub called_uno: bool,
    pub status: Status,
}

impl Seat {
    pub fn new(id: PlayerId) -> Self {
        Seat {
            id,
            hand: vec![],
            called_uno: false,
            status: Status::Active,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, Status::Finished { .. })
    }

    /// The seat's finishing rank, once it has one.
    pub fn rank(&self) -> Option<u8> {
        match self.status {
            Status::Finished { rank } => Some(rank),
            Status::Active => None,
        }
    }

    /// Position of `card` in the hand, if held.
    pub fn find_card(&self, card: Card) -> Option<usize> {
        self.hand.iter().position(|c| *c == card)
    }

    /// Every playable (index, card) pair against `top`. A single remaining
    /// card must also be a legal *last* move to show up here.
    pub fn legal_plays(&self, top: Card) -> Vec<(usize, Card)> {
        let last = self.hand.len() == 1;
        self.hand
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                if last {
                    c.is_valid_last_move(top)
                } else {
                    c.is_valid_move(top)
                }
            })
            .map(|(i, c)| (i, *c))
            .collect()
    }

    pub fn has_valid_move(&self, top: Card) -> bool {
        !self.legal_plays(top).is_empty()
    }

    /// An uno call is correct when the hand is down to two cards or fewer
    /// and at least one of them is playable.
    pub fn correct_uno_call(&self, top: Card) -> bool {
        self.hand.len() <= 2 && self.has_valid_move(top)
    }

    /// Whether this seat can extend a pending draw chain instead of
    /// absorbing it. A DrawTwo chain stacks under any DrawTwo or a DrawFour;
    /// a DrawFour chain stacks under another DrawFour, or a DrawTwo in the
    /// chain's announced colour.
    pub fn can_counter(&self, top: Card) -> bool {
        match top.value() {
            Value::DrawTwo => self.hand.iter().any(|c| c.value().is_draw()),
            Value::DrawFour => self.hand.iter().any(|c| {
                c.value() == Value::DrawFour
                    || (c.value() == Value::DrawTwo && c.colour() == top.colour())
            }),
            _ => false,
        }
    }
}
