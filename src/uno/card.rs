//! Uno cards.

use std::convert::TryFrom;
use std::{fmt::Display, str::FromStr};

use ansi_term::ANSIString;
use serde::{Deserialize, Serialize};

use super::MalformedCard;

/// Card colour.
///
/// Black is reserved for wild cards; it is never a colour a player may
/// announce when resolving one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Colour {
    Red,
    Yellow,
    Green,
    Blue,
    Black,
}

impl Colour {
    /// The four announceable colours, in the automated player's preference
    /// order.
    pub fn all_colours() -> &'static [Colour; 4] {
        static COLOURS: [Colour; 4] = [Colour::Red, Colour::Yellow, Colour::Green, Colour::Blue];
        &COLOURS
    }

    /// Returns an abbreviated name for the colour.
    pub fn to_abbr(self) -> char {
        match self {
            Colour::Red => 'R',
            Colour::Yellow => 'Y',
            Colour::Green => 'G',
            Colour::Blue => 'B',
            Colour::Black => 'K',
        }
    }
}

impl Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Colour::Red => "Red",
            Colour::Yellow => "Yellow",
            Colour::Green => "Green",
            Colour::Blue => "Blue",
            Colour::Black => "Black",
        })
    }
}

impl TryFrom<char> for Colour {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            'R' | 'r' => Colour::Red,
            'Y' | 'y' => Colour::Yellow,
            'G' | 'g' => Colour::Green,
            'B' | 'b' => Colour::Blue,
            'K' | 'k' => Colour::Black,
            _ => return Err(()),
        })
    }
}

impl FromStr for Colour {
    type Err = ();

    /// Accepts single letters or full colour names, for the colour prompt.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Colour::Red),
            "y" | "yellow" => Ok(Colour::Yellow),
            "g" | "green" => Ok(Colour::Green),
            "b" | "blue" => Ok(Colour::Blue),
            "k" | "black" => Ok(Colour::Black),
            _ => Err(()),
        }
    }
}

/// Card value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Number(u8),
    DrawTwo,
    Reverse,
    Skip,
    DrawFour,
    Wild,
}

impl Value {
    pub fn is_number(self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// True for the two values that start or extend a draw chain.
    pub fn is_draw(self) -> bool {
        matches!(self, Value::DrawTwo | Value::DrawFour)
    }

    /// True for the values that belong on a Black card.
    pub fn is_wild(self) -> bool {
        matches!(self, Value::DrawFour | Value::Wild)
    }

    /// The number of cards this value adds to a pending draw chain.
    pub fn draw_penalty(self) -> u8 {
        match self {
            Value::DrawTwo => 2,
            Value::DrawFour => 4,
            _ => 0,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::DrawTwo => f.write_str("Draw Two"),
            Value::Reverse => f.write_str("Reverse"),
            Value::Skip => f.write_str("Skip"),
            Value::DrawFour => f.write_str("Draw Four"),
            Value::Wild => f.write_str("Wild"),
        }
    }
}

impl FromStr for Value {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+2" => Ok(Value::DrawTwo),
            "+4" => Ok(Value::DrawFour),
            "r" => Ok(Value::Reverse),
            "s" => Ok(Value::Skip),
            "w" => Ok(Value::Wild),
            _ => {
                let mut chars = s.chars();
                match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
                    (Some(n), None) => Ok(Value::Number(n as u8)),
                    _ => Err(()),
                }
            }
        }
    }
}

/// A single Uno card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    colour: Colour,
    value: Value,
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.colour.to_abbr())?;
        match self.value {
            Value::Number(n) => write!(f, "{}", n),
            Value::DrawTwo => f.write_str("+2"),
            Value::Reverse => f.write_str("r"),
            Value::Skip => f.write_str("s"),
            Value::DrawFour => f.write_str("+4"),
            Value::Wild => f.write_str("w"),
        }
    }
}

impl FromStr for Card {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let colour = chars.next().and_then(|c| Colour::try_from(c).ok()).ok_or(())?;
        let value = chars.as_str().parse()?;
        Card::new(colour, value).map_err(|_| ())
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|()| serde::de::Error::custom("not an uno card"))
    }
}

impl Card {
    /// Creates a new [`Card`], rejecting colour/value pairings that do not
    /// exist in the deck: wild values must be Black, only wild values may be
    /// Black, and numbers run 0 through 9.
    pub fn new(colour: Colour, value: Value) -> Result<Self, MalformedCard> {
        if value.is_wild() != (colour == Colour::Black) {
            return Err(MalformedCard(colour, value));
        }
        if matches!(value, Value::Number(n) if n > 9) {
            return Err(MalformedCard(colour, value));
        }
        Ok(Self { colour, value })
    }

    pub fn colour(self) -> Colour {
        self.colour
    }

    pub fn value(self) -> Value {
        self.value
    }

    /// The same card with its colour overwritten. Used when a wild card is
    /// played and its new colour is announced.
    pub fn painted(self, colour: Colour) -> Card {
        Card {
            colour,
            value: self.value,
        }
    }

    /// The card as it appears in a fresh deck, with wild values back on
    /// Black.
    pub fn normalized(self) -> Card {
        if self.value.is_wild() {
            Card {
                colour: Colour::Black,
                value: self.value,
            }
        } else {
            self
        }
    }

    /// Returns true if this card may be played on `top`.
    pub fn is_valid_move(self, top: Card) -> bool {
        self.colour == Colour::Black || self.colour == top.colour || self.value == top.value
    }

    /// Returns true if this card may be played as a player's final card.
    /// Going out takes a numbered card; an action card needs someone left at
    /// the table to feel its effect.
    pub fn is_valid_last_move(self, top: Card) -> bool {
        self.value.is_number() && self.is_valid_move(top)
    }

    /// Returns a string representation of the card, decorated with ANSI
    /// color codes.
    pub fn to_ansi_string(self) -> ANSIString<'static> {
        use ansi_term::Colour as Paint;
        match self.colour {
            Colour::Red => Paint::Red.paint(self.to_string()),
            Colour::Yellow => Paint::Yellow.paint(self.to_string()),
            Colour::Green => Paint::Green.paint(self.to_string()),
            Colour::Blue => Paint::Blue.paint(self.to_string()),
            Colour::Black => self.to_string().into(),
        }
    }
}
