//! Piece identities: colors, insect kinds, instance tags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Notation prefix
    pub fn letter(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

/// Insect kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Insect {
    Bee,
    Ant,
    Hopper,
    Spider,
    Beetle,
}

/// All insect kinds, in pool order
pub const INSECTS: [Insect; 5] = [
    Insect::Bee,
    Insect::Ant,
    Insect::Hopper,
    Insect::Spider,
    Insect::Beetle,
];

impl Insect {
    /// Copies of this kind in each player's starting pool
    pub fn pool_size(self) -> u8 {
        match self {
            Insect::Bee => 1,
            Insect::Ant => 3,
            Insect::Hopper => 3,
            Insect::Spider => 2,
            Insect::Beetle => 2,
        }
    }

    /// One-letter notation code
    pub fn letter(self) -> char {
        match self {
            Insect::Bee => 'Q', // queen bee
            Insect::Ant => 'A',
            Insect::Hopper => 'G', // grasshopper
            Insect::Spider => 'S',
            Insect::Beetle => 'B',
        }
    }
}

/// Unrecognized insect notation
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown insect letter: {0:?}")]
pub struct ParseInsectError(String);

impl FromStr for Insect {
    type Err = ParseInsectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Q" => Ok(Insect::Bee),
            "A" => Ok(Insect::Ant),
            "G" => Ok(Insect::Hopper),
            "S" => Ok(Insect::Spider),
            "B" => Ok(Insect::Beetle),
            _ => Err(ParseInsectError(s.to_string())),
        }
    }
}

/// A piece: color, kind, and a 1-based instance tag within the kind's pool.
/// The tag disambiguates inventory copies and has no gameplay effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub insect: Insect,
    pub tag: u8,
}

impl Piece {
    pub const fn new(color: Color, insect: Insect, tag: u8) -> Self {
        Self { color, insect, tag }
    }
}

impl fmt::Display for Piece {
    /// `wQ`, `bA2`; the tag is omitted for single-copy kinds
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.letter(), self.insect.letter())?;
        if self.insect.pool_size() > 1 {
            write!(f, "{}", self.tag)?;
        }
        Ok(())
    }
}
