//! Dice notation and d20-style rolls.
//!
//! A [`DiceExpr`] is `NdS` with an optional flat modifier (`2d6+1`, `1d8-1`).
//! All rolls draw from a [`RollStream`], so results are reproducible.

use std::fmt;
use std::str::FromStr;

use crate::env::RollStream;
use crate::error::{ErrorSeverity, GameError};

/// Errors produced while parsing dice notation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("dice notation is empty")]
    Empty,

    #[error("invalid dice count in '{0}'")]
    InvalidCount(String),

    #[error("invalid die size in '{0}'")]
    InvalidSides(String),

    #[error("invalid modifier in '{0}'")]
    InvalidModifier(String),

    #[error("malformed dice notation '{0}', expected NdS[+M]")]
    Malformed(String),
}

impl GameError for DiceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "DICE_EMPTY",
            Self::InvalidCount(_) => "DICE_INVALID_COUNT",
            Self::InvalidSides(_) => "DICE_INVALID_SIDES",
            Self::InvalidModifier(_) => "DICE_INVALID_MODIFIER",
            Self::Malformed(_) => "DICE_MALFORMED",
        }
    }
}

/// A dice expression: `count` dice with `sides` faces plus a flat modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct DiceExpr {
    pub count: u8,
    pub sides: u8,
    pub modifier: i32,
}

impl DiceExpr {
    pub const fn new(count: u8, sides: u8, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Smallest possible total.
    pub fn min(&self) -> i32 {
        let dice = if self.sides == 0 { 0 } else { self.count as i32 };
        dice + self.modifier
    }

    /// Largest possible total.
    pub fn max(&self) -> i32 {
        self.count as i32 * self.sides as i32 + self.modifier
    }

    /// Rolls the dice only, without the modifier.
    pub fn roll_dice(&self, stream: &mut RollStream<'_>) -> i32 {
        (0..self.count)
            .map(|_| stream.roll_die(self.sides as u32) as i32)
            .sum()
    }

    /// Rolls the dice and adds the modifier.
    pub fn roll(&self, stream: &mut RollStream<'_>) -> i32 {
        self.roll_dice(stream) + self.modifier
    }

    /// Critical roll: the dice are rolled twice and summed, the modifier is
    /// added once.
    pub fn roll_critical(&self, stream: &mut RollStream<'_>) -> i32 {
        self.roll_dice(stream) + self.roll_dice(stream) + self.modifier
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(DiceError::Empty);
        }

        let (count, rest) = text
            .split_once(['d', 'D'])
            .ok_or_else(|| DiceError::Malformed(text.to_string()))?;

        let count: u8 = if count.is_empty() {
            1
        } else {
            count
                .parse()
                .map_err(|_| DiceError::InvalidCount(text.to_string()))?
        };

        let (sides, modifier) = match rest.find(['+', '-']) {
            Some(idx) => {
                let (sides, modifier) = rest.split_at(idx);
                let modifier: i32 = modifier
                    .parse()
                    .map_err(|_| DiceError::InvalidModifier(text.to_string()))?;
                (sides, modifier)
            }
            None => (rest, 0),
        };

        let sides: u8 = sides
            .parse()
            .map_err(|_| DiceError::InvalidSides(text.to_string()))?;
        if sides == 0 {
            return Err(DiceError::InvalidSides(text.to_string()));
        }

        Ok(Self::new(count, sides, modifier))
    }
}

impl TryFrom<String> for DiceExpr {
    type Error = DiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DiceExpr> for String {
    fn from(value: DiceExpr) -> Self {
        value.to_string()
    }
}

/// Roll a natural d20.
pub fn d20(stream: &mut RollStream<'_>) -> u8 {
    stream.roll_die(20) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use proptest::prelude::*;

    #[test]
    fn parses_common_notation() {
        assert_eq!("2d6".parse::<DiceExpr>(), Ok(DiceExpr::new(2, 6, 0)));
        assert_eq!("1d8+3".parse::<DiceExpr>(), Ok(DiceExpr::new(1, 8, 3)));
        assert_eq!("3d4-1".parse::<DiceExpr>(), Ok(DiceExpr::new(3, 4, -1)));
        assert_eq!("d12".parse::<DiceExpr>(), Ok(DiceExpr::new(1, 12, 0)));
    }

    #[test]
    fn rejects_bad_notation() {
        assert_eq!("".parse::<DiceExpr>(), Err(DiceError::Empty));
        assert!(matches!("6".parse::<DiceExpr>(), Err(DiceError::Malformed(_))));
        assert!(matches!("xd6".parse::<DiceExpr>(), Err(DiceError::InvalidCount(_))));
        assert!(matches!("1d0".parse::<DiceExpr>(), Err(DiceError::InvalidSides(_))));
        assert!(matches!("1d6+x".parse::<DiceExpr>(), Err(DiceError::InvalidModifier(_))));
    }

    #[test]
    fn display_matches_notation() {
        assert_eq!(DiceExpr::new(2, 6, 1).to_string(), "2d6+1");
        assert_eq!(DiceExpr::new(1, 4, -2).to_string(), "1d4-2");
        assert_eq!(DiceExpr::new(1, 20, 0).to_string(), "1d20");
    }

    #[test]
    fn critical_rolls_dice_twice() {
        let rng = PcgRng;
        let dice = DiceExpr::new(1, 6, 5);
        for seed in 0..200 {
            let mut stream = RollStream::new(&rng, seed);
            let total = dice.roll_critical(&mut stream);
            // two d6 plus the modifier once
            assert!((7..=17).contains(&total), "total {total}");
            assert_eq!(stream.draws(), 2);
        }
    }

    proptest! {
        #[test]
        fn rolls_stay_within_bounds(count in 1u8..6, sides in 1u8..20, modifier in -5i32..5, seed: u64) {
            let rng = PcgRng;
            let dice = DiceExpr::new(count, sides, modifier);
            let mut stream = RollStream::new(&rng, seed);
            let total = dice.roll(&mut stream);
            prop_assert!(total >= dice.min());
            prop_assert!(total <= dice.max());
        }

        #[test]
        fn d20_is_natural(seed: u64) {
            let rng = PcgRng;
            let mut stream = RollStream::new(&rng, seed);
            let natural = d20(&mut stream);
            prop_assert!((1..=20).contains(&natural));
        }
    }
}
