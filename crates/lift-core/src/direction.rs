//! Travel direction along the floor axis.
//!
//! Serialized as the integers `1` (up) and `-1` (down) so configuration
//! documents and exported tables keep the conventional sign form.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// The direction a passenger wants to travel, or a car is sweeping.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Both directions, up first.  The canonical scan order for queue pairs.
    pub const BOTH: [Direction; 2] = [Direction::Up, Direction::Down];

    /// The direction of a trip from `origin` to `destination`.
    ///
    /// # Panics
    /// Debug-asserts that the floors differ; a same-floor trip has no
    /// direction and is rejected upstream by config validation.
    #[inline]
    pub fn of_trip(origin: usize, destination: usize) -> Direction {
        debug_assert_ne!(origin, destination);
        if destination > origin { Direction::Up } else { Direction::Down }
    }

    /// The direction from a (possibly fractional) car position toward `floor`.
    #[inline]
    pub fn toward(from: f64, floor: usize) -> Direction {
        if (floor as f64) > from { Direction::Up } else { Direction::Down }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up   => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Signed unit step: `+1` for up, `-1` for down.
    #[inline]
    pub fn delta(self) -> i64 {
        match self {
            Direction::Up   => 1,
            Direction::Down => -1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up   => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.delta() as i8)
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match i64::deserialize(deserializer)? {
            1  => Ok(Direction::Up),
            -1 => Ok(Direction::Down),
            n  => Err(de::Error::custom(format!("direction must be 1 or -1, got {n}"))),
        }
    }
}
