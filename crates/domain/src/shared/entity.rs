use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Numeric identifier of a stored record.
///
/// Ids are derived from the creation timestamp in millis and bumped past the
/// largest id already in use, so they increase monotonically within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ID(i64);

impl ID {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn inner(self) -> i64 {
        self.0
    }

    /// Next free id given the ids already taken and the current time
    pub fn next<'a, I>(taken: I, now: i64) -> Self
    where
        I: IntoIterator<Item = &'a ID>,
    {
        let max_taken = taken.into_iter().map(|id| id.0).max();
        match max_taken {
            Some(max) if max >= now => Self(max + 1),
            _ => Self(now),
        }
    }
}

impl From<i64> for ID {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for ID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum InvalidIDError {
    #[error("ID: {0} is malformed")]
    Malformed(String),
}

impl FromStr for ID {
    type Err = InvalidIDError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| InvalidIDError::Malformed(s.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn next_id_uses_timestamp_when_free() {
        let taken = vec![ID::new(10), ID::new(20)];
        assert_eq!(ID::next(&taken, 100), ID::new(100));
        assert_eq!(ID::next(Vec::<ID>::new().iter(), 100), ID::new(100));
    }

    #[test]
    fn next_id_avoids_collisions() {
        let taken = vec![ID::new(100), ID::new(101)];
        assert_eq!(ID::next(&taken, 100), ID::new(102));
        assert_eq!(ID::next(&taken, 50), ID::new(102));
    }

    #[test]
    fn parses_ids() {
        assert_eq!("42".parse::<ID>().unwrap(), ID::new(42));
        assert!("abc".parse::<ID>().is_err());
    }
}
