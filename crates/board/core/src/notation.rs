//! Board notation: `<file><rank>` placements such as `d3`.
//!
//! The notation is a de facto wire format shared with the game service, so
//! parsing is strict: exactly one lowercase file letter `a`–`h` followed by one
//! or more ASCII digits.

use std::fmt;
use std::str::FromStr;

use crate::error::{BoardError, ErrorSeverity};

/// File letters in index order (`a` = 0 … `h` = 7).
pub const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Malformed board notation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("placement notation is empty")]
    Empty,

    #[error("invalid file '{file}' in placement '{notation}'")]
    InvalidFile { notation: String, file: char },

    #[error("invalid rank in placement '{notation}'")]
    InvalidRank { notation: String },
}

impl BoardError for NotationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "NOTATION_EMPTY",
            Self::InvalidFile { .. } => "NOTATION_INVALID_FILE",
            Self::InvalidRank { .. } => "NOTATION_INVALID_RANK",
        }
    }
}

/// Canonical identity of a board cell.
///
/// Placements are only ever parsed and formatted; whether a placement names a
/// cell that actually exists is decided by [`BoardShape`](crate::BoardShape).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placement {
    file: u8,
    rank: u32,
}

impl Placement {
    /// Creates a placement from a file letter and rank.
    pub fn new(file: char, rank: u32) -> Result<Self, NotationError> {
        let index = file_index(file).ok_or_else(|| NotationError::InvalidFile {
            notation: format!("{file}{rank}"),
            file,
        })?;
        Ok(Self { file: index, rank })
    }

    /// Creates a placement from a file index that is known to be in range.
    pub(crate) const fn from_indices(file: u8, rank: u32) -> Self {
        debug_assert!((file as usize) < FILES.len());
        Self { file, rank }
    }

    /// File letter (`a`–`h`).
    pub const fn file(self) -> char {
        FILES[self.file as usize]
    }

    /// Zero-based file index (`a` = 0).
    pub const fn file_index(self) -> usize {
        self.file as usize
    }

    pub const fn rank(self) -> u32 {
        self.rank
    }
}

fn file_index(file: char) -> Option<u8> {
    FILES.iter().position(|&f| f == file).map(|i| i as u8)
}

impl FromStr for Placement {
    type Err = NotationError;

    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        let mut chars = notation.chars();
        let file = chars.next().ok_or(NotationError::Empty)?;
        let index = file_index(file).ok_or_else(|| NotationError::InvalidFile {
            notation: notation.to_owned(),
            file,
        })?;

        let digits = chars.as_str();
        let invalid_rank = || NotationError::InvalidRank {
            notation: notation.to_owned(),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid_rank());
        }
        let rank = digits.parse::<u32>().map_err(|_| invalid_rank())?;

        Ok(Self { file: index, rank })
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank)
    }
}

// Placements travel as plain notation strings, including as map keys.
#[cfg(feature = "serde")]
impl serde::Serialize for Placement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Placement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let notation = String::deserialize(deserializer)?;
        notation.parse().map_err(serde::de::Error::custom)
    }
}
