//! Mapping between board notation and board-local 3D coordinates.
//!
//! The file index becomes `x` and the rank becomes `z = -rank`; the board plane
//! sits at `y = 0`.

use glam::Vec3;

use crate::error::{BoardError, ErrorSeverity};
use crate::notation::{FILES, NotationError, Placement};

/// A coordinate that names no placement.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum OutOfRangeError {
    #[error("x = {x} is outside the file range 0..={max}", max = FILES.len() - 1)]
    File { x: f32 },

    #[error("z = {z} does not correspond to a non-negative rank")]
    Rank { z: f32 },
}

impl BoardError for OutOfRangeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::File { .. } => "COORDINATE_FILE_OUT_OF_RANGE",
            Self::Rank { .. } => "COORDINATE_RANK_OUT_OF_RANGE",
        }
    }
}

/// Board-local position on the board plane.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardCoordinate {
    pub x: f32,
    pub z: f32,
}

impl BoardCoordinate {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Returns the coordinate displaced by whole cells.
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx as f32, self.z + dz as f32)
    }

    /// Lifts the coordinate onto the board plane.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    /// Projects a board-local point onto the board plane.
    pub fn from_vec3(position: Vec3) -> Self {
        Self::new(position.x, position.z)
    }
}

pub fn placement_to_coordinate(placement: Placement) -> BoardCoordinate {
    BoardCoordinate::new(placement.file_index() as f32, -(placement.rank() as f32))
}

/// Parses notation and maps it to its coordinate.
pub fn notation_to_coordinate(notation: &str) -> Result<BoardCoordinate, NotationError> {
    notation.parse().map(placement_to_coordinate)
}

/// Inverse of [`placement_to_coordinate`]; both axes are rounded to the
/// nearest whole cell first.
pub fn coordinate_to_placement(coordinate: BoardCoordinate) -> Result<Placement, OutOfRangeError> {
    let file = coordinate.x.round();
    if !file.is_finite() || file < 0.0 || file > (FILES.len() - 1) as f32 {
        return Err(OutOfRangeError::File { x: coordinate.x });
    }

    let rank = (-coordinate.z).round();
    if !rank.is_finite() || rank < 0.0 || rank >= u32::MAX as f32 {
        return Err(OutOfRangeError::Rank { z: coordinate.z });
    }

    Ok(Placement::from_indices(file as u8, rank as u32))
}
