//! Camera-relative cursor navigation.
//!
//! A raw direction is remapped through the camera azimuth so that `up` always
//! moves away from the viewer. The remapping is a closed lookup table over the
//! eight azimuth steps, grouped into four buckets.

use strum::{Display, EnumIter, EnumString};

use crate::coords::{coordinate_to_placement, placement_to_coordinate};
use crate::notation::{NotationError, Placement};
use crate::perspective::Azimuth;
use crate::topology::BoardShape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CursorDirection {
    Up,
    Down,
    Left,
    Right,
}

/// A cursor request from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorMove {
    Direction(CursorDirection),
    To(Placement),
}

/// Why a host cursor request could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CursorMoveError {
    #[error("unknown cursor direction '{0}'")]
    UnknownDirection(String),

    #[error("cursor move 'to' needs a target placement")]
    MissingPlacement,

    #[error(transparent)]
    Notation(#[from] NotationError),
}

impl CursorMove {
    /// Parses the host form: a direction name, or `"to"` plus a placement.
    pub fn parse(direction: &str, placement: Option<&str>) -> Result<Self, CursorMoveError> {
        if direction == "to" {
            let notation = placement.ok_or(CursorMoveError::MissingPlacement)?;
            return Ok(Self::To(notation.parse()?));
        }
        direction
            .parse()
            .map(Self::Direction)
            .map_err(|_| CursorMoveError::UnknownDirection(direction.to_owned()))
    }
}

impl From<CursorDirection> for CursorMove {
    fn from(direction: CursorDirection) -> Self {
        Self::Direction(direction)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorState {
    pub placement: Placement,
}

/// Board-local unit displacement per raw direction, `(dx, dz)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bucket {
    up: (i32, i32),
    down: (i32, i32),
    left: (i32, i32),
    right: (i32, i32),
}

const FRONT: Bucket = Bucket {
    left: (1, 0),
    right: (-1, 0),
    up: (0, 1),
    down: (0, -1),
};

const QUARTER: Bucket = Bucket {
    down: (1, 0),
    up: (-1, 0),
    left: (0, 1),
    right: (0, -1),
};

const BACK: Bucket = Bucket {
    left: (-1, 0),
    right: (1, 0),
    down: (0, 1),
    up: (0, -1),
};

const THREE_QUARTER: Bucket = Bucket {
    down: (-1, 0),
    up: (1, 0),
    left: (0, -1),
    right: (0, 1),
};

const fn bucket(alpha: Azimuth) -> &'static Bucket {
    match alpha {
        Azimuth::Deg0 | Azimuth::Deg45 | Azimuth::Deg315 => &FRONT,
        Azimuth::Deg90 => &QUARTER,
        Azimuth::Deg135 | Azimuth::Deg180 | Azimuth::Deg225 => &BACK,
        Azimuth::Deg270 => &THREE_QUARTER,
    }
}

/// Unit displacement `(dx, dz)` for `direction` seen from azimuth `alpha`.
pub const fn displacement(alpha: Azimuth, direction: CursorDirection) -> (i32, i32) {
    let bucket = bucket(alpha);
    match direction {
        CursorDirection::Up => bucket.up,
        CursorDirection::Down => bucket.down,
        CursorDirection::Left => bucket.left,
        CursorDirection::Right => bucket.right,
    }
}

/// Owns the cursor placement for one encounter.
#[derive(Clone, Debug)]
pub struct CursorNavigator {
    state: CursorState,
}

impl CursorNavigator {
    pub fn new(placement: Placement) -> Self {
        Self {
            state: CursorState { placement },
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn placement(&self) -> Placement {
        self.state.placement
    }

    /// Moves the cursor if the destination is occupiable on `shape`.
    ///
    /// Always returns the resulting placement, which is unchanged when the
    /// destination is off the board or impassable.
    pub fn move_cursor(
        &mut self,
        movement: CursorMove,
        shape: &BoardShape,
        alpha: Azimuth,
    ) -> Placement {
        let from = self.state.placement;
        let candidate = match movement {
            CursorMove::To(target) => Some(target),
            CursorMove::Direction(direction) => {
                let (dx, dz) = displacement(alpha, direction);
                coordinate_to_placement(placement_to_coordinate(from).offset(dx, dz)).ok()
            }
        };

        match candidate {
            Some(target) if shape.is_occupiable(target) => {
                self.state.placement = target;
                tracing::debug!(%from, to = %target, ?movement, "cursor moved");
            }
            _ => {
                tracing::debug!(%from, ?candidate, ?movement, "cursor stays");
            }
        }
        self.state.placement
    }
}
