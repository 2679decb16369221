//! Discrete orbital camera poses.
//!
//! The camera orbits the board origin on a closed grid of poses: eight azimuth
//! steps of 45° and three elevation steps of 25°. Commands move one step at a
//! time; the rules at the edges of each axis live here, the animation that
//! follows a change lives in [`orbit`](crate::orbit).

use glam::Vec3;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{BoardError, ErrorSeverity};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PerspectiveError {
    #[error("azimuth {0}° is not a multiple of 45° in 0..360")]
    InvalidAzimuth(u16),

    #[error("elevation {0}° is not one of 25°, 50°, 75°")]
    InvalidElevation(u16),
}

impl BoardError for PerspectiveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Camera azimuth (alpha) around the board's vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u16", into = "u16")
)]
pub enum Azimuth {
    Deg0,
    Deg45,
    Deg90,
    Deg135,
    Deg180,
    Deg225,
    Deg270,
    Deg315,
}

impl Azimuth {
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg45 => 45,
            Self::Deg90 => 90,
            Self::Deg135 => 135,
            Self::Deg180 => 180,
            Self::Deg225 => 225,
            Self::Deg270 => 270,
            Self::Deg315 => 315,
        }
    }

    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        Some(match degrees {
            0 => Self::Deg0,
            45 => Self::Deg45,
            90 => Self::Deg90,
            135 => Self::Deg135,
            180 => Self::Deg180,
            225 => Self::Deg225,
            270 => Self::Deg270,
            315 => Self::Deg315,
            _ => return None,
        })
    }

    pub fn radians(self) -> f32 {
        f32::from(self.degrees()).to_radians()
    }

    /// `alpha + 45`, wrapping to 0 once 360 is reached.
    pub const fn orbit_left(self) -> Self {
        match Self::from_degrees(self.degrees() + 45) {
            Some(next) => next,
            None => Self::Deg0,
        }
    }

    /// `alpha - 45`, wrapping to 315 when the result would reach or go below 0.
    pub const fn orbit_right(self) -> Self {
        match self.degrees().checked_sub(45) {
            Some(0) | None => Self::Deg315,
            Some(next) => match Self::from_degrees(next) {
                Some(next) => next,
                None => Self::Deg315,
            },
        }
    }
}

impl TryFrom<u16> for Azimuth {
    type Error = PerspectiveError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees).ok_or(PerspectiveError::InvalidAzimuth(degrees))
    }
}

impl From<Azimuth> for u16 {
    fn from(azimuth: Azimuth) -> Self {
        azimuth.degrees()
    }
}

/// Camera elevation (beta) above the board plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u16", into = "u16")
)]
pub enum Elevation {
    Low,
    Mid,
    High,
}

impl Elevation {
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Low => 25,
            Self::Mid => 50,
            Self::High => 75,
        }
    }

    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            25 => Some(Self::Low),
            50 => Some(Self::Mid),
            75 => Some(Self::High),
            _ => None,
        }
    }

    pub fn radians(self) -> f32 {
        f32::from(self.degrees()).to_radians()
    }

    /// `beta + 25`, or `None` at the top of the range.
    pub const fn raised(self) -> Option<Self> {
        match self {
            Self::Low => Some(Self::Mid),
            Self::Mid => Some(Self::High),
            Self::High => None,
        }
    }

    /// `beta - 25`, or `None` at the bottom of the range.
    pub const fn lowered(self) -> Option<Self> {
        match self {
            Self::Low => None,
            Self::Mid => Some(Self::Low),
            Self::High => Some(Self::Mid),
        }
    }
}

impl TryFrom<u16> for Elevation {
    type Error = PerspectiveError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees).ok_or(PerspectiveError::InvalidElevation(degrees))
    }
}

impl From<Elevation> for u16 {
    fn from(elevation: Elevation) -> Self {
        elevation.degrees()
    }
}

/// Perspective-change commands issued by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PerspectiveCommand {
    Home,
    Up,
    Down,
    Left,
    Right,
}

/// A camera pose on the orbit grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerspectiveState {
    pub alpha: Azimuth,
    pub beta: Elevation,
    pub radius: f32,
}

impl PerspectiveState {
    pub const DEFAULT_RADIUS: f32 = 7.0;

    pub const fn new(alpha: Azimuth, beta: Elevation, radius: f32) -> Self {
        Self {
            alpha,
            beta,
            radius,
        }
    }

    /// Computes the pose that `command` leads to from `self`.
    ///
    /// Returns `None` when the command is a no-op at an elevation boundary.
    /// The radius is carried over unchanged; `home` restores `initial` whole.
    pub fn apply(&self, command: PerspectiveCommand, initial: &Self) -> Option<Self> {
        let next = match command {
            PerspectiveCommand::Home => *initial,
            PerspectiveCommand::Up => Self {
                beta: self.beta.raised()?,
                ..*self
            },
            PerspectiveCommand::Down => Self {
                beta: self.beta.lowered()?,
                ..*self
            },
            PerspectiveCommand::Left => Self {
                alpha: self.alpha.orbit_left(),
                ..*self
            },
            PerspectiveCommand::Right => Self {
                alpha: self.alpha.orbit_right(),
                ..*self
            },
        };
        Some(next)
    }

    /// Cartesian camera position for this pose, orbiting the origin.
    pub fn eye_position(&self) -> Vec3 {
        let (alpha, beta) = (self.alpha.radians(), self.beta.radians());
        Vec3::new(
            self.radius * alpha.sin() * beta.cos(),
            self.radius * beta.sin(),
            -self.radius * alpha.cos() * beta.cos(),
        )
    }
}

impl Default for PerspectiveState {
    fn default() -> Self {
        Self::new(Azimuth::Deg180, Elevation::Low, Self::DEFAULT_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn pose(alpha: u16, beta: u16) -> PerspectiveState {
        PerspectiveState::new(
            Azimuth::try_from(alpha).unwrap(),
            Elevation::try_from(beta).unwrap(),
            7.0,
        )
    }

    #[test]
    fn left_wraps_from_315_to_0() {
        let home = PerspectiveState::default();
        let next = pose(315, 25)
            .apply(PerspectiveCommand::Left, &home)
            .unwrap();
        assert_eq!(next.alpha.degrees(), 0);
    }

    #[test]
    fn right_wraps_at_or_below_zero_to_315() {
        let home = PerspectiveState::default();
        assert_eq!(
            pose(0, 25)
                .apply(PerspectiveCommand::Right, &home)
                .unwrap()
                .alpha,
            Azimuth::Deg315
        );
        // Reaching 0 also wraps.
        assert_eq!(
            pose(45, 25)
                .apply(PerspectiveCommand::Right, &home)
                .unwrap()
                .alpha,
            Azimuth::Deg315
        );
        assert_eq!(
            pose(180, 25)
                .apply(PerspectiveCommand::Right, &home)
                .unwrap()
                .alpha,
            Azimuth::Deg135
        );
    }

    #[test]
    fn elevation_is_clamped_at_both_ends() {
        let home = PerspectiveState::default();
        assert_eq!(pose(0, 75).apply(PerspectiveCommand::Up, &home), None);
        assert_eq!(pose(0, 25).apply(PerspectiveCommand::Down, &home), None);
        assert_eq!(
            pose(0, 50)
                .apply(PerspectiveCommand::Up, &home)
                .unwrap()
                .beta
                .degrees(),
            75
        );
    }

    #[test]
    fn home_restores_the_initial_pose() {
        let home = pose(90, 50);
        assert_eq!(
            pose(270, 75).apply(PerspectiveCommand::Home, &home),
            Some(home)
        );
    }

    #[test]
    fn azimuth_stays_on_the_grid() {
        for alpha in Azimuth::iter() {
            assert_eq!(alpha.orbit_left().degrees() % 45, 0);
            assert!(alpha.orbit_right().degrees() < 360);
        }
        assert_eq!(Azimuth::try_from(30), Err(PerspectiveError::InvalidAzimuth(30)));
        assert_eq!(Azimuth::try_from(360), Err(PerspectiveError::InvalidAzimuth(360)));
    }

    #[test]
    fn eye_position_matches_spherical_conversion() {
        let eye = pose(0, 25).eye_position();
        let beta = 25f32.to_radians();
        assert!(eye.x.abs() < 1e-5);
        assert!((eye.y - 7.0 * beta.sin()).abs() < 1e-5);
        assert!((eye.z + 7.0 * beta.cos()).abs() < 1e-5);

        let side = pose(90, 25).eye_position();
        assert!((side.x - 7.0 * beta.cos()).abs() < 1e-5);
        assert!(side.z.abs() < 1e-5);
        assert!((side.length() - 7.0).abs() < 1e-4);
    }

    #[test]
    fn commands_parse_from_lowercase_names() {
        assert_eq!("home".parse::<PerspectiveCommand>(), Ok(PerspectiveCommand::Home));
        assert_eq!("right".parse::<PerspectiveCommand>(), Ok(PerspectiveCommand::Right));
        assert!("sideways".parse::<PerspectiveCommand>().is_err());
        assert_eq!(PerspectiveCommand::Up.to_string(), "up");
    }
}
