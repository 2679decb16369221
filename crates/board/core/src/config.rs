//! Viewport tuning knobs.
//!
//! Every field has a default matching the stock viewport, so a configuration
//! file only needs to name what it changes.

use crate::animation::Easing;
use crate::camera::Camera;
use crate::movement::RevealConfig;
use crate::orbit::{CameraOrbitController, CommandPolicy};
use crate::perspective::{Azimuth, Elevation, PerspectiveState};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ViewportConfig {
    pub camera: CameraConfig,
    pub movement_options: RevealConfig,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CameraConfig {
    /// Home pose restored by the `home` command.
    pub home: PerspectiveState,
    pub transition_ms: u64,
    pub easing: Easing,
    pub policy: CommandPolicy,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            home: PerspectiveState::new(
                Azimuth::Deg180,
                Elevation::Low,
                PerspectiveState::DEFAULT_RADIUS,
            ),
            transition_ms: CameraOrbitController::TRANSITION_MS,
            easing: Easing::EaseInOutQuad,
            policy: CommandPolicy::Compose,
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera::new(self.fov_degrees, aspect, self.near, self.far)
    }

    pub fn controller(&self) -> CameraOrbitController {
        CameraOrbitController::new(self.policy, self.transition_ms, self.easing)
    }
}
