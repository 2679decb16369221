//! Movement-option indicators.
//!
//! Maneuvers arrive from the game service as `{name, description, options}`.
//! Showing one fills the board's `MovementOptions` group with one translucent
//! indicator per option and raises the group from a hidden offset.

use glam::Vec3;

use crate::animation::{AnimationChannel, AnimationTask, Easing, FrameDispatcher, Timestamp};
use crate::coords::placement_to_coordinate;
use crate::interaction::MOVE_TO_TAG;
use crate::notation::Placement;
use crate::scene::{Material, NodeId, NodeKind, Scene};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OptionKind {
    Unoccupied,
    Occupied,
}

impl OptionKind {
    pub const fn material(self) -> Material {
        match self {
            Self::Unoccupied => Material::translucent(0x009acd, 0.5),
            Self::Occupied => Material::translucent(0x006e93, 0.5),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementOption {
    pub placement: Placement,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: OptionKind,
}

/// A named set of candidate destinations for the selected piece.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maneuver {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub options: Vec<MovementOption>,
}

/// Footprint of an indicator box: 0.6 × 0.1 × 0.6.
pub const INDICATOR_SIZE: Vec3 = Vec3::new(0.6, 0.1, 0.6);

/// Reveal animation settings for the options group.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RevealConfig {
    pub duration_ms: u64,
    pub easing: Easing,
    /// Vertical offset the group rises from.
    pub hidden_offset: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1000,
            easing: Easing::EaseInOutQuad,
            hidden_offset: -0.2,
        }
    }
}

impl RevealConfig {
    pub fn hidden_position(&self) -> Vec3 {
        Vec3::new(0.0, self.hidden_offset, 0.0)
    }
}

/// Adds one indicator per option to `group` and schedules the reveal.
///
/// Callers clear before showing a different maneuver; indicators are
/// appended, not merged.
pub fn show_movement_options(
    scene: &mut Scene,
    group: NodeId,
    maneuver: &Maneuver,
    reveal: &RevealConfig,
    now: Timestamp,
    dispatcher: &mut FrameDispatcher,
) {
    let hidden = reveal.hidden_position();
    scene.set_position(group, hidden);

    for option in &maneuver.options {
        scene.add(
            group,
            format!("{MOVE_TO_TAG}{}", option.placement),
            NodeKind::cuboid(
                INDICATOR_SIZE.x,
                INDICATOR_SIZE.y,
                INDICATOR_SIZE.z,
                option.kind.material(),
            ),
            placement_to_coordinate(option.placement).to_vec3(),
        );
    }

    dispatcher.schedule(AnimationTask::new(
        AnimationChannel::NodeOffset(group),
        now,
        reveal.duration_ms,
        reveal.easing,
        hidden,
        Vec3::ZERO,
    ));
    tracing::debug!(
        maneuver = %maneuver.name,
        options = maneuver.options.len(),
        "movement options shown"
    );
}

/// Removes every indicator and parks the group at its hidden offset.
pub fn clear_movement_options(
    scene: &mut Scene,
    group: NodeId,
    reveal: &RevealConfig,
    dispatcher: &mut FrameDispatcher,
) {
    dispatcher.cancel(AnimationChannel::NodeOffset(group));
    scene.set_position(group, reveal.hidden_position());
    scene.clear_children(group);
    tracing::debug!("movement options cleared");
}
