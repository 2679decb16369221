//! Frame-driven animation tasks.
//!
//! Every animation is an explicit [`AnimationTask`] with its own time origin,
//! duration and easing. A single [`FrameDispatcher`] advances all tasks when
//! the host reports a new frame timestamp, so tests drive animations with
//! synthetic time instead of a wall clock.

use std::fmt;

use glam::Vec3;

use crate::camera::Camera;
use crate::scene::{NodeId, Scene};

/// Milliseconds on the host's frame clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is later.
    pub const fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;
    fn add(self, rhs: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOutQuad,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// What an animation step writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationChannel {
    /// Camera position; the camera is re-aimed at the board origin each step.
    CameraEye,
    /// Local offset of a scene node.
    NodeOffset(NodeId),
}

/// Receives interpolated values from the dispatcher.
pub trait AnimationSink {
    fn apply_step(&mut self, channel: AnimationChannel, value: Vec3);
}

/// The live camera and scene, as seen by animation steps.
pub struct Stage<'a> {
    pub scene: &'a mut Scene,
    pub camera: &'a mut Camera,
}

impl AnimationSink for Stage<'_> {
    fn apply_step(&mut self, channel: AnimationChannel, value: Vec3) {
        match channel {
            AnimationChannel::CameraEye => {
                self.camera.eye = value;
                self.camera.look_at_origin();
            }
            AnimationChannel::NodeOffset(node) => {
                if !self.scene.set_position(node, value) {
                    tracing::debug!(?node, "animation target node no longer exists");
                }
            }
        }
    }
}

/// Interpolation of one channel between two values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationTask {
    pub channel: AnimationChannel,
    pub start: Timestamp,
    pub duration_ms: u64,
    pub easing: Easing,
    pub from: Vec3,
    pub to: Vec3,
}

impl AnimationTask {
    pub fn new(
        channel: AnimationChannel,
        start: Timestamp,
        duration_ms: u64,
        easing: Easing,
        from: Vec3,
        to: Vec3,
    ) -> Self {
        Self {
            channel,
            start,
            duration_ms,
            easing,
            from,
            to,
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Timestamp) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (now.since(self.start) as f32 / self.duration_ms as f32).min(1.0)
    }

    /// Interpolated value at `now`; valid at any point of the animation.
    pub fn sample(&self, now: Timestamp) -> Vec3 {
        self.from
            .lerp(self.to, self.easing.apply(self.progress(now)))
    }

    pub fn is_finished(&self, now: Timestamp) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Advances every scheduled animation once per frame.
#[derive(Clone, Debug, Default)]
pub struct FrameDispatcher {
    tasks: Vec<AnimationTask>,
}

impl FrameDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task`, replacing any task already driving the same channel.
    pub fn schedule(&mut self, task: AnimationTask) {
        self.cancel(task.channel);
        self.tasks.push(task);
    }

    pub fn cancel(&mut self, channel: AnimationChannel) {
        self.tasks.retain(|task| task.channel != channel);
    }

    pub fn task(&self, channel: AnimationChannel) -> Option<&AnimationTask> {
        self.tasks.iter().find(|task| task.channel == channel)
    }

    /// Current value of the channel's animation, if one is in flight.
    pub fn sample(&self, channel: AnimationChannel, now: Timestamp) -> Option<Vec3> {
        self.task(channel).map(|task| task.sample(now))
    }

    pub fn is_animating(&self, channel: AnimationChannel) -> bool {
        self.task(channel).is_some()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Applies one step of every task to `sink` and retires finished tasks.
    ///
    /// Returns true while any task remains in flight.
    pub fn tick(&mut self, now: Timestamp, sink: &mut impl AnimationSink) -> bool {
        for task in &self.tasks {
            sink.apply_step(task.channel, task.sample(now));
        }
        self.tasks.retain(|task| !task.is_finished(now));
        !self.tasks.is_empty()
    }
}
