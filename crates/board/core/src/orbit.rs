//! Camera orbit controller.
//!
//! The controller owns the logical [`PerspectiveState`]s (`initial` and
//! `current`) and turns perspective commands into camera transitions on the
//! [`FrameDispatcher`]. The logical pose changes the instant a command is
//! accepted; the rendered camera converges on it over the transition.

use std::collections::VecDeque;

use glam::Vec3;
use strum::{Display, EnumString};

use crate::animation::{AnimationChannel, AnimationTask, Easing, FrameDispatcher, Timestamp};
use crate::camera::Camera;
use crate::perspective::{PerspectiveCommand, PerspectiveState};

/// How a command issued during an in-flight transition is handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CommandPolicy {
    /// Start a new transition from the currently rendered pose.
    #[default]
    Compose,
    /// Play transitions one after another.
    Queue,
    /// Refuse commands until the camera has settled.
    Reject,
}

#[derive(Clone, Debug)]
pub struct CameraOrbitController {
    initial: PerspectiveState,
    current: PerspectiveState,
    policy: CommandPolicy,
    duration_ms: u64,
    easing: Easing,
    queued: VecDeque<Vec3>,
}

impl Default for CameraOrbitController {
    fn default() -> Self {
        Self::new(CommandPolicy::default(), Self::TRANSITION_MS, Easing::default())
    }
}

impl CameraOrbitController {
    pub const TRANSITION_MS: u64 = 1000;

    pub fn new(policy: CommandPolicy, duration_ms: u64, easing: Easing) -> Self {
        Self {
            initial: PerspectiveState::default(),
            current: PerspectiveState::default(),
            policy,
            duration_ms,
            easing,
            queued: VecDeque::new(),
        }
    }

    /// Sets the home pose for a new encounter and snaps the camera to it.
    pub fn initialize(
        &mut self,
        home: PerspectiveState,
        camera: &mut Camera,
        dispatcher: &mut FrameDispatcher,
    ) {
        self.initial = home;
        self.current = home;
        self.queued.clear();
        dispatcher.cancel(AnimationChannel::CameraEye);

        camera.eye = home.eye_position();
        camera.look_at_origin();
        tracing::debug!(
            alpha = home.alpha.degrees(),
            beta = home.beta.degrees(),
            radius = home.radius,
            "camera initialized"
        );
    }

    pub fn initial(&self) -> PerspectiveState {
        self.initial
    }

    pub fn current(&self) -> PerspectiveState {
        self.current
    }

    pub fn policy(&self) -> CommandPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: CommandPolicy) {
        self.policy = policy;
        if policy != CommandPolicy::Queue {
            self.queued.clear();
        }
    }

    /// The pose `command` would lead to, or `None` at an elevation boundary.
    pub fn target_for(&self, command: PerspectiveCommand) -> Option<PerspectiveState> {
        self.current.apply(command, &self.initial)
    }

    /// True while a transition is playing or waiting in the queue.
    pub fn is_transitioning(&self, dispatcher: &FrameDispatcher) -> bool {
        dispatcher.is_animating(AnimationChannel::CameraEye) || !self.queued.is_empty()
    }

    /// Applies `command` and schedules the camera transition.
    ///
    /// Returns `false` when nothing changed: the command was a no-op at an
    /// elevation boundary, or the policy refused it mid-transition.
    pub fn change_perspective(
        &mut self,
        command: PerspectiveCommand,
        now: Timestamp,
        camera: &Camera,
        dispatcher: &mut FrameDispatcher,
    ) -> bool {
        let busy = self.is_transitioning(dispatcher);
        if busy && self.policy == CommandPolicy::Reject {
            tracing::debug!(%command, "perspective change refused while animating");
            return false;
        }

        let Some(next) = self.target_for(command) else {
            tracing::debug!(
                %command,
                beta = self.current.beta.degrees(),
                "perspective unchanged at boundary"
            );
            return false;
        };
        self.current = next;
        let target = next.eye_position();

        if busy && self.policy == CommandPolicy::Queue {
            self.queued.push_back(target);
        } else {
            let from = dispatcher
                .sample(AnimationChannel::CameraEye, now)
                .unwrap_or(camera.eye);
            dispatcher.schedule(self.transition(from, target, now));
        }

        tracing::debug!(
            %command,
            alpha = next.alpha.degrees(),
            beta = next.beta.degrees(),
            "perspective changed"
        );
        true
    }

    /// Starts the next queued transition once the camera has settled.
    pub fn pump(&mut self, now: Timestamp, camera: &Camera, dispatcher: &mut FrameDispatcher) {
        if dispatcher.is_animating(AnimationChannel::CameraEye) {
            return;
        }
        if let Some(target) = self.queued.pop_front() {
            dispatcher.schedule(self.transition(camera.eye, target, now));
        }
    }

    fn transition(&self, from: Vec3, to: Vec3, now: Timestamp) -> AnimationTask {
        AnimationTask::new(
            AnimationChannel::CameraEye,
            now,
            self.duration_ms,
            self.easing,
            from,
            to,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationSink;
    use crate::perspective::{Azimuth, Elevation};

    struct CameraSink<'a>(&'a mut Camera);

    impl AnimationSink for CameraSink<'_> {
        fn apply_step(&mut self, _channel: AnimationChannel, value: Vec3) {
            self.0.eye = value;
            self.0.look_at_origin();
        }
    }

    fn setup(policy: CommandPolicy) -> (CameraOrbitController, Camera, FrameDispatcher) {
        let mut controller = CameraOrbitController::new(policy, 1000, Easing::EaseInOutQuad);
        let mut camera = Camera::default();
        let mut dispatcher = FrameDispatcher::new();
        controller.initialize(PerspectiveState::default(), &mut camera, &mut dispatcher);
        (controller, camera, dispatcher)
    }

    #[test]
    fn initialize_places_the_camera_at_the_home_pose() {
        let (controller, camera, dispatcher) = setup(CommandPolicy::Compose);
        assert_eq!(camera.eye, controller.initial().eye_position());
        assert_eq!(camera.target, Vec3::ZERO);
        assert!(dispatcher.is_idle());
    }

    #[test]
    fn boundary_commands_return_false_and_schedule_nothing() {
        let (mut controller, camera, mut dispatcher) = setup(CommandPolicy::Compose);
        assert!(!controller.change_perspective(
            PerspectiveCommand::Down,
            Timestamp(0),
            &camera,
            &mut dispatcher
        ));
        assert!(dispatcher.is_idle());

        let top = PerspectiveState::new(Azimuth::Deg0, Elevation::High, 7.0);
        let mut camera = camera;
        controller.initialize(top, &mut camera, &mut dispatcher);
        assert!(!controller.change_perspective(
            PerspectiveCommand::Up,
            Timestamp(0),
            &camera,
            &mut dispatcher
        ));
    }

    #[test]
    fn logical_state_changes_before_the_camera_arrives() {
        let (mut controller, mut camera, mut dispatcher) = setup(CommandPolicy::Compose);
        assert!(controller.change_perspective(
            PerspectiveCommand::Left,
            Timestamp(0),
            &camera,
            &mut dispatcher
        ));
        assert!(controller.change_perspective(
            PerspectiveCommand::Left,
            Timestamp(100),
            &camera,
            &mut dispatcher
        ));
        assert_eq!(controller.current().alpha, Azimuth::Deg270);

        dispatcher.tick(Timestamp(500), &mut CameraSink(&mut camera));
        assert_ne!(camera.eye, controller.current().eye_position());

        dispatcher.tick(Timestamp(1100), &mut CameraSink(&mut camera));
        assert!(camera.eye.abs_diff_eq(controller.current().eye_position(), 1e-5));
        assert!(dispatcher.is_idle());
    }

    #[test]
    fn compose_restarts_from_the_rendered_pose() {
        let (mut controller, camera, mut dispatcher) = setup(CommandPolicy::Compose);
        controller.change_perspective(
            PerspectiveCommand::Up,
            Timestamp(0),
            &camera,
            &mut dispatcher,
        );
        let midway = dispatcher.sample(AnimationChannel::CameraEye, Timestamp(400)).unwrap();

        controller.change_perspective(
            PerspectiveCommand::Up,
            Timestamp(400),
            &camera,
            &mut dispatcher,
        );
        let task = dispatcher.task(AnimationChannel::CameraEye).unwrap();
        assert_eq!(task.from, midway);
        assert_eq!(task.start, Timestamp(400));
    }

    #[test]
    fn queue_plays_legs_in_order() {
        let (mut controller, mut camera, mut dispatcher) = setup(CommandPolicy::Queue);
        controller.change_perspective(
            PerspectiveCommand::Up,
            Timestamp(0),
            &camera,
            &mut dispatcher,
        );
        controller.change_perspective(
            PerspectiveCommand::Up,
            Timestamp(200),
            &camera,
            &mut dispatcher,
        );
        assert_eq!(controller.current().beta, Elevation::High);

        let first_leg = PerspectiveState {
            beta: Elevation::Mid,
            ..controller.current()
        };
        dispatcher.tick(Timestamp(1000), &mut CameraSink(&mut camera));
        assert!(camera.eye.abs_diff_eq(first_leg.eye_position(), 1e-5));
        assert!(controller.is_transitioning(&dispatcher));

        controller.pump(Timestamp(1016), &camera, &mut dispatcher);
        dispatcher.tick(Timestamp(2016), &mut CameraSink(&mut camera));
        assert!(camera.eye.abs_diff_eq(controller.current().eye_position(), 1e-5));
        assert!(!controller.is_transitioning(&dispatcher));
    }

    #[test]
    fn reject_refuses_commands_mid_transition() {
        let (mut controller, camera, mut dispatcher) = setup(CommandPolicy::Reject);
        assert!(controller.change_perspective(
            PerspectiveCommand::Right,
            Timestamp(0),
            &camera,
            &mut dispatcher
        ));
        assert!(!controller.change_perspective(
            PerspectiveCommand::Right,
            Timestamp(10),
            &camera,
            &mut dispatcher
        ));
        assert_eq!(controller.current().alpha, Azimuth::Deg135);
    }

    #[test]
    fn home_returns_to_the_initial_pose() {
        let (mut controller, camera, mut dispatcher) = setup(CommandPolicy::Compose);
        controller.change_perspective(
            PerspectiveCommand::Right,
            Timestamp(0),
            &camera,
            &mut dispatcher,
        );
        controller.change_perspective(
            PerspectiveCommand::Up,
            Timestamp(0),
            &camera,
            &mut dispatcher,
        );
        assert!(controller.change_perspective(
            PerspectiveCommand::Home,
            Timestamp(0),
            &camera,
            &mut dispatcher
        ));
        assert_eq!(controller.current(), controller.initial());
    }

    #[test]
    fn policies_parse_from_snake_case() {
        assert_eq!("queue".parse::<CommandPolicy>(), Ok(CommandPolicy::Queue));
        assert_eq!(CommandPolicy::Compose.to_string(), "compose");
    }
}
