//! Playback engine - drives controller and tracker from frame deltas.
//!
//! Frame order: pending auto-advance, then tracker advance, then completion
//! handling, then position. A step activated by the auto-advance timer starts
//! moving on the following frame.

use std::sync::Arc;

use super::controller::{PlaybackController, PlaybackState};
use super::event::{Command, PlaybackEvent};
use super::snapshot::FrameSnapshot;
use super::tracker::{Advance, PathTracker, resolve_waypoints};
use crate::schema::{Scenario, ScenarioError, Step, Vec3};

/// Step-playback engine over a validated scenario.
pub struct PlaybackEngine {
    scenario: Arc<Scenario>,
    controller: PlaybackController,
    tracker: PathTracker,
    /// Events not yet handed out in a snapshot.
    events: Vec<PlaybackEvent>,
    elapsed: f64,
}

impl PlaybackEngine {
    /// Validate the scenario and start paused on the first step.
    pub fn new(scenario: Arc<Scenario>) -> Result<Self, ScenarioError> {
        scenario.validate()?;

        let config = &scenario.playback;
        let controller = PlaybackController::new(scenario.steps.len(), config.advance_delay);
        let waypoints = resolve_waypoints(
            &scenario.topology,
            &scenario.steps[0].path,
            config.height_offset,
        );
        let tracker = PathTracker::with_config(waypoints, config);

        Ok(Self {
            scenario,
            controller,
            tracker,
            events: Vec::new(),
            elapsed: 0.0,
        })
    }

    /// Engine over the built-in scenario.
    pub fn builtin() -> Result<Self, ScenarioError> {
        Self::new(Arc::new(Scenario::default()))
    }

    /// Shared scenario.
    pub fn scenario(&self) -> &Arc<Scenario> {
        &self.scenario
    }

    /// Current playback state.
    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    /// Controller, for inspection.
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Tracker for the active step, for inspection.
    pub fn tracker(&self) -> &PathTracker {
        &self.tracker
    }

    /// The active step.
    pub fn current_step(&self) -> &Step {
        &self.scenario.steps[self.controller.state().current_step]
    }

    /// Packet position for the current progress.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.tracker.current_position()
    }

    /// Whether the active step draws its packet.
    #[inline]
    pub fn show_packet(&self) -> bool {
        self.current_step().packet_visible
    }

    /// Simulated seconds since creation.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Apply a user command. Takes effect before the next frame.
    pub fn command(&mut self, command: Command) {
        if let Some(index) = self.controller.apply(command, &mut self.events) {
            self.load_step(index);
            return;
        }

        // Resuming auto-play on a step that already finished: move on rather
        // than wait for a completion that will not fire again.
        let state = self.controller.state();
        if command == Command::PlayPause
            && state.is_playing
            && state.auto_play
            && self.tracker.is_complete()
        {
            self.controller.on_complete(&mut self.events);
        }
    }

    /// Toggle play/pause.
    pub fn play_pause(&mut self) {
        self.command(Command::PlayPause);
    }

    /// Manual next step.
    pub fn next(&mut self) {
        self.command(Command::Next);
    }

    /// Manual previous step.
    pub fn prev(&mut self) {
        self.command(Command::Prev);
    }

    /// Back to the first step, stopped.
    pub fn reset(&mut self) {
        self.command(Command::Reset);
    }

    /// Activate a specific step.
    pub fn jump_to(&mut self, index: usize) {
        self.command(Command::JumpTo(index));
    }

    /// Advance simulated time by `delta` seconds without building a snapshot.
    pub fn update(&mut self, delta: f32) {
        let delta = if delta.is_finite() && delta >= 0.0 {
            delta
        } else {
            log::warn!("Ignoring invalid frame delta {delta}");
            0.0
        };
        self.elapsed += f64::from(delta);

        if let Some(index) = self.controller.tick(delta, &mut self.events) {
            self.load_step(index);
            return;
        }

        let playing = self.controller.state().is_playing;
        if self.tracker.advance(delta, playing) == Advance::Completed {
            let index = self.controller.state().current_step;
            log::debug!("Step {index} completed");
            self.events.push(PlaybackEvent::StepCompleted { index });
            self.controller.on_complete(&mut self.events);
        }
    }

    /// Advance by one frame and report the result.
    pub fn frame(&mut self, delta: f32) -> FrameSnapshot<'_> {
        self.update(delta);
        self.snapshot()
    }

    /// Report the current frame, handing out buffered events.
    pub fn snapshot(&mut self) -> FrameSnapshot<'_> {
        let events = std::mem::take(&mut self.events);
        let state = self.controller.state();
        FrameSnapshot::new(
            &self.scenario.steps[state.current_step],
            state,
            self.tracker.current_position(),
            self.tracker.progress(),
            self.tracker.max_progress(),
            self.elapsed,
            events,
        )
    }

    /// Take buffered events without building a snapshot.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    fn load_step(&mut self, index: usize) {
        let step = &self.scenario.steps[index];
        let waypoints = resolve_waypoints(
            &self.scenario.topology,
            &step.path,
            self.scenario.playback.height_offset,
        );
        self.tracker.load(waypoints);
    }
}
