//! Playback controller - which step is active and whether time moves.
//!
//! Two flags are kept apart on purpose: `is_playing` says whether frame time
//! advances the packet, `auto_play` says whether finishing a step moves on to
//! the next one. Manual stepping plays a single step and stops; pressing play
//! runs the whole sequence.

use serde::{Deserialize, Serialize};

use super::event::{ActivationCause, Command, PlaybackEvent};
use super::timer::DeferredAdvance;

/// Observable playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Index of the active step.
    pub current_step: usize,
    /// Whether frame time advances the tracker.
    pub is_playing: bool,
    /// Whether completion triggers the next step.
    pub auto_play: bool,
}

impl PlaybackState {
    /// Shorthand used heavily in tests and logs.
    pub const fn new(current_step: usize, is_playing: bool, auto_play: bool) -> Self {
        Self {
            current_step,
            is_playing,
            auto_play,
        }
    }

    /// Whether the play button should show the pause glyph.
    #[inline]
    pub fn shows_pause(&self) -> bool {
        self.is_playing && self.auto_play
    }
}

/// State machine over `(current_step, is_playing, auto_play)`.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    state: PlaybackState,
    step_count: usize,
    advance_delay: f32,
    /// Bumped on every activation, including re-activating the same step.
    activation: u64,
    pending: Option<DeferredAdvance>,
}

impl PlaybackController {
    /// Create a controller over `step_count` steps (at least one).
    pub fn new(step_count: usize, advance_delay: f32) -> Self {
        Self {
            state: PlaybackState::default(),
            step_count: step_count.max(1),
            advance_delay,
            activation: 0,
            pending: None,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the final step.
    #[inline]
    pub fn last_step(&self) -> usize {
        self.step_count - 1
    }

    /// Whether the active step is the final one.
    #[inline]
    pub fn at_last_step(&self) -> bool {
        self.state.current_step == self.last_step()
    }

    /// Activation counter for the current step.
    #[inline]
    pub fn activation(&self) -> u64 {
        self.activation
    }

    /// Pending auto-advance, if one is scheduled.
    pub fn pending(&self) -> Option<&DeferredAdvance> {
        self.pending.as_ref()
    }

    /// Apply a user command.
    ///
    /// Returns the index of the step that was (re)activated, if any; the caller
    /// must restart the tracker on that step's path. Commands whose
    /// precondition fails are ignored.
    pub fn apply(&mut self, command: Command, events: &mut Vec<PlaybackEvent>) -> Option<usize> {
        let cause = ActivationCause::Manual(command);
        let current = self.state.current_step;

        match command {
            Command::PlayPause => {
                if self.at_last_step() && !self.state.is_playing {
                    return Some(self.activate(0, true, true, ActivationCause::Restart, events));
                }

                let playing = !self.state.is_playing;
                self.state.is_playing = playing;
                self.state.auto_play = playing;
                if !playing {
                    self.cancel_pending(events);
                }
                log::debug!(
                    "{} at step {}",
                    if playing { "Playing" } else { "Paused" },
                    current
                );
                None
            }
            Command::Next => {
                if current >= self.last_step() {
                    log::debug!("Next ignored: already at last step {current}");
                    return None;
                }
                Some(self.activate(current + 1, true, false, cause, events))
            }
            Command::Prev => {
                if current == 0 {
                    log::debug!("Prev ignored: already at first step");
                    return None;
                }
                Some(self.activate(current - 1, true, false, cause, events))
            }
            Command::Reset => Some(self.activate(0, false, false, cause, events)),
            Command::JumpTo(index) => {
                if index >= self.step_count {
                    log::debug!(
                        "Jump to step {index} ignored: only {} steps",
                        self.step_count
                    );
                    return None;
                }
                Some(self.activate(index, true, false, cause, events))
            }
        }
    }

    /// React to the tracker's completion signal for the active step.
    pub fn on_complete(&mut self, events: &mut Vec<PlaybackEvent>) {
        let current = self.state.current_step;

        if !self.state.auto_play {
            // Single manual step: stop and let the user inspect it.
            self.state.is_playing = false;
            return;
        }

        if self.at_last_step() {
            self.state.is_playing = false;
            self.state.auto_play = false;
            log::info!("Sequence finished at step {current}");
            events.push(PlaybackEvent::SequenceFinished);
            return;
        }

        self.pending = Some(DeferredAdvance::new(
            current,
            self.activation,
            self.advance_delay,
        ));
        log::debug!(
            "Advance from step {current} scheduled in {:.2}s",
            self.advance_delay
        );
        events.push(PlaybackEvent::AdvanceScheduled {
            from: current,
            delay: self.advance_delay,
        });
    }

    /// Count down a pending auto-advance by `delta` seconds.
    ///
    /// Returns the newly activated step when the advance fires.
    pub fn tick(&mut self, delta: f32, events: &mut Vec<PlaybackEvent>) -> Option<usize> {
        let timer = self.pending.as_mut()?;
        if !timer.tick(delta) {
            return None;
        }

        let timer = self.pending.take()?;
        let current = self.state.current_step;
        if !timer.matches(current, self.activation) || !self.state.auto_play {
            log::debug!(
                "Dropping stale advance from step {} (now at step {current})",
                timer.from_step()
            );
            return None;
        }
        if current >= self.last_step() {
            return None;
        }

        Some(self.activate(
            current + 1,
            true,
            true,
            ActivationCause::AutoAdvance,
            events,
        ))
    }

    fn cancel_pending(&mut self, events: &mut Vec<PlaybackEvent>) {
        if let Some(timer) = self.pending.take() {
            log::debug!("Cancelled pending advance from step {}", timer.from_step());
            events.push(PlaybackEvent::AdvanceCancelled {
                from: timer.from_step(),
            });
        }
    }

    fn activate(
        &mut self,
        index: usize,
        is_playing: bool,
        auto_play: bool,
        cause: ActivationCause,
        events: &mut Vec<PlaybackEvent>,
    ) -> usize {
        self.cancel_pending(events);
        self.state = PlaybackState::new(index, is_playing, auto_play);
        self.activation += 1;

        log::info!("Step {index} activated ({cause:?})");
        events.push(PlaybackEvent::StepActivated { index, cause });
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEPS: usize = 13;
    const LAST: usize = STEPS - 1;

    fn controller_at(state: PlaybackState) -> PlaybackController {
        let mut controller = PlaybackController::new(STEPS, 0.5);
        controller.state = state;
        controller
    }

    #[test]
    fn test_initial_state() {
        let controller = PlaybackController::new(STEPS, 0.5);
        assert_eq!(controller.state(), PlaybackState::new(0, false, false));
        assert!(controller.pending().is_none());
    }

    #[test]
    fn test_completion_schedules_advance() {
        let mut events = Vec::new();
        let mut controller = controller_at(PlaybackState::new(5, true, true));

        controller.on_complete(&mut events);
        assert_eq!(controller.state(), PlaybackState::new(5, true, true));
        assert_eq!(
            events,
            vec![PlaybackEvent::AdvanceScheduled {
                from: 5,
                delay: 0.5
            }]
        );

        assert_eq!(controller.tick(0.3, &mut events), None);
        assert_eq!(controller.tick(0.3, &mut events), Some(6));
        assert_eq!(controller.state(), PlaybackState::new(6, true, true));
        assert!(controller.pending().is_none());
    }

    #[test]
    fn test_completion_at_last_step_stops() {
        let mut events = Vec::new();
        let mut controller = controller_at(PlaybackState::new(LAST, true, true));

        controller.on_complete(&mut events);
        assert_eq!(controller.state(), PlaybackState::new(LAST, false, false));
        assert_eq!(events, vec![PlaybackEvent::SequenceFinished]);
        assert!(controller.pending().is_none());
    }

    #[test]
    fn test_completion_without_auto_play_stops_in_place() {
        let mut events = Vec::new();
        let mut controller = controller_at(PlaybackState::new(3, true, false));

        controller.on_complete(&mut events);
        assert_eq!(controller.state(), PlaybackState::new(3, false, false));
        assert!(events.is_empty());
    }

    #[test]
    fn test_manual_next_cancels_pending() {
        let mut events = Vec::new();
        let mut controller = controller_at(PlaybackState::new(3, true, true));
        controller.on_complete(&mut events);
        assert!(controller.pending().is_some());

        controller.state = PlaybackState::new(3, false, false);
        events.clear();
        assert_eq!(controller.apply(Command::Next, &mut events), Some(4));
        assert_eq!(controller.state(), PlaybackState::new(4, true, false));
        assert!(controller.pending().is_none());
        assert_eq!(events[0], PlaybackEvent::AdvanceCancelled { from: 3 });

        // Nothing left to fire.
        assert_eq!(controller.tick(10.0, &mut events), None);
        assert_eq!(controller.state().current_step, 4);
    }

    #[test]
    fn test_jump_supersedes_pending_advance() {
        let mut events = Vec::new();
        let mut controller = controller_at(PlaybackState::new(2, true, true));
        controller.on_complete(&mut events);

        assert_eq!(controller.apply(Command::JumpTo(9), &mut events), Some(9));
        assert_eq!(controller.tick(1.0, &mut events), None);
        assert_eq!(controller.state(), PlaybackState::new(9, true, false));
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut events = Vec::new();
        let mut controller = controller_at(PlaybackState::new(2, true, true));
        controller.on_complete(&mut events);

        // Step re-entered without the timer being cancelled.
        controller.activation += 1;
        assert_eq!(controller.tick(1.0, &mut events), None);
        assert_eq!(controller.state(), PlaybackState::new(2, true, true));
    }

    #[test]
    fn test_play_pause_restarts_from_last() {
        let mut events = Vec::new();
        let mut controller = controller_at(PlaybackState::new(LAST, false, false));

        assert_eq!(controller.apply(Command::PlayPause, &mut events), Some(0));
        assert_eq!(controller.state(), PlaybackState::new(0, true, true));
        assert_eq!(
            events,
            vec![PlaybackEvent::StepActivated {
                index: 0,
                cause: ActivationCause::Restart
            }]
        );
    }

    #[test]
    fn test_play_pause_toggles_auto_play() {
        let mut events = Vec::new();
        let mut controller = PlaybackController::new(STEPS, 0.5);

        assert_eq!(controller.apply(Command::PlayPause, &mut events), None);
        assert_eq!(controller.state(), PlaybackState::new(0, true, true));
        assert!(controller.state().shows_pause());

        assert_eq!(controller.apply(Command::PlayPause, &mut events), None);
        assert_eq!(controller.state(), PlaybackState::new(0, false, false));
        assert!(!controller.state().shows_pause());
    }

    #[test]
    fn test_pause_cancels_pending() {
        let mut events = Vec::new();
        let mut controller = controller_at(PlaybackState::new(4, true, true));
        controller.on_complete(&mut events);

        controller.apply(Command::PlayPause, &mut events);
        assert!(controller.pending().is_none());
        assert_eq!(controller.tick(1.0, &mut events), None);
        assert_eq!(controller.state(), PlaybackState::new(4, false, false));
    }

    #[test]
    fn test_boundaries_rejected_silently() {
        let mut events = Vec::new();
        let mut controller = PlaybackController::new(STEPS, 0.5);

        assert_eq!(controller.apply(Command::Prev, &mut events), None);
        assert_eq!(controller.apply(Command::JumpTo(STEPS), &mut events), None);
        assert_eq!(controller.state(), PlaybackState::new(0, false, false));

        controller.state = PlaybackState::new(LAST, false, false);
        assert_eq!(controller.apply(Command::Next, &mut events), None);
        assert_eq!(controller.state(), PlaybackState::new(LAST, false, false));
        assert!(events.is_empty());
    }

    #[test]
    fn test_prev_and_reset() {
        let mut events = Vec::new();
        let mut controller = controller_at(PlaybackState::new(6, false, true));

        assert_eq!(controller.apply(Command::Prev, &mut events), Some(5));
        assert_eq!(controller.state(), PlaybackState::new(5, true, false));

        assert_eq!(controller.apply(Command::Reset, &mut events), Some(0));
        assert_eq!(controller.state(), PlaybackState::new(0, false, false));
    }

    #[test]
    fn test_rejump_to_current_step_reactivates() {
        let mut events = Vec::new();
        let mut controller = controller_at(PlaybackState::new(7, false, false));
        let before = controller.activation();

        assert_eq!(controller.apply(Command::JumpTo(7), &mut events), Some(7));
        assert_eq!(controller.activation(), before + 1);
        assert_eq!(controller.state(), PlaybackState::new(7, true, false));
    }

    #[test]
    fn test_single_step_sequence() {
        let mut events = Vec::new();
        let mut controller = PlaybackController::new(1, 0.5);

        // Paused on the only (and last) step: play restarts it.
        assert_eq!(controller.apply(Command::PlayPause, &mut events), Some(0));
        controller.on_complete(&mut events);
        assert_eq!(controller.state(), PlaybackState::new(0, false, false));
    }
}
