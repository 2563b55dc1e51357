//! Playback commands and the events emitted while processing them.

use serde::{Deserialize, Serialize};

/// User-issued playback command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "step")]
pub enum Command {
    /// Toggle play/pause; restarts from the first step when paused on the last.
    PlayPause,
    /// Manually move to the next step.
    Next,
    /// Manually move to the previous step.
    Prev,
    /// Back to the first step, stopped.
    Reset,
    /// Activate a specific step (timeline click).
    JumpTo(usize),
}

/// Why a step became active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationCause {
    /// Auto-play advanced after the previous step completed.
    AutoAdvance,
    /// Play pressed on the last step.
    Restart,
    /// A manual command (Next, Prev, Reset, JumpTo).
    Manual(Command),
}

/// Something that happened during a frame or command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A step became active and its path restarted from the beginning.
    StepActivated {
        index: usize,
        cause: ActivationCause,
    },
    /// The packet reached the end of the step's path.
    StepCompleted { index: usize },
    /// An auto-advance away from `from` was scheduled.
    AdvanceScheduled { from: usize, delay: f32 },
    /// A pending auto-advance was dropped before firing.
    AdvanceCancelled { from: usize },
    /// Auto-play reached the end of the last step.
    SequenceFinished,
}
