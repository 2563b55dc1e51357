//! Single-shot deferred advance, counted down by frame deltas.

/// A pending "move to the next step" scheduled after a step completed in auto-play.
///
/// The handle is tagged with the step and activation it was scheduled for. The
/// owner drops it on any manual command; the tag is checked again when it fires.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredAdvance {
    from_step: usize,
    activation: u64,
    remaining: f32,
}

impl DeferredAdvance {
    /// Schedule an advance away from `from_step` after `delay` seconds.
    pub fn new(from_step: usize, activation: u64, delay: f32) -> Self {
        Self {
            from_step,
            activation,
            remaining: delay.max(0.0),
        }
    }

    /// Step the advance was scheduled from.
    #[inline]
    pub fn from_step(&self) -> usize {
        self.from_step
    }

    /// Activation number the advance belongs to.
    #[inline]
    pub fn activation(&self) -> u64 {
        self.activation
    }

    /// Seconds left before the advance is due.
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Count down by `delta`; returns true once the delay has elapsed.
    pub fn tick(&mut self, delta: f32) -> bool {
        self.remaining -= delta;
        self.remaining <= 0.0
    }

    /// Whether the advance still applies to the given step activation.
    #[inline]
    pub fn matches(&self, step: usize, activation: u64) -> bool {
        self.from_step == step && self.activation == activation
    }
}
