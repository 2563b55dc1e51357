//! Path progress tracker - moves the packet along the active step's path.
//!
//! Progress is measured in path segments: `0.0` is the first waypoint and
//! `waypoints.len() - 1` is the last. The tracker knows nothing about steps or
//! playback modes; it is handed waypoints, a speed and frame deltas.

use crate::schema::{PlaybackConfig, Topology, Vec3};

/// Result of a single `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Nothing moved (paused, stationary, or already at the end).
    Idle,
    /// Progress increased but the end has not been reached.
    Moved,
    /// The end was reached on this call. Fires once per activation.
    Completed,
}

/// Linear interpolation between two points.
#[inline]
pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Resolve a node path into lifted waypoints.
///
/// Nodes missing from the topology resolve to the origin; validated scenarios
/// never contain them.
pub fn resolve_waypoints(
    topology: &Topology,
    path: &[crate::schema::NodeKind],
    height_offset: f32,
) -> Vec<Vec3> {
    path.iter()
        .map(|&kind| {
            let [x, y, z] = topology.position(kind).unwrap_or([0.0; 3]);
            [x, y + height_offset, z]
        })
        .collect()
}

/// Scalar cursor along a multi-hop path.
#[derive(Debug, Clone)]
pub struct PathTracker {
    waypoints: Vec<Vec3>,
    /// Segments per second.
    speed: f32,
    /// Playing time after which a stationary path completes, if any.
    min_dwell: Option<f32>,
    progress: f32,
    /// Playing time accumulated on a stationary path.
    dwell: f32,
    completed: bool,
}

impl PathTracker {
    /// Create a tracker on the given waypoints.
    pub fn new(waypoints: Vec<Vec3>, speed: f32) -> Self {
        Self {
            waypoints,
            speed,
            min_dwell: None,
            progress: 0.0,
            dwell: 0.0,
            completed: false,
        }
    }

    /// Create a tracker with speed and dwell taken from a playback config.
    pub fn with_config(waypoints: Vec<Vec3>, config: &PlaybackConfig) -> Self {
        Self {
            min_dwell: config.min_dwell,
            ..Self::new(waypoints, config.speed)
        }
    }

    /// Replace the active path and reset progress.
    pub fn load(&mut self, waypoints: Vec<Vec3>) {
        self.waypoints = waypoints;
        self.reset();
    }

    /// Move back to the start of the current path and re-arm completion.
    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.dwell = 0.0;
        self.completed = false;
    }

    /// Current progress in segments.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Highest reachable progress: `max(0, len - 1)`.
    #[inline]
    pub fn max_progress(&self) -> f32 {
        self.waypoints.len().saturating_sub(1) as f32
    }

    /// Whether completion has fired since the last reset.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Whether the path has fewer than two waypoints.
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.waypoints.len() < 2
    }

    /// Active waypoints.
    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    /// Advance by `delta` seconds of playing time.
    ///
    /// Stationary paths never move; they complete only when a minimum dwell is
    /// configured and that much playing time has passed.
    pub fn advance(&mut self, delta: f32, playing: bool) -> Advance {
        if !playing || self.completed {
            return Advance::Idle;
        }

        if self.is_stationary() {
            return self.advance_dwell(delta);
        }

        let max = self.max_progress();
        if self.progress >= max {
            return Advance::Idle;
        }

        let next = self.progress + delta * self.speed;
        if next >= max {
            self.progress = max;
            self.completed = true;
            Advance::Completed
        } else {
            self.progress = next;
            Advance::Moved
        }
    }

    fn advance_dwell(&mut self, delta: f32) -> Advance {
        let Some(min_dwell) = self.min_dwell else {
            return Advance::Idle;
        };

        self.dwell += delta;
        if self.dwell >= min_dwell {
            self.completed = true;
            Advance::Completed
        } else {
            Advance::Idle
        }
    }

    /// Interpolated packet position for the current progress.
    ///
    /// An empty path yields the origin.
    pub fn current_position(&self) -> Vec3 {
        let Some(&first) = self.waypoints.first() else {
            return [0.0; 3];
        };

        let last = self.waypoints.len() - 1;
        let index = (self.progress.floor() as usize).min(last);
        let next = (index + 1).min(last);
        let t = self.progress - index as f32;

        if index == next {
            return self.waypoints.get(index).copied().unwrap_or(first);
        }
        lerp(self.waypoints[index], self.waypoints[next], t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NodeKind, Scenario};
    use proptest::prelude::*;

    fn straight(len: usize) -> Vec<Vec3> {
        (0..len).map(|i| [i as f32 * 2.0, 0.5, 0.0]).collect()
    }

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn test_completes_exactly_once() {
        let mut tracker = PathTracker::new(straight(4), 1.2);
        let mut completions = 0;

        for _ in 0..600 {
            if tracker.advance(1.0 / 60.0, true) == Advance::Completed {
                completions += 1;
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(tracker.progress(), 3.0);
        assert!(tracker.is_complete());
    }

    #[test]
    fn test_overshoot_clamps_to_max() {
        let mut tracker = PathTracker::new(straight(3), 1.2);
        assert_eq!(tracker.advance(10.0, true), Advance::Completed);
        assert_eq!(tracker.progress(), 2.0);
        assert!(approx_eq(tracker.current_position(), [4.0, 0.5, 0.0]));
    }

    #[test]
    fn test_advance_after_completion_is_noop() {
        let mut tracker = PathTracker::new(straight(2), 1.0);
        assert_eq!(tracker.advance(1.0, true), Advance::Completed);
        assert_eq!(tracker.advance(1.0, true), Advance::Idle);
        assert_eq!(tracker.advance(0.5, true), Advance::Idle);
        assert_eq!(tracker.progress(), 1.0);
    }

    #[test]
    fn test_paused_does_not_move() {
        let mut tracker = PathTracker::new(straight(3), 1.0);
        assert_eq!(tracker.advance(0.5, false), Advance::Idle);
        assert_eq!(tracker.progress(), 0.0);
    }

    #[test]
    fn test_stationary_never_completes_without_dwell() {
        let mut tracker = PathTracker::new(straight(1), 1.2);
        assert_eq!(tracker.max_progress(), 0.0);
        for _ in 0..1000 {
            assert_eq!(tracker.advance(0.1, true), Advance::Idle);
        }
        assert!(!tracker.is_complete());
        assert!(approx_eq(tracker.current_position(), [0.0, 0.5, 0.0]));
    }

    #[test]
    fn test_stationary_completes_after_dwell() {
        let config = PlaybackConfig {
            min_dwell: Some(1.0),
            ..Default::default()
        };
        let mut tracker = PathTracker::with_config(straight(1), &config);

        assert_eq!(tracker.advance(0.6, true), Advance::Idle);
        assert_eq!(tracker.advance(0.3, false), Advance::Idle);
        assert_eq!(tracker.advance(0.5, true), Advance::Completed);
        assert_eq!(tracker.advance(0.5, true), Advance::Idle);
        assert_eq!(tracker.progress(), 0.0);
    }

    #[test]
    fn test_position_interpolates_within_segment() {
        let mut tracker = PathTracker::new(straight(3), 1.0);
        tracker.advance(1.25, true);
        assert!(approx_eq(tracker.current_position(), [2.5, 0.5, 0.0]));
    }

    #[test]
    fn test_position_boundaries() {
        let waypoints = vec![[1.0, 0.5, 2.0], [3.0, 0.5, -1.0], [5.0, 0.5, 0.0]];
        let mut tracker = PathTracker::new(waypoints.clone(), 1.2);
        assert!(approx_eq(tracker.current_position(), waypoints[0]));

        tracker.advance(100.0, true);
        assert!(approx_eq(tracker.current_position(), waypoints[2]));
    }

    #[test]
    fn test_load_resets() {
        let mut tracker = PathTracker::new(straight(2), 1.0);
        tracker.advance(5.0, true);
        assert!(tracker.is_complete());

        tracker.load(straight(5));
        assert_eq!(tracker.progress(), 0.0);
        assert!(!tracker.is_complete());
        assert_eq!(tracker.max_progress(), 4.0);
    }

    #[test]
    fn test_resolve_waypoints_lifts_positions() {
        let scenario = Scenario::default();
        let waypoints = resolve_waypoints(
            &scenario.topology,
            &[NodeKind::Client, NodeKind::Database],
            0.5,
        );
        assert_eq!(waypoints, vec![[-9.0, 0.5, 5.0], [11.0, 0.5, 0.0]]);
    }

    #[test]
    fn test_empty_path_position_is_origin() {
        let tracker = PathTracker::new(Vec::new(), 1.0);
        assert_eq!(tracker.current_position(), [0.0; 3]);
        assert_eq!(tracker.max_progress(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_enough_time_completes_once(
            len in 2usize..8,
            deltas in prop::collection::vec(0.001f32..0.1, 1..400),
        ) {
            let speed = 1.2;
            let mut tracker = PathTracker::new(straight(len), speed);
            let needed = (len - 1) as f32 / speed;

            let mut elapsed = 0.0;
            let mut completions = 0;
            for &d in &deltas {
                elapsed += d;
                if tracker.advance(d, true) == Advance::Completed {
                    completions += 1;
                }
            }
            // Top up so the total always covers the path.
            while elapsed < needed + 0.01 {
                elapsed += 0.05;
                if tracker.advance(0.05, true) == Advance::Completed {
                    completions += 1;
                }
            }

            prop_assert_eq!(completions, 1);
            prop_assert_eq!(tracker.progress(), (len - 1) as f32);
        }

        #[test]
        fn prop_progress_stays_in_bounds(
            len in 1usize..8,
            deltas in prop::collection::vec(0.0f32..1.0, 0..100),
        ) {
            let mut tracker = PathTracker::new(straight(len), 1.2);
            for &d in &deltas {
                tracker.advance(d, true);
                prop_assert!(tracker.progress() >= 0.0);
                prop_assert!(tracker.progress() <= tracker.max_progress());
            }
        }

        #[test]
        fn prop_reset_reproduces_trajectory(
            len in 2usize..6,
            warmup in prop::collection::vec(0.0f32..0.5, 0..20),
            deltas in prop::collection::vec(0.0f32..0.5, 1..40),
        ) {
            let mut reused = PathTracker::new(straight(len), 1.2);
            for &d in &warmup {
                reused.advance(d, true);
            }
            reused.reset();

            let mut fresh = PathTracker::new(straight(len), 1.2);
            for &d in &deltas {
                let a = reused.advance(d, true);
                let b = fresh.advance(d, true);
                prop_assert_eq!(a, b);
                prop_assert_eq!(reused.current_position(), fresh.current_position());
            }
        }
    }
}
