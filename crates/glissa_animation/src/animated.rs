//! Signal-backed animated values
//!
//! An [`AnimatedValue`] couples a tween with a [`ReactiveGraph`] signal:
//! every tick publishes the tween's current value through `graph.set`, so
//! derived values and effects downstream observe each frame of the motion.

use glissa_core::reactive::{ReactiveGraph, Signal};

use crate::tween::{Tween, TweenSpec};

/// A numeric value that animates toward targets, published as a signal.
pub struct AnimatedValue {
    signal: Signal<f32>,
    tween: Tween,
}

impl AnimatedValue {
    /// Create an animated value resting at `initial`.
    pub fn new(graph: &mut ReactiveGraph, initial: f32) -> Self {
        let signal = graph.create_signal(initial);
        Self {
            signal,
            tween: Tween::resting(initial),
        }
    }

    /// The signal this value publishes through.
    pub fn signal(&self) -> Signal<f32> {
        self.signal
    }

    /// The current published value.
    pub fn value(&self, graph: &ReactiveGraph) -> f32 {
        graph.get(self.signal).unwrap_or_else(|| self.tween.value())
    }

    /// The target the value is converging toward.
    pub fn target(&self) -> f32 {
        self.tween.target()
    }

    /// Whether the value has settled at its target.
    pub fn is_settled(&self) -> bool {
        self.tween.is_finished()
    }

    /// Start (or redirect) an animation toward `target`.
    ///
    /// The motion continues from the currently published value; calling this
    /// with the current target is a no-op, so it is safe to call every frame.
    pub fn animate_to(&mut self, graph: &mut ReactiveGraph, target: f32, spec: TweenSpec) {
        if self.tween.target() == target {
            return;
        }
        tracing::trace!(target, duration_ms = spec.duration_ms, "retarget");
        let current = self.value(graph);
        self.tween.snap(current);
        self.tween.retarget(target, spec);
    }

    /// Cancel any in-flight animation and publish `value` immediately.
    pub fn snap_to(&mut self, graph: &mut ReactiveGraph, value: f32) {
        self.tween.snap(value);
        graph.set(self.signal, value);
    }

    /// Advance the animation by `dt_ms` and publish the new value.
    pub fn tick(&mut self, graph: &mut ReactiveGraph, dt_ms: f32) {
        if self.tween.is_finished() {
            return;
        }
        self.tween.tick(dt_ms);
        graph.set(self.signal, self.tween.value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animates_to_target_over_frames() {
        let mut graph = ReactiveGraph::new();
        let mut value = AnimatedValue::new(&mut graph, 0.0);

        value.animate_to(&mut graph, 100.0, TweenSpec::linear(160));
        for _ in 0..10 {
            value.tick(&mut graph, 16.0);
        }

        assert!(value.is_settled());
        assert_eq!(value.value(&graph), 100.0);
        assert_eq!(graph.get(value.signal()), Some(100.0));
    }

    #[test]
    fn test_snap_cancels_animation() {
        let mut graph = ReactiveGraph::new();
        let mut value = AnimatedValue::new(&mut graph, 0.0);

        value.animate_to(&mut graph, 100.0, TweenSpec::linear(1000));
        value.tick(&mut graph, 100.0);
        value.snap_to(&mut graph, -5.0);

        assert!(value.is_settled());
        assert_eq!(graph.get(value.signal()), Some(-5.0));
    }

    #[test]
    fn test_retarget_is_continuous() {
        let mut graph = ReactiveGraph::new();
        let mut value = AnimatedValue::new(&mut graph, 0.0);

        value.animate_to(&mut graph, 100.0, TweenSpec::linear(1000));
        for _ in 0..25 {
            value.tick(&mut graph, 16.0);
        }
        let mid = value.value(&graph);
        assert!(mid > 0.0 && mid < 100.0);

        value.animate_to(&mut graph, 0.0, TweenSpec::linear(1000));
        assert!((value.value(&graph) - mid).abs() < 1e-3);
    }

    #[test]
    fn test_repeated_animate_to_same_target_is_noop() {
        let mut graph = ReactiveGraph::new();
        let mut value = AnimatedValue::new(&mut graph, 0.0);

        value.animate_to(&mut graph, 100.0, TweenSpec::linear(100));
        value.tick(&mut graph, 50.0);
        let mid = value.value(&graph);

        // Calling again with the same target must not restart the clock
        value.animate_to(&mut graph, 100.0, TweenSpec::linear(100));
        assert_eq!(value.value(&graph), mid);
        value.tick(&mut graph, 50.0);
        assert!(value.is_settled());
    }

    #[test]
    fn test_downstream_derived_sees_frames() {
        let mut graph = ReactiveGraph::new();
        let mut value = AnimatedValue::new(&mut graph, 0.0);
        let signal = value.signal();
        let negated = graph.create_derived(move |g| -g.get(signal).unwrap_or(0.0));

        value.animate_to(&mut graph, 80.0, TweenSpec::linear(80));
        value.tick(&mut graph, 40.0);
        assert_eq!(graph.get_derived(negated), Some(-40.0));
        value.tick(&mut graph, 40.0);
        assert_eq!(graph.get_derived(negated), Some(-80.0));
    }
}
