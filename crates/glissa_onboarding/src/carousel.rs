//! Carousel slide offset
//!
//! The horizontal translation of the page strip. Two states, driven by the
//! externally-owned dragging flag:
//!
//! - **Dragging**: the offset tracks the finger 1:1 with no animation.
//!   Dragging right past the first page is suppressed, so the strip does not
//!   bounce left of its start.
//! - **Settled**: the offset animates to the resting position of the current
//!   page over 300 ms with an ease-out curve, ignoring any drag remainder.

use glissa_animation::{AnimatedValue, TweenSpec};
use glissa_core::reactive::{Derived, ReactiveGraph, Signal};

use crate::constants::{slide_spec, PAGE_SIZE, TOTAL_PAGES};

/// Page index for a progress value: `floor(progress / 25) mod 3`.
///
/// Cycles 0, 1, 2 as progress advances by 25-unit steps. Progress is
/// expected in [0, 100]; the formula is applied as-is outside that range
/// (truncated modulo, so negative progress yields a negative index).
pub fn page_index(progress: f32) -> i32 {
    (progress / PAGE_SIZE).floor() as i32 % TOTAL_PAGES as i32
}

/// The carousel's horizontal offset: a value that converges on the resting
/// page position whenever no drag is active.
pub struct CarouselPosition {
    is_dragging: Signal<bool>,
    /// Resting offset of the current page: `-page_index * window_width`.
    resting_offset: Derived<f32>,
    /// Finger-tracking offset with the first-page bounce suppressed.
    tracking_offset: Derived<f32>,
    position: AnimatedValue,
    spec: TweenSpec,
}

impl CarouselPosition {
    pub fn new(
        graph: &mut ReactiveGraph,
        window_width: f32,
        progress: Signal<f32>,
        is_dragging: Signal<bool>,
        drag_amount: Signal<f32>,
        spec: TweenSpec,
    ) -> Self {
        let resting_offset = graph.create_derived(move |g| {
            let progress = g.get(progress).unwrap_or(0.0);
            -(page_index(progress) as f32 * window_width)
        });
        let tracking_offset = graph.create_derived(move |g| {
            let progress = g.get(progress).unwrap_or(0.0);
            let drag = g.get(drag_amount).unwrap_or(0.0);
            let base = page_index(progress) as f32 * window_width;
            if base == 0.0 && drag > 0.0 {
                base
            } else {
                -base + drag
            }
        });

        // Start at rest on the initial page; the first animation happens on
        // the first actual input change.
        let initial = graph.get_derived(resting_offset).unwrap_or(0.0);
        let position = AnimatedValue::new(graph, initial);

        Self {
            is_dragging,
            resting_offset,
            tracking_offset,
            position,
            spec,
        }
    }

    /// The signal publishing the current offset, for binding to a style
    /// property downstream.
    pub fn signal(&self) -> Signal<f32> {
        self.position.signal()
    }

    /// The current offset in pixels.
    pub fn value(&self, graph: &ReactiveGraph) -> f32 {
        self.position.value(graph)
    }

    /// Whether the offset is resting on a page boundary (not dragging, no
    /// slide in flight).
    pub fn is_settled(&self, graph: &ReactiveGraph) -> bool {
        !graph.get(self.is_dragging).unwrap_or(false) && self.position.is_settled()
    }

    /// Advance one frame.
    ///
    /// While dragging the offset snaps to the finger position immediately;
    /// otherwise it eases toward the resting page position, retargeting
    /// whenever the page changed since the last frame.
    pub fn tick(&mut self, graph: &mut ReactiveGraph, dt_ms: f32) {
        if graph.get(self.is_dragging).unwrap_or(false) {
            let adjusted = graph.get_derived(self.tracking_offset).unwrap_or(0.0);
            if self.position.value(graph) != adjusted || self.position.target() != adjusted {
                self.position.snap_to(graph, adjusted);
            }
        } else {
            let target = graph.get_derived(self.resting_offset).unwrap_or(0.0);
            self.position.animate_to(graph, target, self.spec);
            self.position.tick(graph, dt_ms);
        }
    }
}

/// Build the slide-offset value for an onboarding carousel.
///
/// `progress`, `is_dragging` and `drag_amount` are externally-owned signals;
/// `window_width` is the fixed page width in pixels. Uses the default 300 ms
/// ease-out snap.
pub fn carousel_left_position(
    graph: &mut ReactiveGraph,
    window_width: f32,
    progress: Signal<f32>,
    is_dragging: Signal<bool>,
    drag_amount: Signal<f32>,
) -> CarouselPosition {
    CarouselPosition::new(
        graph,
        window_width,
        progress,
        is_dragging,
        drag_amount,
        slide_spec(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SLIDE_ANIMATION_DURATION_MS;

    struct Rig {
        graph: ReactiveGraph,
        progress: Signal<f32>,
        is_dragging: Signal<bool>,
        drag_amount: Signal<f32>,
        position: CarouselPosition,
    }

    fn rig(window_width: f32) -> Rig {
        let mut graph = ReactiveGraph::new();
        let progress = graph.create_signal(0.0f32);
        let is_dragging = graph.create_signal(false);
        let drag_amount = graph.create_signal(0.0f32);
        let position =
            carousel_left_position(&mut graph, window_width, progress, is_dragging, drag_amount);
        Rig {
            graph,
            progress,
            is_dragging,
            drag_amount,
            position,
        }
    }

    fn settle(rig: &mut Rig) {
        for _ in 0..=(SLIDE_ANIMATION_DURATION_MS / 16 + 1) {
            rig.position.tick(&mut rig.graph, 16.0);
        }
    }

    #[test]
    fn test_page_index_cycles() {
        assert_eq!(page_index(0.0), 0);
        assert_eq!(page_index(24.9), 0);
        assert_eq!(page_index(25.0), 1);
        assert_eq!(page_index(30.0), 1);
        assert_eq!(page_index(50.0), 2);
        assert_eq!(page_index(74.9), 2);
        assert_eq!(page_index(75.0), 0);
        assert_eq!(page_index(100.0), 1);
    }

    #[test]
    fn test_settles_at_zero_for_first_page() {
        let mut rig = rig(400.0);
        settle(&mut rig);
        assert_eq!(rig.position.value(&rig.graph), 0.0);
        assert!(rig.position.is_settled(&rig.graph));
    }

    #[test]
    fn test_animates_to_second_page_offset() {
        let mut rig = rig(400.0);
        rig.graph.set(rig.progress, 30.0);

        rig.position.tick(&mut rig.graph, 16.0);
        let mid = rig.position.value(&rig.graph);
        assert!(mid < 0.0 && mid > -400.0, "slide is in flight, got {mid}");

        settle(&mut rig);
        assert_eq!(rig.position.value(&rig.graph), -400.0);
    }

    #[test]
    fn test_drag_right_on_first_page_is_suppressed() {
        let mut rig = rig(400.0);
        rig.graph.set(rig.is_dragging, true);
        rig.graph.set(rig.drag_amount, 50.0);

        rig.position.tick(&mut rig.graph, 16.0);
        assert_eq!(rig.position.value(&rig.graph), 0.0);
    }

    #[test]
    fn test_drag_tracks_finger_immediately() {
        let mut rig = rig(400.0);
        rig.graph.set(rig.progress, 60.0); // page 2
        rig.graph.set(rig.is_dragging, true);
        rig.graph.set(rig.drag_amount, -20.0);

        rig.position.tick(&mut rig.graph, 16.0);
        assert_eq!(rig.position.value(&rig.graph), -820.0);

        // Still 1:1 on the next move, no easing in between
        rig.graph.set(rig.drag_amount, -35.0);
        rig.position.tick(&mut rig.graph, 16.0);
        assert_eq!(rig.position.value(&rig.graph), -835.0);
    }

    #[test]
    fn test_drag_left_on_first_page_passes_through() {
        let mut rig = rig(400.0);
        rig.graph.set(rig.is_dragging, true);
        rig.graph.set(rig.drag_amount, -60.0);

        rig.position.tick(&mut rig.graph, 16.0);
        assert_eq!(rig.position.value(&rig.graph), -60.0);
    }

    #[test]
    fn test_release_eases_from_finger_position_to_boundary() {
        let mut rig = rig(400.0);
        rig.graph.set(rig.progress, 30.0); // page 1, resting at -400
        rig.graph.set(rig.is_dragging, true);
        rig.graph.set(rig.drag_amount, -120.0);
        rig.position.tick(&mut rig.graph, 16.0);
        assert_eq!(rig.position.value(&rig.graph), -520.0);

        // Release: the slide starts from the finger position, not the boundary
        rig.graph.set(rig.is_dragging, false);
        rig.position.tick(&mut rig.graph, 0.0);
        assert_eq!(rig.position.value(&rig.graph), -520.0);

        rig.position.tick(&mut rig.graph, 16.0);
        let mid = rig.position.value(&rig.graph);
        assert!(mid > -520.0 && mid < -400.0, "easing back up, got {mid}");

        settle(&mut rig);
        assert_eq!(rig.position.value(&rig.graph), -400.0);
    }

    #[test]
    fn test_settled_slide_ignores_drag_amount() {
        let mut rig = rig(400.0);
        rig.graph.set(rig.progress, 30.0);
        // A stale drag remainder must not shift the resting position
        rig.graph.set(rig.drag_amount, 80.0);
        settle(&mut rig);
        assert_eq!(rig.position.value(&rig.graph), -400.0);
    }

    #[test]
    fn test_identical_rigs_agree() {
        let mut a = rig(400.0);
        let mut b = rig(400.0);
        for r in [&mut a, &mut b] {
            r.graph.set(r.progress, 55.0);
            r.graph.set(r.is_dragging, true);
            r.graph.set(r.drag_amount, 12.5);
            r.position.tick(&mut r.graph, 16.0);
        }
        assert_eq!(a.position.value(&a.graph), b.position.value(&b.graph));
    }
}
