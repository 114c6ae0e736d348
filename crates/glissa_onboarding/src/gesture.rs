//! Drag gesture state
//!
//! Owns the `is_dragging` / `drag_amount` signals the carousel reads, and a
//! two-state chart (Settled <-> Dragging) so out-of-order gesture callbacks
//! cannot corrupt the flags: a second begin while dragging, or an end while
//! settled, is ignored.

use glissa_core::fsm::{EventId, StateId, StateMachine, Transition};
use glissa_core::reactive::{ReactiveGraph, Signal};

/// Resting between gestures.
pub const SETTLED: StateId = 0;
/// A horizontal drag is in progress.
pub const DRAGGING: StateId = 1;

const DRAG_START: EventId = 1;
const DRAG_END: EventId = 2;

/// Tracks one horizontal drag gesture and publishes it as signals.
pub struct DragTracker {
    fsm: StateMachine,
    is_dragging: Signal<bool>,
    drag_amount: Signal<f32>,
}

impl DragTracker {
    pub fn new(graph: &mut ReactiveGraph) -> Self {
        let is_dragging = graph.create_signal(false);
        let drag_amount = graph.create_signal(0.0f32);
        let fsm = StateMachine::new(
            SETTLED,
            vec![
                Transition::new(SETTLED, DRAG_START, DRAGGING),
                Transition::new(DRAGGING, DRAG_END, SETTLED),
            ],
        );
        Self {
            fsm,
            is_dragging,
            drag_amount,
        }
    }

    /// The dragging flag read by the carousel.
    pub fn is_dragging(&self) -> Signal<bool> {
        self.is_dragging
    }

    /// The horizontal finger offset read by the carousel, in pixels.
    pub fn drag_amount(&self) -> Signal<f32> {
        self.drag_amount
    }

    /// Whether a drag is currently active.
    pub fn is_active(&self) -> bool {
        self.fsm.is_in(DRAGGING)
    }

    /// A finger went down and started moving horizontally.
    pub fn begin(&mut self, graph: &mut ReactiveGraph) {
        if !self.fsm.can_send(DRAG_START) {
            return;
        }
        self.fsm.send(DRAG_START);
        graph.batch(|g| {
            g.set(self.is_dragging, true);
            g.set(self.drag_amount, 0.0);
        });
    }

    /// The finger moved; `dx` is the offset from where the drag began.
    pub fn update(&mut self, graph: &mut ReactiveGraph, dx: f32) {
        if !self.fsm.is_in(DRAGGING) {
            return;
        }
        graph.set(self.drag_amount, dx);
    }

    /// The finger lifted; the drag amount resets so a stale remainder can
    /// never leak into the next gesture.
    pub fn end(&mut self, graph: &mut ReactiveGraph) {
        if !self.fsm.can_send(DRAG_END) {
            return;
        }
        self.fsm.send(DRAG_END);
        graph.batch(|g| {
            g.set(self.is_dragging, false);
            g.set(self.drag_amount, 0.0);
        });
    }
}
