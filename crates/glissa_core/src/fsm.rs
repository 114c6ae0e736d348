//! Interaction statecharts
//!
//! Flat state machines for interaction states (settled/dragging, and
//! whatever else a host UI needs). Transitions carry optional guards and
//! actions; states carry entry/exit callbacks. Events with no matching
//! transition from the current state are ignored.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

/// A guard function that determines if a transition should occur
pub type Guard = Box<dyn Fn() -> bool + Send>;

/// An action function executed during transitions
pub type Action = Box<dyn FnMut() + Send>;

/// A transition in the state machine
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
    pub guard: Option<Guard>,
    pub actions: SmallVec<[Action; 2]>,
}

impl Transition {
    /// Create a simple transition without guard or actions
    pub fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
            guard: None,
            actions: SmallVec::new(),
        }
    }

    /// Add a guard condition
    pub fn with_guard<F: Fn() -> bool + Send + 'static>(mut self, guard: F) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Add an action to execute during transition
    pub fn with_action<F: FnMut() + Send + 'static>(mut self, action: F) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    fn matches(&self, from: StateId, event: EventId) -> bool {
        self.from_state == from
            && self.event == event
            && self.guard.as_ref().map_or(true, |guard| guard())
    }
}

/// A flat state machine instance
pub struct StateMachine {
    current_state: StateId,
    transitions: Vec<Transition>,
    entry_callbacks: FxHashMap<StateId, Vec<Action>>,
    exit_callbacks: FxHashMap<StateId, Vec<Action>>,
}

impl StateMachine {
    /// Create a state machine with an initial state and transition table
    pub fn new(initial_state: StateId, transitions: Vec<Transition>) -> Self {
        Self {
            current_state: initial_state,
            transitions,
            entry_callbacks: FxHashMap::default(),
            exit_callbacks: FxHashMap::default(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    /// Check if the machine is in a specific state
    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        let current = self.current_state;
        self.transitions.iter().any(|t| t.matches(current, event))
    }

    /// Send an event, returning the (possibly unchanged) resulting state.
    ///
    /// Exit callbacks of the old state run first, then the transition's own
    /// actions, then entry callbacks of the new state.
    pub fn send(&mut self, event: EventId) -> StateId {
        let current = self.current_state;
        let Some(idx) = self
            .transitions
            .iter()
            .position(|t| t.matches(current, event))
        else {
            return current;
        };
        let to_state = self.transitions[idx].to_state;
        tracing::trace!(from = current, event, to = to_state, "fsm transition");

        if let Some(callbacks) = self.exit_callbacks.get_mut(&current) {
            for callback in callbacks.iter_mut() {
                callback();
            }
        }
        for action in self.transitions[idx].actions.iter_mut() {
            action();
        }
        self.current_state = to_state;
        if let Some(callbacks) = self.entry_callbacks.get_mut(&to_state) {
            for callback in callbacks.iter_mut() {
                callback();
            }
        }
        to_state
    }

    /// Register an entry callback for a state
    pub fn on_enter<F: FnMut() + Send + 'static>(&mut self, state: StateId, callback: F) {
        self.entry_callbacks
            .entry(state)
            .or_default()
            .push(Box::new(callback));
    }

    /// Register an exit callback for a state
    pub fn on_exit<F: FnMut() + Send + 'static>(&mut self, state: StateId, callback: F) {
        self.exit_callbacks
            .entry(state)
            .or_default()
            .push(Box::new(callback));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const SETTLED: StateId = 0;
    const DRAGGING: StateId = 1;

    const DRAG_START: EventId = 1;
    const DRAG_END: EventId = 2;

    fn drag_machine() -> StateMachine {
        StateMachine::new(
            SETTLED,
            vec![
                Transition::new(SETTLED, DRAG_START, DRAGGING),
                Transition::new(DRAGGING, DRAG_END, SETTLED),
            ],
        )
    }

    #[test]
    fn test_transitions() {
        let mut fsm = drag_machine();
        assert_eq!(fsm.current_state(), SETTLED);

        fsm.send(DRAG_START);
        assert!(fsm.is_in(DRAGGING));

        fsm.send(DRAG_END);
        assert!(fsm.is_in(SETTLED));
    }

    #[test]
    fn test_unmatched_event_is_ignored() {
        let mut fsm = drag_machine();

        // DRAG_END has no transition out of SETTLED
        assert!(!fsm.can_send(DRAG_END));
        assert_eq!(fsm.send(DRAG_END), SETTLED);

        fsm.send(DRAG_START);
        // A second DRAG_START while dragging is a no-op
        assert_eq!(fsm.send(DRAG_START), DRAGGING);
    }

    #[test]
    fn test_guard_blocks_transition() {
        let enabled = Arc::new(Mutex::new(false));
        let enabled_clone = enabled.clone();
        let mut fsm = StateMachine::new(
            SETTLED,
            vec![Transition::new(SETTLED, DRAG_START, DRAGGING)
                .with_guard(move || *enabled_clone.lock().unwrap())],
        );

        fsm.send(DRAG_START);
        assert!(fsm.is_in(SETTLED));

        *enabled.lock().unwrap() = true;
        fsm.send(DRAG_START);
        assert!(fsm.is_in(DRAGGING));
    }

    #[test]
    fn test_entry_exit_and_transition_actions() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut fsm = drag_machine();

        let log_enter = log.clone();
        fsm.on_enter(DRAGGING, move || log_enter.lock().unwrap().push("enter"));
        let log_exit = log.clone();
        fsm.on_exit(DRAGGING, move || log_exit.lock().unwrap().push("exit"));

        fsm.send(DRAG_START);
        fsm.send(DRAG_END);
        assert_eq!(*log.lock().unwrap(), vec!["enter", "exit"]);
    }
}
