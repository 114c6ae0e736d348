//! Glissa Core Runtime
//!
//! This crate provides the foundational primitives for the Glissa animation kit:
//!
//! - **Reactive Signals**: externally-owned value cells with fine-grained
//!   dependency tracking
//! - **Derived Values**: pull-based computations recomputed when their
//!   tracked inputs change
//! - **Statecharts**: flat state machines for interaction states
//!
//! # Example
//!
//! ```rust
//! use glissa_core::reactive::ReactiveGraph;
//!
//! let mut graph = ReactiveGraph::new();
//!
//! // Create a signal
//! let progress = graph.create_signal(0.0f32);
//!
//! // Create a derived value
//! let half = graph.create_derived(move |g| {
//!     g.get(progress).unwrap_or(0.0) / 2.0
//! });
//!
//! // Create an effect
//! let _effect = graph.create_effect(move |g| {
//!     let _ = g.get(progress);
//! });
//!
//! // Update the signal
//! graph.set(progress, 50.0);
//! assert_eq!(graph.get_derived(half), Some(25.0));
//! ```

pub mod fsm;
pub mod reactive;

pub use fsm::{EventId, StateId, StateMachine, Transition};
pub use reactive::{Derived, DerivedId, EffectId, ReactiveGraph, Signal, SignalId};
