//! Glissa Animation System
//!
//! Duration-based tweens with bezier easing, plus signal-backed animated
//! values for driving a reactive graph one frame at a time.
//!
//! # Features
//!
//! - **Easing**: CSS-spec cubic bezier curves with exact endpoints
//! - **Tweens**: timed start→target interpolation
//! - **Interruptible**: retargeting inherits the current value, never jumps
//! - **Signal-backed**: `AnimatedValue` publishes every frame through a
//!   [`glissa_core::reactive::ReactiveGraph`] signal

pub mod animated;
pub mod easing;
pub mod tween;

pub use animated::AnimatedValue;
pub use easing::Easing;
pub use tween::{Tween, TweenSpec};
