//! Onboarding carousel animation values
//!
//! Computes the two animated style values of a three-page onboarding
//! carousel screen: the progress-bar width and the horizontal slide offset.
//! Both are derived from a shared progress value (0–100) and the drag
//! gesture state, and both are meant to be bound directly to style
//! properties by a host UI layer.
//!
//! While a drag is active the slide offset tracks the finger 1:1; on release
//! it snaps to the nearest page boundary over 300 ms with an ease-out curve.
//!
//! # Example
//!
//! ```rust
//! use glissa_onboarding::{Onboarding, OnboardingConfig};
//!
//! let mut onboarding = Onboarding::new(OnboardingConfig::new(400.0, 200.0)).unwrap();
//!
//! onboarding.set_progress(30.0); // page 1
//! for _ in 0..20 {
//!     onboarding.frame(16.0);
//! }
//! assert_eq!(onboarding.offset(), -400.0);
//! assert_eq!(onboarding.bar_width(), 200.0 * 30.0 / 75.0);
//! ```

pub mod carousel;
pub mod constants;
pub mod gesture;
pub mod onboarding;
pub mod progress_bar;

pub use carousel::{carousel_left_position, page_index, CarouselPosition};
pub use gesture::DragTracker;
pub use onboarding::{Onboarding, OnboardingConfig, OnboardingError};
pub use progress_bar::dynamic_progress_bar_width;
