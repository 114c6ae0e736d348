//! Carousel tuning constants
//!
//! Shared constants for the onboarding carousel. Tuning should happen here
//! so the slide, the progress bar and their tests stay consistent.

use glissa_animation::{Easing, TweenSpec};

/// Duration of the snap-to-page slide after a drag releases, in milliseconds.
pub const SLIDE_ANIMATION_DURATION_MS: u32 = 300;

/// Number of pages in the onboarding flow.
pub const TOTAL_PAGES: u32 = 3;

/// Progress units spanned by one page.
pub const PAGE_SIZE: f32 = 25.0;

/// Progress units spanned by the whole flow (full progress bar).
pub const PROGRESS_SPAN: f32 = PAGE_SIZE * TOTAL_PAGES as f32;

/// The page-snap curve: ease-out, decelerating into the page boundary.
pub const SLIDE_EASING: Easing = Easing::CubicBezier(0.0, 0.0, 0.58, 1.0);

/// Default timing for the page-snap slide.
pub fn slide_spec() -> TweenSpec {
    TweenSpec::new(SLIDE_ANIMATION_DURATION_MS, SLIDE_EASING)
}
