//! Onboarding screen facade
//!
//! Owns the reactive graph, the shared progress signal, the drag tracker and
//! both animated values, so a host only has to forward gesture callbacks and
//! call [`Onboarding::frame`] once per frame.

use glissa_animation::TweenSpec;
use glissa_core::reactive::{Derived, ReactiveGraph, Signal};
use thiserror::Error;

use crate::carousel::{page_index, CarouselPosition};
use crate::constants::slide_spec;
use crate::gesture::DragTracker;
use crate::progress_bar::dynamic_progress_bar_width;

/// Configuration for an onboarding screen.
#[derive(Clone, Copy, Debug)]
pub struct OnboardingConfig {
    /// Width of one carousel page (the window width), in pixels.
    pub window_width: f32,
    /// Width of the fully-filled progress bar, in pixels.
    pub static_progress_bar_width: f32,
    /// Timing of the snap-to-page slide.
    pub slide: TweenSpec,
}

impl OnboardingConfig {
    pub fn new(window_width: f32, static_progress_bar_width: f32) -> Self {
        Self {
            window_width,
            static_progress_bar_width,
            slide: slide_spec(),
        }
    }

    /// Override the slide timing.
    pub fn slide(mut self, spec: TweenSpec) -> Self {
        self.slide = spec;
        self
    }

    fn validate(&self) -> Result<(), OnboardingError> {
        if !self.window_width.is_finite() || self.window_width <= 0.0 {
            return Err(OnboardingError::InvalidWindowWidth(self.window_width));
        }
        if !self.static_progress_bar_width.is_finite() || self.static_progress_bar_width <= 0.0 {
            return Err(OnboardingError::InvalidProgressBarWidth(
                self.static_progress_bar_width,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum OnboardingError {
    #[error("window width must be a positive, finite pixel size (got {0})")]
    InvalidWindowWidth(f32),
    #[error("progress bar width must be a positive, finite pixel size (got {0})")]
    InvalidProgressBarWidth(f32),
}

/// A fully-wired onboarding screen model.
pub struct Onboarding {
    graph: ReactiveGraph,
    progress: Signal<f32>,
    drag: DragTracker,
    bar_width: Derived<f32>,
    position: CarouselPosition,
}

impl Onboarding {
    pub fn new(config: OnboardingConfig) -> Result<Self, OnboardingError> {
        config.validate()?;
        tracing::debug!(
            window_width = config.window_width,
            bar_width = config.static_progress_bar_width,
            "onboarding model created"
        );

        let mut graph = ReactiveGraph::new();
        let progress = graph.create_signal(0.0f32);
        let drag = DragTracker::new(&mut graph);
        let bar_width =
            dynamic_progress_bar_width(&mut graph, config.static_progress_bar_width, progress);
        let position = CarouselPosition::new(
            &mut graph,
            config.window_width,
            progress,
            drag.is_dragging(),
            drag.drag_amount(),
            config.slide,
        );

        Ok(Self {
            graph,
            progress,
            drag,
            bar_width,
            position,
        })
    }

    /// Write the shared progress value (0–100).
    pub fn set_progress(&mut self, value: f32) {
        self.graph.set(self.progress, value);
    }

    pub fn progress(&self) -> f32 {
        self.graph.get(self.progress).unwrap_or(0.0)
    }

    /// The page the carousel currently rests on (or is snapping toward).
    pub fn page_index(&self) -> i32 {
        page_index(self.progress())
    }

    pub fn begin_drag(&mut self) {
        self.drag.begin(&mut self.graph);
    }

    pub fn drag_by(&mut self, dx: f32) {
        self.drag.update(&mut self.graph, dx);
    }

    pub fn end_drag(&mut self) {
        self.drag.end(&mut self.graph);
    }

    /// Advance all animated values by `dt_ms`.
    pub fn frame(&mut self, dt_ms: f32) {
        self.position.tick(&mut self.graph, dt_ms);
    }

    /// Current progress-bar width, in pixels.
    pub fn bar_width(&self) -> f32 {
        self.graph.get_derived(self.bar_width).unwrap_or(0.0)
    }

    /// Current horizontal slide offset, in pixels.
    pub fn offset(&self) -> f32 {
        self.position.value(&self.graph)
    }

    /// Whether the carousel rests on a page boundary.
    pub fn is_settled(&self) -> bool {
        self.position.is_settled(&self.graph)
    }
}
