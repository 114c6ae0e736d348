//! Progress bar width
//!
//! The bar fills left to right as progress moves through the flow, reaching
//! its full static width at the end of the last page.

use glissa_core::reactive::{Derived, ReactiveGraph, Signal};

use crate::constants::PROGRESS_SPAN;

/// Derived width of the progress bar, in pixels.
///
/// Equal to `static_progress_bar_width * progress / 75`, recomputed whenever
/// `progress` changes. A missing progress reading coerces to 0, so the bar
/// renders empty rather than stale.
pub fn dynamic_progress_bar_width(
    graph: &mut ReactiveGraph,
    static_progress_bar_width: f32,
    progress: Signal<f32>,
) -> Derived<f32> {
    graph.create_derived(move |g| {
        static_progress_bar_width * g.get(progress).unwrap_or(0.0) / PROGRESS_SPAN
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_follows_progress() {
        let mut graph = ReactiveGraph::new();
        let progress = graph.create_signal(0.0f32);
        let width = dynamic_progress_bar_width(&mut graph, 200.0, progress);

        assert_eq!(graph.get_derived(width), Some(0.0));

        for p in [10.0f32, 25.0, 37.5, 75.0, 100.0] {
            graph.set(progress, p);
            let expected = 200.0 * p / 75.0;
            assert_eq!(graph.get_derived(width), Some(expected));
        }
    }

    #[test]
    fn test_missing_progress_reads_as_empty() {
        let mut graph = ReactiveGraph::new();
        let progress = graph.create_signal(50.0f32);
        let width = dynamic_progress_bar_width(&mut graph, 200.0, progress);

        graph.remove_signal(progress);
        assert_eq!(graph.get_derived(width), Some(0.0));
    }

    #[test]
    fn test_same_inputs_same_width() {
        let mut graph = ReactiveGraph::new();
        let progress = graph.create_signal(40.0f32);
        let a = dynamic_progress_bar_width(&mut graph, 320.0, progress);
        let b = dynamic_progress_bar_width(&mut graph, 320.0, progress);

        assert_eq!(graph.get_derived(a), graph.get_derived(b));
    }
}
