//! Onboarding Carousel Demo
//!
//! Drives the onboarding model headlessly through a full session:
//! - Paging by progress updates (animated page snaps)
//! - A drag that follows the finger 1:1
//! - The suppressed right-bounce on the first page
//! - Release easing back to the page boundary
//!
//! Run with: cargo run -p glissa_onboarding --example onboarding_demo

use glissa_onboarding::{Onboarding, OnboardingConfig};

const FRAME_MS: f32 = 16.0;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut onboarding = Onboarding::new(OnboardingConfig::new(400.0, 200.0))
        .expect("valid demo configuration");

    tracing::info!("-- page snaps --");
    for progress in [30.0, 60.0, 10.0] {
        onboarding.set_progress(progress);
        run_until_settled(&mut onboarding);
    }

    tracing::info!("-- drag right on the first page (suppressed) --");
    onboarding.set_progress(0.0);
    run_until_settled(&mut onboarding);
    onboarding.begin_drag();
    onboarding.drag_by(50.0);
    frame(&mut onboarding);
    onboarding.end_drag();
    run_until_settled(&mut onboarding);

    tracing::info!("-- swipe to the next page --");
    onboarding.begin_drag();
    for dx in [-40.0, -110.0, -180.0] {
        onboarding.drag_by(dx);
        frame(&mut onboarding);
    }
    onboarding.set_progress(25.0);
    onboarding.end_drag();
    run_until_settled(&mut onboarding);
}

fn frame(onboarding: &mut Onboarding) {
    onboarding.frame(FRAME_MS);
    tracing::info!(
        page = onboarding.page_index(),
        offset = onboarding.offset(),
        bar_width = onboarding.bar_width(),
        "frame"
    );
}

fn run_until_settled(onboarding: &mut Onboarding) {
    loop {
        frame(onboarding);
        if onboarding.is_settled() {
            break;
        }
    }
    tracing::info!(
        page = onboarding.page_index(),
        offset = onboarding.offset(),
        "settled"
    );
}
