//! Page lifecycle test: every engine mounted on one surface.
//!
//! Drives a page through a scroll session the way a host would:
//! - Raw scroll events, one frame tick at a time
//! - One-shot watchers detaching as they fire
//! - Unmounting everything, leaving no subscriptions behind
//!
//! Run with: cargo test --test page_lifecycle

use std::cell::Cell;
use std::rc::Rc;

use spark_motion::{
    ClipPath, ElementBounds, FixedPreference, InteractionMode, MotionConfig, MotionStyle, NavController,
    NavVisibility, Reveal, RevealProps, RevealState, ScrollInteraction, Surface,
};

// =============================================================================
// PAGE
// =============================================================================

struct Page {
    nav: NavController,
    heading: Reveal,
    quote: ScrollInteraction,
    photo: ScrollInteraction,
    ticker: ScrollInteraction,
}

impl Page {
    fn mount(surface: &Surface) -> Page {
        Page {
            nav: NavController::mount(surface),
            heading: Reveal::mount(surface, 1, ElementBounds::new(900.0, 200.0), RevealProps::default()).unwrap(),
            quote: ScrollInteraction::mount(surface, 2, ElementBounds::new(2000.0, 100.0), InteractionMode::TextReveal).unwrap(),
            photo: ScrollInteraction::mount(surface, 3, ElementBounds::new(3000.0, 500.0), InteractionMode::parallax(0.5).unwrap()).unwrap(),
            ticker: ScrollInteraction::mount(surface, 4, ElementBounds::new(3600.0, 80.0), InteractionMode::Marquee).unwrap(),
        }
    }

    fn unmount(&mut self) {
        self.nav.unmount();
        self.heading.unmount();
        self.quote.unmount();
        self.photo.unmount();
        self.ticker.unmount();
    }
}

fn scroll(surface: &Surface, offset: f64, time: f64) {
    surface.report_scroll(offset);
    surface.frame(time);
}

// =============================================================================
// TESTS
// =============================================================================

#[test]
fn test_scroll_session() {
    let surface = Surface::new(800.0, FixedPreference(false));
    let mut page = Page::mount(&surface);

    // nav + parallax on telemetry, heading + quote on the watcher
    assert_eq!(surface.active_subscriptions(), 4);
    assert!(page.ticker.is_pass_through());

    surface.frame(0.0);
    assert_eq!(page.heading.state(), RevealState::Hidden);
    assert_eq!(page.nav.visibility(), NavVisibility::Shown);

    // Heading enters the shrunk window (200, 950)
    scroll(&surface, 200.0, 1.0);
    assert_eq!(page.heading.state(), RevealState::Visible);
    assert_eq!(page.nav.visibility(), NavVisibility::Hidden);
    assert_eq!(surface.active_subscriptions(), 3);

    // Quote enters
    scroll(&surface, 1500.0, 2.0);
    assert!(page.quote.is_revealed());
    assert_eq!(surface.active_subscriptions(), 2);
    assert_eq!(page.photo.parallax_frame().unwrap().progress, 0.0);

    // Photo range is (2200, 3500)
    scroll(&surface, 2600.0, 3.0);
    let frame = page.photo.parallax_frame().unwrap();
    assert!(frame.progress > 0.0 && frame.progress < 1.0);

    // Everything settles
    assert_eq!(page.heading.style_at(10.0), MotionStyle::IDENTITY);
    assert!(page.quote.is_settled(10.0));
    let quote = page.quote.style_at(10.0);
    assert_eq!(quote.translate_y, 0.0);
    assert_eq!(quote.clip, Some(ClipPath::bottom_up(0.0)));
    assert_eq!(page.nav.translate_percent_at(10.0), -100.0);

    // Scrolling back up shows the nav, one-shots stay revealed
    scroll(&surface, 100.0, 11.0);
    assert_eq!(page.nav.visibility(), NavVisibility::Shown);
    assert_eq!(page.heading.state(), RevealState::Visible);
    assert!(page.quote.is_revealed());

    page.unmount();
    assert_eq!(surface.active_subscriptions(), 0);
}

#[test]
fn test_many_mount_cycles_leave_nothing_behind() {
    let surface = Surface::new(800.0, FixedPreference(false));

    for cycle in 0..100 {
        let page = Page::mount(&surface);
        scroll(&surface, (cycle % 7) as f64 * 300.0, cycle as f64);
        drop(page);
        assert_eq!(surface.active_subscriptions(), 0);
    }
}

#[test]
fn test_reduced_motion_page_is_static() {
    let surface = Surface::new(800.0, FixedPreference(true));
    let page = Page::mount(&surface);

    assert_eq!(surface.active_subscriptions(), 0);

    scroll(&surface, 2500.0, 0.0);
    assert_eq!(page.nav.visibility(), NavVisibility::Shown);
    assert_eq!(page.heading.style_at(0.0), MotionStyle::IDENTITY);
    assert_eq!(page.quote.style_at(0.0), MotionStyle::IDENTITY);
    assert_eq!(page.photo.style_at(0.0), MotionStyle::IDENTITY);
    assert!(page.photo.is_pass_through());
}

#[test]
fn test_preference_checked_per_mount() {
    let reduced = Rc::new(Cell::new(false));
    let reduced_clone = reduced.clone();
    let surface = Surface::new(800.0, move || reduced_clone.get());

    let animated = Reveal::mount(&surface, 1, ElementBounds::new(900.0, 200.0), RevealProps::default()).unwrap();
    reduced.set(true);
    let settled = Reveal::mount(&surface, 2, ElementBounds::new(900.0, 200.0), RevealProps::default()).unwrap();

    assert!(animated.is_observing());
    assert_eq!(animated.state(), RevealState::Hidden);
    assert!(!settled.is_observing());
    assert_eq!(settled.state(), RevealState::Visible);
}

#[test]
fn test_config_from_toml() {
    let config = MotionConfig::from_toml_str(
        r#"
        [nav]
        threshold = 1000.0

        [reveal]
        margin_end = "0px"
        "#,
    )
    .unwrap();
    let surface = Surface::with_config(800.0, FixedPreference(false), config).unwrap();
    let nav = NavController::mount(&surface);
    let heading = Reveal::mount(&surface, 1, ElementBounds::new(820.0, 100.0), RevealProps::default()).unwrap();

    // Window (20, 820): the heading's top edge is not inside yet
    scroll(&surface, 20.0, 0.0);
    assert_eq!(heading.state(), RevealState::Hidden);

    scroll(&surface, 500.0, 1.0);
    assert_eq!(nav.visibility(), NavVisibility::Shown);
    assert_eq!(heading.state(), RevealState::Visible);

    scroll(&surface, 1200.0, 2.0);
    assert_eq!(nav.visibility(), NavVisibility::Hidden);
}

#[test]
fn test_observers_unavailable() {
    let surface = Surface::without_observers(800.0, FixedPreference(false));
    let page = Page::mount(&surface);

    assert_eq!(surface.active_subscriptions(), 0);
    assert_eq!(page.heading.state(), RevealState::Visible);
    assert!(page.quote.is_pass_through());
    assert!(page.photo.is_pass_through());
    assert_eq!(page.nav.visibility(), NavVisibility::Shown);
}
