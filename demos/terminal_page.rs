//! Terminal Page - A long page scrolled with the mouse wheel
//!
//! Each terminal row stands for 20 units of page. The wheel scrolls the page,
//! and every mounted engine is printed with the style it would hand a renderer:
//! - Nav hides while scrolling down past 100 units, shows again going up
//! - Section headings reveal as they enter the viewport
//! - A text reveal, a clip reveal and two parallax images further down
//!
//! Set `REDUCED=1` to mount everything with reduced motion.
//! Logs go to stderr: `RUST_LOG=spark_motion=debug cargo run --example terminal_page 2>motion.log`
//!
//! Press 'q' or Esc to quit.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use spark_motion::{
    ElementBounds, FixedPreference, InteractionMode, MotionStyle, NavController, Result, Reveal,
    RevealProps, ScrollInteraction, Surface,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ROW_UNITS: f64 = 20.0;
const WHEEL_STEP: f64 = 60.0;
const PAGE_HEIGHT: f64 = 6000.0;
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .init();

    let reduced = std::env::var("REDUCED").is_ok_and(|v| v == "1");
    let (_, rows) = terminal::size()?;
    let surface = Surface::new(rows as f64 * ROW_UNITS, FixedPreference(reduced));

    let mut nav = NavController::mount(&surface);
    let mut reveals = Vec::new();
    for (i, top) in [900.0, 1500.0, 2100.0].into_iter().enumerate() {
        let props = RevealProps::delayed(i as f64 * 0.1);
        reveals.push((format!("section {}", i + 1), Reveal::mount(&surface, i, ElementBounds::new(top, 200.0), props)?));
    }

    let mut interactions = vec![
        ("quote", ScrollInteraction::mount(&surface, 10, ElementBounds::new(2800.0, 120.0), InteractionMode::TextReveal)?),
        ("banner", ScrollInteraction::mount(&surface, 11, ElementBounds::new(3300.0, 400.0), InteractionMode::ClipReveal)?),
        ("photo", ScrollInteraction::mount_named(&surface, 12, ElementBounds::new(4000.0, 500.0), "parallax")?),
        ("backdrop", ScrollInteraction::mount(&surface, 13, ElementBounds::new(4800.0, 600.0), InteractionMode::parallax(1.2)?)?),
        ("ticker", ScrollInteraction::mount(&surface, 14, ElementBounds::new(5400.0, 80.0), InteractionMode::Marquee)?),
    ];

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;

    let started = Instant::now();
    let mut offset = 0.0;
    let result = (|| -> Result<()> {
        loop {
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) => return Ok(()),
                    Event::Mouse(mouse) => {
                        let delta = match mouse.kind {
                            MouseEventKind::ScrollDown => WHEEL_STEP,
                            MouseEventKind::ScrollUp => -WHEEL_STEP,
                            _ => continue,
                        };
                        offset = f64::clamp(offset + delta, 0.0, PAGE_HEIGHT);
                        surface.report_scroll(offset);
                    }
                    Event::Resize(_, rows) => surface.resize(rows as f64 * ROW_UNITS),
                    _ => {}
                }
            }

            let now = started.elapsed().as_secs_f64();
            surface.frame(now);

            queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
            let mut lines = vec![
                format!(
                    "offset {:>6.0} / {:.0}   viewport {:.0}   reduced motion: {}   (q to quit)",
                    offset,
                    PAGE_HEIGHT,
                    surface.viewport_height(),
                    reduced
                ),
                format!(
                    "{:<10} {:<15} translateY({:.1}%)",
                    "nav",
                    format!("{:?}", nav.visibility()),
                    nav.translate_percent_at(now)
                ),
                String::new(),
            ];
            for (name, reveal) in &reveals {
                let state = format!("{:?}", reveal.state());
                lines.push(format!("{:<10} {:<15} {}", name, state, describe(&reveal.style_at(now))));
            }
            for (name, interaction) in &interactions {
                let mode = interaction.mode().to_string();
                let mut line = format!("{:<10} {:<15} {}", name, mode, describe(&interaction.style_at(now)));
                if let Some(frame) = interaction.parallax_frame() {
                    line.push_str(&format!("  progress {:.2} drift {:>6.1}", frame.progress, frame.local_offset));
                }
                lines.push(line);
            }
            for (row, line) in lines.iter().enumerate() {
                queue!(stdout, MoveTo(0, row as u16), Print(line))?;
            }
            stdout.flush()?;

            std::thread::sleep(FRAME);
        }
    })();

    execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    nav.unmount();
    for (_, reveal) in &mut reveals {
        reveal.unmount();
    }
    for (_, interaction) in &mut interactions {
        interaction.unmount();
    }
    tracing::info!(remaining = surface.active_subscriptions(), "demo finished");

    result
}

fn describe(style: &MotionStyle) -> String {
    let mut out = format!("opacity {:.2}  {}", style.opacity, style.transform());
    if let Some(clip) = &style.clip {
        out.push_str(&format!("  clip {}", clip));
    }
    out
}
