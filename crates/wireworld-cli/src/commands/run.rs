//! `ww run`: timer-driven playback.
//!
//! Frames go to stdout. The loop stops after the requested number of
//! generations, on Ctrl-C, or, with `--until-stable`, after the first
//! generation that leaves every cell unchanged.

use std::fmt;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};
use wireworld_automaton::{Automaton, WireWorld};

use super::{open_board, save_board};
use crate::config::Config;
use crate::render::{render_view, RenderStyle, CLEAR_SCREEN};
use crate::viewport::Viewport;

/// Options for `ww run`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop after this many generations.
    pub generations: Option<u64>,
    /// Overrides the configured frame rate.
    pub fps: Option<f64>,
    pub x: usize,
    pub y: usize,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub until_stable: bool,
    /// Write the final board back to the file.
    pub save: bool,
    pub plain: bool,
}

/// Why playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    GenerationLimit,
    Stable,
    Interrupted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::GenerationLimit => write!(f, "generation limit reached"),
            StopReason::Stable => write!(f, "board is stable"),
            StopReason::Interrupted => write!(f, "interrupted"),
        }
    }
}

pub async fn execute(config: &Config, path: &Path, options: &RunOptions) -> Result<()> {
    let mut world = open_board(path)?;

    let viewport = Viewport::new(
        options.x,
        options.y,
        options.width.unwrap_or(config.view_width),
        options.height.unwrap_or(config.view_height),
    );
    let grown = viewport
        .fit(&mut world)
        .context("Cannot grow board to fit the view")?;
    if !grown.is_zero() {
        debug!(right = grown.right, bottom = grown.bottom, "board_grown_to_view");
    }

    let style = RenderStyle::select(options.plain, config.color);
    let fps = options.fps.unwrap_or(config.fps);
    let mut ticker = pacing(fps);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    draw_frame(&world, &viewport, style)?;

    let mut completed = 0u64;
    let reason = loop {
        if options.generations.is_some_and(|limit| completed >= limit) {
            break StopReason::GenerationLimit;
        }

        tokio::select! {
            _ = &mut ctrl_c => break StopReason::Interrupted,
            _ = next_tick(&mut ticker) => {}
        }

        let result = world.advance();
        completed += 1;
        draw_frame(&world, &viewport, style)?;

        if options.until_stable && !result.had_changes() {
            break StopReason::Stable;
        }
    };

    info!(generations = completed, reason = %reason, "Playback stopped");
    println!("⏹  Stopped after {} generation(s): {}", completed, reason);

    if options.save {
        save_board(&world, path)?;
        println!("💾 Saved to {}", path.display());
    }
    Ok(())
}

/// Frame timer for `fps`, or `None` to run unpaced.
fn pacing(fps: f64) -> Option<Interval> {
    if !(fps.is_finite() && fps > 0.0) {
        return None;
    }
    let period = Duration::from_secs_f64(1.0 / fps);
    if period.is_zero() {
        return None;
    }
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    Some(ticker)
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => tokio::task::yield_now().await,
    }
}

fn draw_frame(world: &WireWorld, viewport: &Viewport, style: RenderStyle) -> Result<()> {
    let view = world.read(&viewport.request())?;
    let (width, height) = world.size();

    let mut frame = String::new();
    if style == RenderStyle::Color {
        frame.push_str(CLEAR_SCREEN);
    }
    frame.push_str(&format!(
        "Generation {}  board {}x{}  view ({}, {})\n",
        world.generation(),
        width,
        height,
        viewport.x,
        viewport.y
    ));
    frame.push_str(&render_view(&view, world.color_table(), style));

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(frame.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacing_disabled_for_non_positive_fps() {
        assert!(pacing(0.0).is_none());
        assert!(pacing(-3.0).is_none());
        assert!(pacing(f64::NAN).is_none());
    }

    #[tokio::test]
    async fn test_pacing_period_matches_fps() {
        let ticker = pacing(4.0).unwrap();
        assert_eq!(ticker.period(), Duration::from_millis(250));
        assert_eq!(ticker.missed_tick_behavior(), MissedTickBehavior::Skip);
    }

    #[test]
    fn test_stop_reason_display() {
        assert_eq!(StopReason::Stable.to_string(), "board is stable");
    }
}
