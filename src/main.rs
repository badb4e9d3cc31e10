//! Terminal runner (default binary).
//!
//! Drives the engine at its own tick cadence: key events are latched while
//! waiting for the next tick deadline, then the engine polls them once.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use packtris::core::{EntropySource, GameEngine};
use packtris::input::{is_restart, should_quit, KeyLatch};
use packtris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Seeds from the wall clock; the only entropy a terminal reliably has.
struct ClockEntropy;

impl EntropySource for ClockEntropy {
    fn seed(&mut self) -> u32 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(1)
    }
}

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut entropy = ClockEntropy;
    let mut engine = GameEngine::from_entropy(&mut entropy);

    let view = GameView::default();
    let mut latch = KeyLatch::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut viewport = current_viewport();

    let mut last_tick = Instant::now();
    let mut last_poll = Instant::now();

    loop {
        // Render.
        view.render_into(&engine, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let tick_ms = engine.tick_interval_ms(latch.fast_drop());
        let tick_duration = Duration::from_millis(tick_ms as u64);
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if is_restart(key) {
                            engine.reset(entropy.seed());
                            latch.clear();
                            last_tick = Instant::now();
                            continue;
                        }
                        latch.handle_key_press(key.code);
                    }
                    KeyEventKind::Release => latch.handle_key_release(key.code),
                },
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                }
                _ => {}
            }
        }

        let elapsed = last_poll.elapsed();
        last_poll = Instant::now();
        latch.advance(elapsed.as_millis().min(u32::MAX as u128) as u32);

        // Tick. After game over the engine stays put until restart.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if !engine.is_game_over() {
                engine.run_tick(&mut latch);
            }
        }
    }
}

fn current_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}
