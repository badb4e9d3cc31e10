//! Latches terminal key events into per-tick input samples.
//!
//! Shift and rotate presses are edge events: each press is remembered until
//! the next poll, then forgotten. Fast-drop is level-triggered: it stays on
//! while the key is held. Terminals that never report key release get a
//! timeout instead, refreshed by the terminal's own auto-repeat.

use crossterm::event::KeyCode;

use packtris_core::InputSource;

use crate::map::{map_key, Signal};
use crate::types::InputState;

// Long enough to bridge the gap before a terminal's auto-repeat kicks in.
const DEFAULT_FAST_DROP_TIMEOUT_MS: u32 = 300;

#[derive(Debug, Clone)]
pub struct KeyLatch {
    pending: InputState,
    fast_drop_held: bool,
    fast_drop_timer_ms: u32,
    fast_drop_timeout_ms: u32,
}

impl KeyLatch {
    pub fn new() -> Self {
        Self {
            pending: InputState::IDLE,
            fast_drop_held: false,
            fast_drop_timer_ms: 0,
            fast_drop_timeout_ms: DEFAULT_FAST_DROP_TIMEOUT_MS,
        }
    }

    pub fn with_fast_drop_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.fast_drop_timeout_ms = timeout_ms;
        self
    }

    pub fn fast_drop_timeout_ms(&self) -> u32 {
        self.fast_drop_timeout_ms
    }

    /// Record a key press (or terminal auto-repeat)
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Signal> {
        let signal = map_key(code)?;
        match signal {
            Signal::ShiftLeft => self.pending.shift_left = true,
            Signal::ShiftRight => self.pending.shift_right = true,
            Signal::Rotate => self.pending.rotate = true,
            Signal::FastDrop => {
                self.fast_drop_held = true;
                self.fast_drop_timer_ms = self.fast_drop_timeout_ms;
            }
        }
        Some(signal)
    }

    /// Record a key release, on terminals that report one
    pub fn handle_key_release(&mut self, code: KeyCode) {
        if map_key(code) == Some(Signal::FastDrop) {
            self.fast_drop_held = false;
            self.fast_drop_timer_ms = 0;
        }
    }

    /// Let wall-clock time pass; expires a fast-drop nobody refreshed
    pub fn advance(&mut self, elapsed_ms: u32) {
        if !self.fast_drop_held {
            return;
        }
        self.fast_drop_timer_ms = self.fast_drop_timer_ms.saturating_sub(elapsed_ms);
        if self.fast_drop_timer_ms == 0 {
            self.fast_drop_held = false;
        }
    }

    /// Is fast-drop currently held
    pub fn fast_drop(&self) -> bool {
        self.fast_drop_held
    }

    /// Forget everything, e.g. on restart
    pub fn clear(&mut self) {
        *self = Self::new().with_fast_drop_timeout_ms(self.fast_drop_timeout_ms);
    }
}

impl Default for KeyLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for KeyLatch {
    fn poll(&mut self) -> InputState {
        let mut sample = std::mem::take(&mut self.pending);
        sample.fast_drop = self.fast_drop_held;
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_latched_until_poll() {
        let mut latch = KeyLatch::new();
        latch.handle_key_press(KeyCode::Left);
        latch.handle_key_press(KeyCode::Up);

        let sample = latch.poll();
        assert!(sample.shift_left);
        assert!(sample.rotate);
        assert!(!sample.shift_right);

        // Edge signals are consumed by the poll
        assert_eq!(latch.poll(), InputState::IDLE);
    }

    #[test]
    fn test_unmapped_key_ignored() {
        let mut latch = KeyLatch::new();
        assert_eq!(latch.handle_key_press(KeyCode::Char('x')), None);
        assert_eq!(latch.poll(), InputState::IDLE);
    }

    #[test]
    fn test_fast_drop_held_across_polls() {
        let mut latch = KeyLatch::new();
        latch.handle_key_press(KeyCode::Down);
        assert!(latch.poll().fast_drop);
        assert!(latch.poll().fast_drop);

        latch.handle_key_release(KeyCode::Down);
        assert!(!latch.poll().fast_drop);
    }

    #[test]
    fn test_fast_drop_times_out_without_release() {
        let mut latch = KeyLatch::new().with_fast_drop_timeout_ms(100);
        latch.handle_key_press(KeyCode::Char('s'));

        latch.advance(60);
        assert!(latch.fast_drop());

        // Auto-repeat refreshes the timer
        latch.handle_key_press(KeyCode::Char('s'));
        latch.advance(60);
        assert!(latch.fast_drop());

        latch.advance(60);
        assert!(!latch.fast_drop());
        assert!(!latch.poll().fast_drop);
    }

    #[test]
    fn test_clear_keeps_timeout() {
        let mut latch = KeyLatch::new().with_fast_drop_timeout_ms(42);
        latch.handle_key_press(KeyCode::Down);
        latch.handle_key_press(KeyCode::Right);
        latch.clear();
        assert_eq!(latch.poll(), InputState::IDLE);
        assert_eq!(latch.fast_drop_timeout_ms(), 42);
    }
}
