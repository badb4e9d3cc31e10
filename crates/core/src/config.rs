//! Engine tuning.
//!
//! Defaults come from the constants in `packtris_types`. Fast-drop scales
//! fall rate and rotation cooldown together with the recommended tick
//! interval, so the host only has to honour [`EngineConfig::tick_interval_ms`].

use crate::types::{
    FALL_RATE, FAST_FALL_RATE, FAST_ROTATE_COOLDOWN_TICKS, FAST_TICK_MS, ROTATE_COOLDOWN_TICKS,
    TICK_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineConfig {
    /// Ticks per fall at normal speed
    pub fall_rate: u8,
    /// Ticks per fall while fast-drop is held
    pub fast_fall_rate: u8,
    /// Ticks rotation is ignored after a rotation
    pub rotate_cooldown: u8,
    /// Same, while fast-drop is held
    pub fast_rotate_cooldown: u8,
    pub tick_ms: u32,
    pub fast_tick_ms: u32,
}

impl EngineConfig {
    pub fn fall_rate(&self, fast_drop: bool) -> u8 {
        let rate = if fast_drop {
            self.fast_fall_rate
        } else {
            self.fall_rate
        };
        rate.max(1)
    }

    pub fn rotate_cooldown(&self, fast_drop: bool) -> u8 {
        if fast_drop {
            self.fast_rotate_cooldown
        } else {
            self.rotate_cooldown
        }
    }

    /// Recommended delay before the next tick
    pub fn tick_interval_ms(&self, fast_drop: bool) -> u32 {
        if fast_drop {
            self.fast_tick_ms
        } else {
            self.tick_ms
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fall_rate: FALL_RATE,
            fast_fall_rate: FAST_FALL_RATE,
            rotate_cooldown: ROTATE_COOLDOWN_TICKS,
            fast_rotate_cooldown: FAST_ROTATE_COOLDOWN_TICKS,
            tick_ms: TICK_MS,
            fast_tick_ms: FAST_TICK_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fall_rate_is_two() {
        let config = EngineConfig::default();
        assert_eq!(config.fall_rate(false), 2);
        assert_eq!(config.fall_rate(true), 1);
    }

    #[test]
    fn test_zero_fall_rate_clamped() {
        let config = EngineConfig {
            fall_rate: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.fall_rate(false), 1);
    }

    #[test]
    fn test_fast_drop_keeps_rotation_cadence() {
        let config = EngineConfig::default();
        let slow = config.rotate_cooldown(false) as u32 * config.tick_interval_ms(false);
        let fast = config.rotate_cooldown(true) as u32 * config.tick_interval_ms(true);
        assert_eq!(slow, fast);
    }
}
