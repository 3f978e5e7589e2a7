//! Collectibles: coins and power-ups
//!
//! Both are static boxes for collision purposes. Their animation state is
//! carried for the renderer only.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::body::Rect;
use super::player::PowerUpKind;
use crate::consts::*;

/// Coin spin rate (radians/second)
const COIN_SPIN_RATE: f32 = 4.0;
/// Power-up blink period (seconds); dimmed for the second half
const POWERUP_BLINK_PERIOD: f32 = 0.5;
/// Power-up float oscillation rate and amplitude
const POWERUP_FLOAT_RATE: f32 = 4.0;
const POWERUP_FLOAT_AMPLITUDE: f32 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub rect: Rect,
    pub value: u32,
    /// Spin angle in [0, 2π), render only
    pub spin: f32,
}

impl Coin {
    pub fn new(x: f32, y: f32, rng: &mut impl Rng) -> Self {
        Self {
            rect: Rect::new(x, y, COIN_SIZE, COIN_SIZE),
            value: COIN_VALUE,
            spin: rng.random_range(0.0..TAU),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.spin += dt * COIN_SPIN_RATE;
        if self.spin > TAU {
            self.spin -= TAU;
        }
    }

    /// Vertical squash factor for the spin effect (0..=1)
    pub fn squash(&self) -> f32 {
        self.spin.cos().abs()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    blink_timer: f32,
    float_timer: f32,
    /// Vertical draw offset, render only
    pub float_offset: f32,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind) -> Self {
        Self {
            rect: Rect::new(x, y, POWERUP_SIZE, POWERUP_SIZE),
            kind,
            blink_timer: 0.0,
            float_timer: 0.0,
            float_offset: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.blink_timer += dt;
        if self.blink_timer > POWERUP_BLINK_PERIOD {
            self.blink_timer = 0.0;
        }

        self.float_timer += dt;
        self.float_offset = (self.float_timer * POWERUP_FLOAT_RATE).sin() * POWERUP_FLOAT_AMPLITUDE;
    }

    /// True during the dim half of the blink cycle
    pub fn dimmed(&self) -> bool {
        self.blink_timer > POWERUP_BLINK_PERIOD / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_coin_spin_wraps() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut coin = Coin::new(0.0, 0.0, &mut rng);
        assert!((0.0..TAU).contains(&coin.spin));
        for _ in 0..600 {
            coin.update(1.0 / 60.0);
            assert!(coin.spin >= 0.0 && coin.spin <= TAU);
        }
        assert_eq!(coin.value, COIN_VALUE);
    }

    #[test]
    fn test_coin_phase_deterministic() {
        let a = Coin::new(0.0, 0.0, &mut Pcg32::seed_from_u64(7));
        let b = Coin::new(0.0, 0.0, &mut Pcg32::seed_from_u64(7));
        assert_eq!(a.spin, b.spin);
    }

    #[test]
    fn test_power_up_float_does_not_move_box() {
        let mut power_up = PowerUp::new(600.0, 350.0, PowerUpKind::Speed);
        for _ in 0..30 {
            power_up.update(1.0 / 60.0);
        }
        assert_eq!(power_up.rect.y, 350.0);
        assert!(power_up.float_offset.abs() <= POWERUP_FLOAT_AMPLITUDE);
    }

    #[test]
    fn test_power_up_blink() {
        let mut power_up = PowerUp::new(0.0, 0.0, PowerUpKind::Jump);
        power_up.update(0.1);
        assert!(!power_up.dimmed());
        power_up.update(0.2);
        assert!(power_up.dimmed());
        power_up.update(0.3);
        // Wrapped past the period
        assert!(!power_up.dimmed());
    }
}
