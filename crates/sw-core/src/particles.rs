//! Particle simulator for the dissolve effect.
//!
//! Motion is defined per reference tick (1/60 s) and scaled by the real
//! elapsed time, so a dropped frame advances particles exactly as far as
//! the two ticks it replaced.

use crate::model::Particle;
use std::time::Duration;

/// Length of one reference tick.
pub const REFERENCE_TICK: Duration = Duration::from_micros(16_667);

/// Alpha lost per reference tick.
pub const ALPHA_DECAY: f32 = 0.02;

/// Horizontal velocity jitter per reference tick, in `[-JITTER/2, JITTER/2]`.
pub const VELOCITY_JITTER: f32 = 0.5;

/// Simple xorshift64 RNG. Seedable so tests are reproducible.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(0x9E37_79B9_7F4A_7C15)
    }
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x >> 32) as u32
    }

    /// Uniform sample in `[0, 1]`.
    pub fn unit(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// Uniform sample in `[lo, hi]`.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.unit()
    }
}

/// Advances particle motion and fade; prunes dead particles.
#[derive(Debug, Clone, Default)]
pub struct ParticleSimulator {
    rng: Rng,
}

impl ParticleSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { rng: Rng::new(seed) }
    }

    /// Advance every particle by `elapsed` and drop the ones that faded out.
    pub fn advance(&mut self, particles: &mut Vec<Particle>, elapsed: Duration) {
        if particles.is_empty() {
            return;
        }
        let ticks = elapsed.as_secs_f32() / REFERENCE_TICK.as_secs_f32();
        for p in particles.iter_mut() {
            p.x += p.vx * ticks;
            p.y += p.vy * ticks;
            p.vx += self.rng.range(-VELOCITY_JITTER / 2.0, VELOCITY_JITTER / 2.0) * ticks;
            p.alpha -= ALPHA_DECAY * ticks;
        }
        let before = particles.len();
        particles.retain(|p| p.alpha > 0.0);
        let pruned = before - particles.len();
        if pruned > 0 {
            log::trace!("pruned {pruned} particles, {} alive", particles.len());
        }
    }
}
