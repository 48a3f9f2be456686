//! Particle trail behind the ball
//!
//! Fixed-size pool; dead particles are recycled instead of reallocated.

use glam::{Vec2, Vec4};
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::Ball;

/// A single trail particle
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// RGBA, alpha fades out over the lifetime
    pub color: Vec4,
    /// Seconds left; dead at or below zero
    pub life: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Vec4::ONE,
            life: 0.0,
        }
    }
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    particles: Vec<Particle>,
    per_frame: usize,
    last_used: usize,
}

impl ParticleEmitter {
    pub fn new(pool_size: usize, per_frame: usize) -> Self {
        Self {
            particles: vec![Particle::default(); pool_size],
            per_frame,
            last_used: 0,
        }
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    /// Kill every particle
    pub fn clear(&mut self) {
        self.particles.iter_mut().for_each(|p| p.life = 0.0);
        self.last_used = 0;
    }

    /// Emit new particles at the ball and age the rest
    pub fn update(&mut self, dt: f32, ball: &Ball, rng: &mut Pcg32) {
        if self.particles.is_empty() {
            return;
        }

        let offset = Vec2::splat(ball.radius / 2.0);
        for _ in 0..self.per_frame {
            let idx = self.first_unused();
            respawn(&mut self.particles[idx], ball, offset, rng);
        }

        for p in self.particles.iter_mut().filter(|p| p.is_alive()) {
            p.life -= dt;
            if p.is_alive() {
                p.pos -= p.vel * dt;
                p.color.w -= dt * 2.5;
            }
        }
    }

    /// Index of the first dead particle, searching from the last one used
    fn first_unused(&mut self) -> usize {
        let len = self.particles.len();
        let found = (self.last_used..len)
            .chain(0..self.last_used)
            .find(|&i| !self.particles[i].is_alive());
        // Pool exhausted: overwrite the first particle
        self.last_used = found.unwrap_or(0);
        self.last_used
    }
}

fn respawn(p: &mut Particle, ball: &Ball, offset: Vec2, rng: &mut Pcg32) {
    let jitter = rng.random_range(-5.0f32..5.0);
    let shade = rng.random_range(0.5f32..1.5);
    p.pos = ball.body.pos + Vec2::splat(jitter) + offset;
    p.color = Vec4::new(shade, shade, shade, 1.0);
    p.life = 1.0;
    p.vel = ball.body.vel * 0.1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::TextureHandle;
    use rand::SeedableRng;

    fn ball() -> Ball {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), 10.0, Vec2::new(50.0, -50.0), TextureHandle(1));
        ball.stuck = false;
        ball
    }

    #[test]
    fn test_emits_per_frame() {
        let mut emitter = ParticleEmitter::new(10, 2);
        let mut rng = Pcg32::seed_from_u64(1);
        emitter.update(0.1, &ball(), &mut rng);
        assert_eq!(emitter.iter_alive().count(), 2);
        emitter.update(0.1, &ball(), &mut rng);
        assert_eq!(emitter.iter_alive().count(), 4);
    }

    #[test]
    fn test_particles_age_and_fade() {
        let mut emitter = ParticleEmitter::new(4, 1);
        let mut rng = Pcg32::seed_from_u64(2);
        emitter.update(0.2, &ball(), &mut rng);

        let p = emitter.iter_alive().next().copied().unwrap();
        assert!((p.life - 0.8).abs() < 1e-5);
        assert!((p.color.w - 0.5).abs() < 1e-5);
        assert_eq!(p.vel, Vec2::new(5.0, -5.0));
        // Spawned around the ball origin plus radius/2, then trailed back
        assert!(p.pos.x >= 99.0 && p.pos.x <= 110.0);
    }

    #[test]
    fn test_pool_never_grows() {
        let mut emitter = ParticleEmitter::new(3, 2);
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..10 {
            emitter.update(0.01, &ball(), &mut rng);
        }
        assert_eq!(emitter.iter_alive().count(), 3);
    }

    #[test]
    fn test_clear_kills_everything() {
        let mut emitter = ParticleEmitter::new(8, 2);
        let mut rng = Pcg32::seed_from_u64(4);
        emitter.update(0.01, &ball(), &mut rng);
        emitter.clear();
        assert_eq!(emitter.iter_alive().count(), 0);
    }

    #[test]
    fn test_empty_pool_is_noop() {
        let mut emitter = ParticleEmitter::new(0, 2);
        let mut rng = Pcg32::seed_from_u64(5);
        emitter.update(0.1, &ball(), &mut rng);
        assert_eq!(emitter.iter_alive().count(), 0);
    }
}
