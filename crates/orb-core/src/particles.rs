//! Flow-field particle system bounded to a circular domain.
//!
//! Particles stream along their radial angle rotated by a slowly drifting
//! noise field, are softly pushed back when they drift past the rim, and are culled when
//! they age out or escape too far. Rendering is additive so overlapping
//! particles glow.

use crate::constants::*;
use crate::noise::NoiseField;
use crate::state::{OrbMode, Quality};
use crate::surface::{Composite, Paint, Surface2d};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub prev: Vec2,
    pub vel: Vec2,
    pub age: f32,
    pub life: f32,
    pub size: f32,
    pub hue_offset: f32,
    pub sparkle: f32,
}

impl Particle {
    #[inline]
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.life).max(0.0) * ALPHA_SCALE
    }
}

#[derive(Clone, Debug)]
pub struct ParticleSystemConfig {
    pub radius: f32,
    pub count: usize,
    pub quality: Quality,
    pub energy: f32,
    pub palette_index: usize,
    pub seed: u64,
    pub render_style: String,
}

impl ParticleSystemConfig {
    pub fn new(radius: f32, quality: Quality, seed: u64) -> Self {
        Self {
            radius,
            count: quality.budget(),
            quality,
            energy: ENERGY_BASELINE,
            palette_index: 0,
            seed,
            render_style: String::from("flow"),
        }
    }
}

/// Base colour handed to [`ParticleSystem::draw`] by the owning host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            hue: PALETTE_BASE_HUES[0],
            saturation: BASE_SATURATION,
            lightness: BASE_LIGHTNESS,
        }
    }
}

pub struct ParticleSystem {
    config: ParticleSystemConfig,
    noise: NoiseField,
    // Spawn jitter is deliberately unseeded; only the noise field is seeded.
    rng: StdRng,
    particles: Vec<Particle>,
    center: Vec2,
    energy: f32,
    floor: usize,
    cap: usize,
    target: usize,
    batch: usize,
    time: f32,
    global_rot: f32,
}

impl ParticleSystem {
    pub fn new(config: ParticleSystemConfig) -> Self {
        let radius = if config.radius.is_finite() {
            config.radius.max(1.0)
        } else {
            1.0
        };
        let scale = (radius / REFERENCE_RADIUS_PX).clamp(CAP_RADIUS_SCALE_MIN, CAP_RADIUS_SCALE_MAX);
        let cap = ((config.quality.budget() as f32 * scale).round() as usize).max(CAP_MIN);
        let floor = ((cap as f32 * FLOOR_FRACTION).round() as usize).max(1);
        let target = config.count.clamp(floor, cap);
        let batch = (cap / SPAWN_BATCH_DIVISOR).max(SPAWN_BATCH_MIN);
        let energy = sanitize_energy(config.energy, ENERGY_BASELINE);
        let noise = NoiseField::new(config.seed);

        let mut system = Self {
            config: ParticleSystemConfig { radius, ..config },
            noise,
            rng: StdRng::from_entropy(),
            particles: Vec::with_capacity(cap),
            center: Vec2::ZERO,
            energy,
            floor,
            cap,
            target,
            batch,
            time: 0.0,
            global_rot: 0.0,
        };
        system.spawn(target, 0.0);
        log::debug!(
            "[particles] radius={:.1} floor={} target={} cap={}",
            radius,
            floor,
            target,
            cap
        );
        system
    }

    pub fn config(&self) -> &ParticleSystemConfig {
        &self.config
    }

    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn global_rot(&self) -> f32 {
        self.global_rot
    }

    pub fn set_energy(&mut self, v: f32) {
        self.energy = sanitize_energy(v, self.energy);
    }

    /// Move the domain center, carrying live particles along with it.
    pub fn set_center(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let next = Vec2::new(x, y);
        let shift = next - self.center;
        for p in &mut self.particles {
            p.pos += shift;
            p.prev += shift;
        }
        self.center = next;
    }

    /// Spawn a burst of freshly lit particles on top of the steady state.
    pub fn sparkle(&mut self, count: usize) {
        let burst = (count as f32 * SPARKLE_BURST_FACTOR).round() as usize;
        self.spawn(burst, 1.0);
    }

    pub fn tick(&mut self, dt: f32, mode: OrbMode) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let r = self.config.radius;
        let t = self.time;
        let noise_scale = mode.noise_scale();
        let swirl = mode.swirl();
        let flow = FLOW_BASE + self.energy * FLOW_ENERGY_GAIN + mode.flow_bonus();
        let steer = (STEER_RATE_PER_SEC * dt).min(1.0);
        let rim = CONTAINMENT_FRACTION * r;

        for p in &mut self.particles {
            p.prev = p.pos;
            let rel = p.pos - self.center;

            let n = self.noise.sample(
                rel.x / r * noise_scale + t * NOISE_DRIFT_X,
                rel.y / r * noise_scale - t * NOISE_DRIFT_Y,
            );
            let heading = rel.y.atan2(rel.x) + n * swirl * NOISE_ROTATION_GAIN;
            let jitter = self.rng.gen_range(SPEED_JITTER_MIN..SPEED_JITTER_MAX);
            let speed = flow * jitter * r * SPEED_RADIUS_FRACTION;
            let desired = Vec2::new(heading.cos(), heading.sin()) * speed;

            p.vel += (desired - p.vel) * steer;
            p.vel *= VELOCITY_DAMPING;

            let dist = rel.length();
            if dist > rim {
                let inward = -rel / dist;
                p.vel += inward * (dist - rim) * RESTORE_STRENGTH;
            }

            p.pos += p.vel * dt;
            p.age += dt;
            p.sparkle = (p.sparkle - SPARKLE_DECAY_PER_SEC * dt).max(0.0);
        }

        let center = self.center;
        let cull_sq = (CULL_RADIUS_FRACTION * r).powi(2);
        self.particles.retain(|p| {
            p.age < p.life
                && p.pos.is_finite()
                && (p.pos - center).length_squared() <= cull_sq
        });

        let len = self.particles.len();
        if len < self.floor {
            self.spawn(self.floor - len, 0.0);
        }
        let len = self.particles.len();
        if len < self.target {
            self.spawn((self.target - len).min(self.batch), 0.0);
        }

        self.time += dt;
        self.global_rot = (self.global_rot + GLOBAL_ROT_PER_SEC * dt) % TAU;
    }

    /// Render live particles additively. The caller owns trail fading.
    pub fn draw(&self, surface: &mut dyn Surface2d, tint: Tint) {
        surface.set_composite(Composite::Lighter);
        for p in &self.particles {
            let alpha = p.alpha();
            if alpha <= 0.0 {
                continue;
            }
            surface.set_fill(&Paint::Hsla {
                h: tint.hue + p.hue_offset,
                s: tint.saturation,
                l: tint.lightness,
                a: alpha,
            });
            let radius = p.size * (1.0 + p.sparkle * SPARKLE_SIZE_BOOST);
            surface.fill_circle(p.pos.x, p.pos.y, radius);
        }
    }

    fn spawn(&mut self, n: usize, sparkle: f32) {
        let n = n.min(self.cap);
        if n == 0 {
            return;
        }
        let overflow = (self.particles.len() + n).saturating_sub(self.cap);
        if overflow > 0 {
            // oldest first
            self.particles.drain(..overflow);
        }
        let r = self.config.radius;
        for _ in 0..n {
            let p = self.random_particle(r, sparkle);
            self.particles.push(p);
        }
    }

    fn random_particle(&mut self, r: f32, sparkle: f32) -> Particle {
        let rng = &mut self.rng;
        let angle = rng.gen::<f32>() * TAU;
        let dist = rng.gen::<f32>().sqrt() * r * SPAWN_RADIUS_FRACTION;
        let pos = self.center + Vec2::new(angle.cos(), angle.sin()) * dist;
        let drift = rng.gen::<f32>() * TAU;
        let vel = Vec2::new(drift.cos(), drift.sin()) * r * SPAWN_SPEED_FRACTION;
        Particle {
            pos,
            prev: pos,
            vel,
            age: 0.0,
            life: rng.gen_range(LIFE_MIN_SEC..LIFE_MAX_SEC),
            size: r * rng.gen_range(SIZE_MIN_FRACTION..SIZE_MAX_FRACTION),
            hue_offset: rng.gen_range(-HUE_OFFSET_SPAN_DEG..HUE_OFFSET_SPAN_DEG),
            sparkle,
        }
    }
}

#[inline]
fn sanitize_energy(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        fallback
    }
}
