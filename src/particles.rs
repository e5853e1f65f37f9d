use rand::Rng;
use raylib::prelude::*;
use serde::Deserialize;

use crate::constants::{FPS, MAX_PARTICLES};
use crate::theme::{HexColor, with_opacity};

/// Static configuration of the decorative background.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleOptions {
    pub background: HexColor,
    pub color: HexColor,
    /// Particles per `density_area` x `density_area` pixels.
    pub count: u32,
    pub density_area: f32,
    /// Upper bound of the drift speed, in pixels per 60 Hz frame.
    pub speed: f32,
    pub opacity: (f32, f32),
    pub radius: (f32, f32),
    pub repulse_distance: f32,
    pub repulse_duration: f32,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            background: HexColor(Color::new(0x1a, 0x1a, 0x2e, 0xff)),
            color: HexColor(Color::WHITE),
            count: 150,
            density_area: 800.0,
            speed: 0.3,
            opacity: (0.1, 0.5),
            radius: (1.0, 3.0),
            repulse_distance: 100.0,
            repulse_duration: 0.4,
        }
    }
}

impl ParticleOptions {
    pub fn count_for(&self, width: f32, height: f32) -> usize {
        let factor = (width * height) / (self.density_area * self.density_area);
        ((self.count as f32 * factor).round() as usize).clamp(1, MAX_PARTICLES)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vector2,
    velocity: Vector2, // pixels per second
    pub radius: f32,
    pub opacity: f32,
}

/// Drifting particle field covering a `width` x `height` layer.
#[derive(Debug, Clone)]
pub struct ParticleField {
    options: ParticleOptions,
    width: f32,
    height: f32,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn seed<R: Rng>(options: ParticleOptions, width: f32, height: f32, rng: &mut R) -> Self {
        let (width, height) = (width.max(1.0), height.max(1.0));
        let count = options.count_for(width, height);
        let particles = (0..count)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(0.0..=options.speed) * FPS as f32;
                Particle {
                    position: Vector2::new(rng.random_range(0.0..width), rng.random_range(0.0..height)),
                    velocity: Vector2::new(angle.cos() * speed, angle.sin() * speed),
                    radius: rng.random_range(options.radius.0..=options.radius.1),
                    opacity: rng.random_range(options.opacity.0..=options.opacity.1),
                }
            })
            .collect();

        log::debug!("particle field {width:.0}x{height:.0} seeded with {count} particles");
        Self { options, width, height, particles }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn background(&self) -> Color {
        self.options.background.0
    }

    /// Stretches the existing particles over a new layer size.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let (sx, sy) = (width / self.width, height / self.height);
        for particle in &mut self.particles {
            particle.position.x *= sx;
            particle.position.y *= sy;
        }
        self.width = width;
        self.height = height;
    }

    /// `pointer` is in layer coordinates.
    pub fn update(&mut self, dt: f32, pointer: Option<Vector2>) {
        let reach = self.options.repulse_distance;
        let duration = self.options.repulse_duration.max(f32::EPSILON);

        for particle in &mut self.particles {
            particle.position.x += particle.velocity.x * dt;
            particle.position.y += particle.velocity.y * dt;

            if let Some(pointer) = pointer {
                let dx = particle.position.x - pointer.x;
                let dy = particle.position.y - pointer.y;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance > 0.0 && distance < reach {
                    let falloff = 1.0 - (distance / reach).powi(2);
                    let push = falloff * reach * dt / duration;
                    particle.position.x += dx / distance * push;
                    particle.position.y += dy / distance * push;
                }
            }

            particle.position.x = wrap(particle.position.x, self.width);
            particle.position.y = wrap(particle.position.y, self.height);
        }
    }

    pub fn draw<D: RaylibDraw>(&self, d: &mut D, origin: Vector2, opacity: f32) {
        let color = self.options.color.0;
        for particle in &self.particles {
            d.draw_circle_v(
                Vector2::new(origin.x + particle.position.x, origin.y + particle.position.y),
                particle.radius,
                with_opacity(color, particle.opacity * opacity),
            );
        }
    }
}

fn wrap(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative values
    if wrapped >= extent { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn field(width: f32, height: f32) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(7);
        ParticleField::seed(ParticleOptions::default(), width, height, &mut rng)
    }

    #[test]
    fn count_scales_with_density_area() {
        let options = ParticleOptions::default();
        assert_eq!(options.count_for(800.0, 800.0), 150);
        assert_eq!(options.count_for(1600.0, 800.0), 300);
        assert_eq!(options.count_for(1.0, 1.0), 1);
        assert_eq!(options.count_for(1.0e6, 1.0e6), MAX_PARTICLES);
    }

    #[test]
    fn seeded_particles_respect_ranges() {
        let field = field(800.0, 600.0);
        for p in field.particles() {
            assert!((0.0..800.0).contains(&p.position.x));
            assert!((0.0..600.0).contains(&p.position.y));
            assert!((1.0..=3.0).contains(&p.radius));
            assert!((0.1..=0.5).contains(&p.opacity));
        }
    }

    #[test]
    fn particles_wrap_inside_the_layer() {
        let mut field = field(300.0, 200.0);
        for _ in 0..2_000 {
            field.update(0.1, Some(Vector2::new(150.0, 100.0)));
        }
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x < 300.0);
            assert!(p.position.y >= 0.0 && p.position.y < 200.0);
        }
    }

    #[test]
    fn hover_repulses_nearby_particles() {
        let mut field = field(800.0, 800.0);
        let pointer = Vector2::new(400.0, 400.0);
        field.particles[0] = Particle {
            position: Vector2::new(420.0, 400.0),
            velocity: Vector2::new(0.0, 0.0),
            radius: 2.0,
            opacity: 0.3,
        };
        field.update(0.05, Some(pointer));
        assert!(field.particles[0].position.x > 420.0);
        assert_eq!(field.particles[0].position.y, 400.0);
    }

    #[test]
    fn resize_keeps_relative_positions() {
        let mut field = field(400.0, 400.0);
        let before = field.particles()[0].position;
        field.resize(800.0, 200.0);
        let after = field.particles()[0].position;
        assert!((after.x - before.x * 2.0).abs() < 1e-3);
        assert!((after.y - before.y * 0.5).abs() < 1e-3);
        assert_eq!(field.size(), (800.0, 200.0));
    }
}
