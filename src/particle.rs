use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::{canvas::Canvas, palette::Palette};

pub const BURST_SIZE: usize = 20;
pub const GRAVITY: f32 = 0.1;
pub const DRAG: f32 = 0.98;
pub const FADE_STEP: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct Particle {
	pub position: Vec2,
	pub velocity: Vec2,
	pub color: Palette,
	pub alpha: f32,
	pub size: f32,
}

impl Particle {
	pub fn burst<R: Rng + ?Sized>(at: Vec2, color: Palette, rng: &mut R) -> Self {
		let direction = Vec2::from_angle(rng.random_range(0.0..TAU));
		Self {
			position: at,
			velocity: direction * rng.random_range(2.0..5.0),
			color,
			alpha: 255.0,
			size: rng.random_range(3.0..8.0),
		}
	}

	pub fn update(&mut self) {
		self.position += self.velocity;
		self.velocity.y += GRAVITY;
		self.velocity *= DRAG;
		self.alpha -= FADE_STEP;
	}

	pub fn display(&self, canvas: &mut impl Canvas) {
		canvas.fill_circle(
			self.position,
			self.size,
			self.color.rgb().with_alpha(self.alpha),
		);
	}

	pub fn is_dead(&self) -> bool {
		self.alpha <= 0.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{rngs::StdRng, SeedableRng};

	fn particle() -> Particle {
		Particle::burst(
			Vec2::new(100.0, 100.0),
			Palette::Sky,
			&mut StdRng::seed_from_u64(1),
		)
	}

	#[test]
	fn burst_ranges() {
		let mut rng = StdRng::seed_from_u64(5);
		for _ in 0..500 {
			let p = Particle::burst(Vec2::ZERO, Palette::Flame, &mut rng);
			let speed = p.velocity.length();
			assert!((2.0 - 1e-4..5.0 + 1e-4).contains(&speed), "speed {speed}");
			assert!((3.0..8.0).contains(&p.size));
			assert_eq!(p.alpha, 255.0);
			assert_eq!(p.color, Palette::Flame);
		}
	}

	#[test]
	fn alpha_falls_by_fixed_step_until_dead() {
		let mut p = particle();
		let mut updates = 0;
		while !p.is_dead() {
			let before = p.alpha;
			p.update();
			updates += 1;
			assert_eq!(before - p.alpha, FADE_STEP);
		}
		assert_eq!(updates, 51);
		assert!(p.alpha <= 0.0);
	}

	#[test]
	fn integrates_then_applies_gravity_and_drag() {
		let mut p = particle();
		p.velocity = Vec2::new(2.0, -1.0);
		p.update();
		assert_eq!(p.position, Vec2::new(102.0, 99.0));
		assert!((p.velocity.x - 2.0 * DRAG).abs() < 1e-6);
		assert!((p.velocity.y - (-1.0 + GRAVITY) * DRAG).abs() < 1e-6);
	}
}
