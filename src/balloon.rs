use std::{f32::consts::FRAC_PI_4, ops::RangeInclusive};

use glam::Vec2;
use rand::{seq::IndexedRandom, Rng};

use crate::{
	audio::Sound,
	canvas::Canvas,
	noise::Noise,
	palette::{Palette, Rgb},
	particle::{Particle, BURST_SIZE},
};

pub const DIAMETER: RangeInclusive<f32> = 50.0..=200.0;
pub const ALPHA: RangeInclusive<f32> = 50.0..=200.0;
pub const SPEED: RangeInclusive<f32> = -3.0..=-0.5;
const DRIFT: f32 = 0.5;
const NOISE_STEP: f32 = 0.005;
const NOISE_SPAN: f32 = 1000.0;

#[derive(Debug, Clone)]
pub struct Balloon {
	pub position: Vec2,
	pub diameter: f32,
	pub color: Palette,
	pub alpha: f32,
	pub speed: f32,
	pub noise_offset: f32,
	pub exploding: bool,
}

impl Balloon {
	/// Spawns somewhere below the bottom edge so the set enters staggered.
	pub fn new<R: Rng + ?Sized>(viewport: Vec2, rng: &mut R) -> Self {
		let mut balloon = Self {
			position: Vec2::ZERO,
			diameter: 0.0,
			color: Palette::BONUS,
			alpha: 0.0,
			speed: 0.0,
			noise_offset: 0.0,
			exploding: false,
		};
		balloon.resample(viewport, rng);
		balloon.position.y = rng.random_range(viewport.y + 100.0..=viewport.y + 600.0);
		balloon
	}

	pub fn radius(&self) -> f32 {
		self.diameter / 2.0
	}

	pub fn update<R: Rng + ?Sized>(&mut self, viewport: Vec2, noise: &Noise, rng: &mut R) {
		let drift = noise.sample(self.noise_offset) * 2.0 * DRIFT - DRIFT;
		self.position.x += drift;
		self.noise_offset += NOISE_STEP;

		self.position.y += self.speed;

		if self.position.y < -self.radius() || self.exploding {
			self.reset(viewport, rng);
		}
	}

	pub fn reset<R: Rng + ?Sized>(&mut self, viewport: Vec2, rng: &mut R) {
		self.resample(viewport, rng);
		self.position.y = viewport.y + self.radius() + rng.random_range(0.0..800.0);
	}

	fn resample<R: Rng + ?Sized>(&mut self, viewport: Vec2, rng: &mut R) {
		self.color = *Palette::ALL.choose(rng).unwrap_or(&Palette::BONUS);
		self.diameter = rng.random_range(DIAMETER);
		self.alpha = rng.random_range(ALPHA);
		self.speed = rng.random_range(SPEED);
		self.noise_offset = rng.random_range(0.0..NOISE_SPAN);
		self.exploding = false;

		let r = self.radius();
		self.position.x = if r < viewport.x - r {
			rng.random_range(r..=viewport.x - r)
		} else {
			viewport.x / 2.0
		};
	}

	/// Strict: a point exactly on the rim is outside.
	pub fn contains(&self, point: Vec2) -> bool {
		self.position.distance(point) < self.radius()
	}

	/// Leaves `exploding` alone; marking the balloon is up to the caller.
	pub fn explode<S, R>(&self, particles: &mut Vec<Particle>, sound: &mut S, volume: f32, rng: &mut R)
	where
		S: Sound + ?Sized,
		R: Rng + ?Sized,
	{
		particles.extend((0..BURST_SIZE).map(|_| Particle::burst(self.position, self.color, rng)));

		if sound.is_ready() {
			sound.set_volume(volume);
			sound.play();
		}
	}

	pub fn display(&self, canvas: &mut impl Canvas) {
		canvas.fill_circle(
			self.position,
			self.diameter,
			self.color.rgb().with_alpha(self.alpha),
		);

		// highlight square, up and to the right of centre
		let offset = Vec2::new(FRAC_PI_4.cos(), -FRAC_PI_4.sin()) * self.radius() * 0.75;
		canvas.fill_square(
			self.position + offset,
			self.diameter / 7.0,
			Rgb::WHITE.with_alpha(self.alpha * 0.8),
		);
	}
}
