use glam::Vec2;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
	audio::Sound,
	balloon::Balloon,
	canvas::{Anchor, Canvas},
	noise::Noise,
	palette::Palette,
	particle::Particle,
};

pub const PROMPT: &str = "Click anywhere to start";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	AwaitingActivation,
	Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
	Activated,
	Popped { color: Palette, delta: i64 },
	Missed,
}

pub struct GameSettings {
	pub balloons: usize,
	pub seed: Option<u64>,
	pub volume: f32,
	pub label: String,
}

/// The whole simulation: entities, score and activation phase.
pub struct Game {
	phase: Phase,
	balloons: Vec<Balloon>,
	particles: Vec<Particle>,
	score: i64,
	viewport: Vec2,
	volume: f32,
	label: String,
	noise: Noise,
	rng: StdRng,
}

impl Game {
	pub fn new(settings: GameSettings, viewport: Vec2) -> Self {
		let mut rng = match settings.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		let noise = Noise::new(&mut rng);
		let balloons = (0..settings.balloons)
			.map(|_| Balloon::new(viewport, &mut rng))
			.collect();

		Self {
			phase: Phase::AwaitingActivation,
			balloons,
			particles: Vec::new(),
			score: 0,
			viewport,
			volume: settings.volume,
			label: settings.label,
			noise,
			rng,
		}
	}

	#[cfg(test)]
	pub fn phase(&self) -> Phase {
		self.phase
	}
	pub fn score(&self) -> i64 {
		self.score
	}
	pub fn balloons(&self) -> &[Balloon] {
		&self.balloons
	}
	#[cfg(test)]
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Only affects where future spawns and resets land.
	pub fn resize(&mut self, viewport: Vec2) {
		self.viewport = viewport;
	}

	pub fn frame(&mut self, canvas: &mut impl Canvas) {
		if self.phase == Phase::AwaitingActivation {
			canvas.text(PROMPT, Anchor::Center);
			return;
		}

		canvas.text(&self.label, Anchor::TopLeft);
		canvas.text(&format!("Score: {}", self.score), Anchor::TopRight);

		for balloon in &mut self.balloons {
			balloon.update(self.viewport, &self.noise, &mut self.rng);
			balloon.display(canvas);
		}

		self.particles.retain_mut(|particle| {
			particle.update();
			if particle.is_dead() {
				return false;
			}
			particle.display(canvas);
			true
		});
	}

	pub fn press<S: Sound + ?Sized>(&mut self, at: Vec2, sound: &mut S) -> PressOutcome {
		if self.phase == Phase::AwaitingActivation {
			sound.unlock();
			self.phase = Phase::Running;
			log::info!("activated");
			return PressOutcome::Activated;
		}

		let Some(balloon) = self
			.balloons
			.iter_mut()
			.rev()
			.find(|b| !b.exploding && b.contains(at))
		else {
			return PressOutcome::Missed;
		};

		let color = balloon.color;
		let delta = color.score_delta();
		self.score += delta;
		balloon.explode(&mut self.particles, sound, self.volume, &mut self.rng);
		balloon.exploding = true;
		PressOutcome::Popped { color, delta }
	}
}
