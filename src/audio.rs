use std::{fs::File, io::BufReader, path::Path};

use rand::Rng;
use rodio::{source::Buffered, Decoder, OutputStream, OutputStreamHandle, Source};

const SAMPLE_RATE: u32 = 44100;
const POP_DURATION_MS: u64 = 120;
const POP_START_FREQ: f32 = 900.0;
const POP_END_FREQ: f32 = 180.0;

type Clip = Buffered<Box<dyn Source<Item = f32> + Send>>;

/// Output side of the pop effect. Nothing is audible until `unlock` has been
/// called from a user gesture.
pub trait Sound {
	fn unlock(&mut self);
	fn is_ready(&self) -> bool;
	fn set_volume(&mut self, volume: f32);
	fn play(&mut self);
}

pub struct PopSound {
	clip: Clip,
	volume: f32,
	output: Option<(OutputStream, OutputStreamHandle)>,
}

impl PopSound {
	/// Decodes `path`, or synthesizes a pop when the file can't be used.
	pub fn load(path: &Path) -> Self {
		let clip = match decode(path) {
			Ok(clip) => {
				log::info!("loaded pop sound from {}", path.display());
				clip
			}
			Err(err) => {
				log::warn!(
					"could not load {} ({err}), using synthesized pop",
					path.display()
				);
				synthesize_pop()
			}
		};
		Self {
			clip,
			volume: 1.0,
			output: None,
		}
	}
}

impl Sound for PopSound {
	fn unlock(&mut self) {
		if self.output.is_some() {
			return;
		}
		match OutputStream::try_default() {
			Ok(output) => {
				log::info!("audio output unlocked");
				self.output = Some(output);
			}
			Err(err) => log::warn!("no audio output available: {err}"),
		}
	}

	fn is_ready(&self) -> bool {
		self.output.is_some()
	}

	fn set_volume(&mut self, volume: f32) {
		self.volume = volume.clamp(0.0, 1.0);
	}

	fn play(&mut self) {
		let Some((_, handle)) = &self.output else {
			return;
		};
		if let Err(err) = handle.play_raw(self.clip.clone().amplify(self.volume)) {
			log::warn!("pop playback failed: {err}");
		}
	}
}

/// Stand-in for `--mute`: never ready, so pops stay silent.
pub struct Silent;

impl Sound for Silent {
	fn unlock(&mut self) {}
	fn is_ready(&self) -> bool {
		false
	}
	fn set_volume(&mut self, _volume: f32) {}
	fn play(&mut self) {}
}

fn decode(path: &Path) -> Result<Clip, Box<dyn std::error::Error>> {
	let file = File::open(path)?;
	let decoder = Decoder::new(BufReader::new(file))?;
	let source: Box<dyn Source<Item = f32> + Send> = Box::new(decoder.convert_samples());
	Ok(source.buffered())
}

fn synthesize_pop() -> Clip {
	let samples = pop_samples(&mut rand::rng());
	let source: Box<dyn Source<Item = f32> + Send> =
		Box::new(rodio::buffer::SamplesBuffer::new(1, SAMPLE_RATE, samples));
	source.buffered()
}

/// Falling sine chirp with a burst of noise, decaying fast.
fn pop_samples<R: Rng + ?Sized>(rng: &mut R) -> Vec<f32> {
	let len = (u64::from(SAMPLE_RATE) * POP_DURATION_MS / 1000) as usize;
	let rate = SAMPLE_RATE as f32;
	let duration = len as f32 / rate;
	let mut phase = 0.0f32;

	(0..len)
		.map(|i| {
			let t = i as f32 / rate;
			let freq = POP_START_FREQ + (POP_END_FREQ - POP_START_FREQ) * (t / duration);
			phase += std::f32::consts::TAU * freq / rate;
			let envelope = (-t * 35.0).exp();
			let noise = rng.random_range(-1.0..1.0) * (-t * 90.0).exp();
			(phase.sin() * 0.7 + noise * 0.3) * envelope * 0.8
		})
		.collect()
}

#[cfg(test)]
pub mod tests {
	use super::*;
	use rand::{rngs::StdRng, SeedableRng};

	/// Records calls instead of producing sound.
	#[derive(Default)]
	pub struct RecordingSound {
		pub unlocked: bool,
		pub loaded: bool,
		pub volume: Option<f32>,
		pub plays: usize,
	}

	impl RecordingSound {
		pub fn loaded() -> Self {
			Self {
				loaded: true,
				..Default::default()
			}
		}
	}

	impl Sound for RecordingSound {
		fn unlock(&mut self) {
			self.unlocked = true;
		}
		fn is_ready(&self) -> bool {
			self.unlocked && self.loaded
		}
		fn set_volume(&mut self, volume: f32) {
			self.volume = Some(volume);
		}
		fn play(&mut self) {
			self.plays += 1;
		}
	}

	#[test]
	fn synthesized_pop_is_short_and_bounded() {
		let samples = pop_samples(&mut StdRng::seed_from_u64(2));
		assert_eq!(samples.len(), 5292);
		assert!(samples.iter().all(|s| s.abs() <= 1.0));
		let head: f32 = samples[..500].iter().map(|s| s.abs()).sum();
		let tail: f32 = samples[samples.len() - 500..].iter().map(|s| s.abs()).sum();
		assert!(tail < head * 0.1);
	}

	#[test]
	fn missing_file_falls_back_and_stays_locked() {
		let mut sound = PopSound::load(Path::new("definitely/not/here.mp3"));
		assert!(!sound.is_ready());
		// locked output swallows playback
		sound.play();
		sound.set_volume(3.0);
		assert_eq!(sound.volume, 1.0);
	}

	#[test]
	fn silent_is_never_ready() {
		let mut sound = Silent;
		sound.unlock();
		assert!(!sound.is_ready());
	}
}
