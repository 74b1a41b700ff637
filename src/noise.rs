use std::f32::consts::PI;

use rand::Rng;

const LATTICE_BITS: usize = 12;
const LATTICE_SIZE: usize = 1 << LATTICE_BITS;
const LATTICE_MASK: usize = LATTICE_SIZE - 1;
const OCTAVES: usize = 4;
const FALLOFF: f32 = 0.5;

/// Smooth 1D value noise. Layers `OCTAVES` octaves of a random lattice
/// with cosine interpolation. Octaves are summed without normalizing, so the
/// output lies below the amplitude sum (0.9375) and averages a little under one half.
pub struct Noise {
	lattice: Box<[f32]>,
}

impl Noise {
	pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
		let lattice = (0..LATTICE_SIZE)
			.map(|_| rng.random::<f32>())
			.collect::<Vec<_>>()
			.into_boxed_slice();
		Self { lattice }
	}

	pub fn sample(&self, x: f32) -> f32 {
		let mut x = x.abs();
		let mut amplitude = FALLOFF;
		let mut total = 0.0;

		for _ in 0..OCTAVES {
			let cell = x.floor();
			let t = x - cell;
			let i = cell as usize;
			let a = self.lattice[i & LATTICE_MASK];
			let b = self.lattice[(i + 1) & LATTICE_MASK];
			total += amplitude * cosine_lerp(a, b, t);

			amplitude *= FALLOFF;
			x *= 2.0;
		}

		total
	}
}

fn cosine_lerp(a: f32, b: f32, t: f32) -> f32 {
	let f = 0.5 * (1.0 - (t * PI).cos());
	a + (b - a) * f
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{rngs::StdRng, SeedableRng};

	// 0.5 + 0.25 + 0.125 + 0.0625
	const MAX: f32 = 0.9375;

	#[test]
	fn output_stays_below_octave_sum() {
		let noise = Noise::new(&mut StdRng::seed_from_u64(7));
		for i in 0..20_000 {
			let v = noise.sample(i as f32 * 0.037);
			assert!((0.0..MAX).contains(&v), "noise({}) = {v}", i as f32 * 0.037);
		}
	}

	#[test]
	fn mean_sits_below_one_half() {
		let noise = Noise::new(&mut StdRng::seed_from_u64(21));
		let samples = 20_000;
		let mean = (0..samples)
			.map(|i| noise.sample(i as f32 * 0.37))
			.sum::<f32>()
			/ samples as f32;
		assert!(mean > 0.42 && mean < 0.5, "mean {mean}");
	}

	#[test]
	fn small_steps_move_smoothly() {
		let noise = Noise::new(&mut StdRng::seed_from_u64(11));
		let mut x = 500.0;
		let mut prev = noise.sample(x);
		for _ in 0..2_000 {
			x += 0.005;
			let next = noise.sample(x);
			assert!((next - prev).abs() < 0.05);
			prev = next;
		}
	}

	#[test]
	fn same_seed_same_field() {
		let a = Noise::new(&mut StdRng::seed_from_u64(3));
		let b = Noise::new(&mut StdRng::seed_from_u64(3));
		for i in 0..100 {
			let x = i as f32 * 1.3;
			assert_eq!(a.sample(x), b.sample(x));
		}
	}
}
