#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
	pub const BACKGROUND: Rgb = Rgb(0xd0, 0xf4, 0xde);

	/// `alpha` is on the 0..=255 scale, matching balloon and particle alpha.
	pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
		[
			self.0 as f32 / 255.0,
			self.1 as f32 / 255.0,
			self.2 as f32 / 255.0,
			(alpha / 255.0).clamp(0.0, 1.0),
		]
	}

	pub fn opaque(self) -> [f32; 4] {
		self.with_alpha(255.0)
	}

	pub fn to_wgpu(self) -> wgpu::Color {
		let [r, g, b, a] = self.opaque();
		wgpu::Color {
			r: r as f64,
			g: g as f64,
			b: b as f64,
			a: a as f64,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
	Cream,
	Orange,
	Sky,
	Navy,
	Flame,
}

impl Palette {
	pub const ALL: [Palette; 5] = [
		Palette::Cream,
		Palette::Orange,
		Palette::Sky,
		Palette::Navy,
		Palette::Flame,
	];

	/// Popping this color scores a point, every other color costs one.
	pub const BONUS: Palette = Palette::Navy;

	pub fn rgb(self) -> Rgb {
		match self {
			Palette::Cream => Rgb(0xef, 0xf3, 0xd4),
			Palette::Orange => Rgb(0xfc, 0x9e, 0x4f),
			Palette::Sky => Rgb(0x81, 0xa4, 0xcd),
			Palette::Navy => Rgb(0x12, 0x35, 0x5b),
			Palette::Flame => Rgb(0xf2, 0x64, 0x19),
		}
	}

	pub fn is_bonus(self) -> bool {
		self == Palette::BONUS
	}

	pub fn score_delta(self) -> i64 {
		if self.is_bonus() {
			1
		} else {
			-1
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exactly_one_bonus_color() {
		let bonus: Vec<_> = Palette::ALL.iter().filter(|c| c.is_bonus()).collect();
		assert_eq!(bonus, [&Palette::Navy]);
	}

	#[test]
	fn score_delta_follows_bonus() {
		assert_eq!(Palette::Navy.score_delta(), 1);
		for color in Palette::ALL.into_iter().filter(|c| !c.is_bonus()) {
			assert_eq!(color.score_delta(), -1);
		}
	}

	#[test]
	fn alpha_is_normalized_and_clamped() {
		let [r, g, b, a] = Rgb::WHITE.with_alpha(127.5);
		assert_eq!((r, g, b), (1.0, 1.0, 1.0));
		assert!((a - 0.5).abs() < 1e-6);
		assert_eq!(Rgb::WHITE.with_alpha(-10.0)[3], 0.0);
		assert_eq!(Rgb::WHITE.with_alpha(400.0)[3], 1.0);
	}
}
