use std::path::PathBuf;

use clap::Parser;

use crate::game::GameSettings;

/// Pop the drifting balloons. Navy ones score a point, the rest cost one.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
	/// Number of balloons on screen
	#[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(1..=500))]
	pub balloons: u16,

	/// Seed for a reproducible run
	#[arg(long)]
	pub seed: Option<u64>,

	/// Pop sound file; a synthesized pop is used if it can't be read
	#[arg(long, default_value = "pop.mp3")]
	pub sound: PathBuf,

	/// Pop volume, 0.0 to 1.0
	#[arg(long, default_value_t = 0.5, value_parser = parse_volume)]
	pub volume: f32,

	/// Disable audio entirely
	#[arg(long)]
	pub mute: bool,

	/// Identifier shown next to the score
	#[arg(long, default_value = "Balloon Pop")]
	pub label: String,

	/// Initial window width in logical pixels (requires --height)
	#[arg(long, requires = "height", value_parser = clap::value_parser!(u32).range(100..=7680))]
	pub width: Option<u32>,

	/// Initial window height in logical pixels (requires --width)
	#[arg(long, requires = "width", value_parser = clap::value_parser!(u32).range(100..=4320))]
	pub height: Option<u32>,
}

impl Config {
	pub fn window_size(&self) -> Option<(u32, u32)> {
		self.width.zip(self.height)
	}

	pub fn game_settings(&self) -> GameSettings {
		GameSettings {
			balloons: usize::from(self.balloons),
			seed: self.seed,
			volume: self.volume,
			label: self.label.clone(),
		}
	}
}

fn parse_volume(s: &str) -> Result<f32, String> {
	let volume: f32 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
	if (0.0..=1.0).contains(&volume) {
		Ok(volume)
	} else {
		Err(format!("volume must be between 0.0 and 1.0, got {volume}"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(args: &[&str]) -> Result<Config, clap::Error> {
		Config::try_parse_from(std::iter::once("balloon_pop").chain(args.iter().copied()))
	}

	#[test]
	fn defaults() {
		let config = parse(&[]).unwrap();
		assert_eq!(config.balloons, 30);
		assert_eq!(config.volume, 0.5);
		assert_eq!(config.sound, PathBuf::from("pop.mp3"));
		assert_eq!(config.label, "Balloon Pop");
		assert!(!config.mute);
		assert_eq!(config.window_size(), None);
		assert_eq!(config.game_settings().balloons, 30);
	}

	#[test]
	fn width_needs_height() {
		assert!(parse(&["--width", "800"]).is_err());
		assert!(parse(&["--height", "600"]).is_err());
		let config = parse(&["--width", "800", "--height", "600"]).unwrap();
		assert_eq!(config.window_size(), Some((800, 600)));
	}

	#[test]
	fn rejects_out_of_range() {
		assert!(parse(&["--volume", "1.5"]).is_err());
		assert!(parse(&["--volume", "loud"]).is_err());
		assert!(parse(&["--balloons", "0"]).is_err());
		assert!(parse(&["--balloons", "501"]).is_err());
		assert!(parse(&["--width", "50", "--height", "600"]).is_err());
	}

	#[test]
	fn bad_arguments_are_usage_errors() {
		let err = parse(&["--balloons", "0"]).unwrap_err();
		assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
		assert_eq!(err.exit_code(), 2);
		assert!(err.to_string().contains("--balloons"));

		let err = parse(&["--width", "800"]).unwrap_err();
		assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
		assert_eq!(err.exit_code(), 2);
	}

	#[test]
	fn seed_and_label_pass_through() {
		let config = parse(&["--seed", "9", "--label", "411136541", "--mute"]).unwrap();
		let settings = config.game_settings();
		assert_eq!(settings.seed, Some(9));
		assert_eq!(settings.label, "411136541");
		assert!(config.mute);
	}
}
