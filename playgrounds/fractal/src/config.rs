use anyhow::Context;
use clap::Parser;
use fractal::FractalConfig;
use std::path::{Path, PathBuf};

/// Grows a rotating fractal of meshes.
#[derive(Debug, Parser)]
#[command(name = "fractal-playground")]
pub struct PlaygroundArgs {
	/// TOML file with a fractal configuration; flags below override its values
	#[arg(long)]
	pub config: Option<PathBuf>,
	/// Seed of the random source; a fresh one is drawn when omitted
	#[arg(long)]
	pub seed: Option<u64>,
	#[arg(long)]
	pub max_depth: Option<u32>,
	#[arg(long)]
	pub child_scale: Option<f32>,
	#[arg(long)]
	pub spawn_probability: Option<f32>,
	/// Degrees per second
	#[arg(long)]
	pub max_rotation_speed: Option<f32>,
	/// Degrees
	#[arg(long)]
	pub max_twist: Option<f32>,
}

impl PlaygroundArgs {
	/// Loads the configuration file, if any, applies the flags and validates the result.
	pub fn resolve(&self) -> anyhow::Result<FractalConfig> {
		let mut config = match &self.config {
			Some(path) => load_config(path)?,
			None => FractalConfig::default(),
		};

		if let Some(seed) = self.seed {
			config = config.with_seed(seed);
		}
		if let Some(max_depth) = self.max_depth {
			config = config.with_max_depth(max_depth);
		}
		if let Some(child_scale) = self.child_scale {
			config = config.with_child_scale(child_scale);
		}
		if let Some(spawn_probability) = self.spawn_probability {
			config = config.with_spawn_probability(spawn_probability);
		}
		if let Some(max_rotation_speed) = self.max_rotation_speed {
			config = config.with_max_rotation_speed(max_rotation_speed);
		}
		if let Some(max_twist) = self.max_twist {
			config = config.with_max_twist(max_twist);
		}

		config.validate().context("invalid fractal configuration")?;
		Ok(config)
	}
}

pub fn load_config(path: &Path) -> anyhow::Result<FractalConfig> {
	let contents = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read config file {}", path.display()))?;
	parse_config(&contents).with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Parses a TOML configuration; missing keys keep their defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<FractalConfig> {
	Ok(toml::from_str(contents)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_partial_config() {
		let config = parse_config("max_depth = 6\nspawn_probability = 0.9\nseed = 12\n").unwrap();
		assert_eq!(config.max_depth, 6);
		assert_eq!(config.spawn_probability, 0.9);
		assert_eq!(config.seed, Some(12));
		assert_eq!(config.child_scale, FractalConfig::default().child_scale);
	}

	#[test]
	fn test_parse_rejects_unknown_types() {
		assert!(parse_config("max_depth = \"deep\"").is_err());
	}

	#[test]
	fn test_flags_override_defaults() {
		let args = PlaygroundArgs::try_parse_from([
			"fractal-playground",
			"--max-depth",
			"3",
			"--seed",
			"7",
			"--max-twist",
			"0",
		])
		.unwrap();
		let config = args.resolve().unwrap();
		assert_eq!(config.max_depth, 3);
		assert_eq!(config.seed, Some(7));
		assert_eq!(config.max_twist, 0.0);
	}

	#[test]
	fn test_invalid_flags_fail() {
		let args =
			PlaygroundArgs::try_parse_from(["fractal-playground", "--max-depth", "1"]).unwrap();
		assert!(args.resolve().is_err());
	}

	#[test]
	fn test_missing_config_file_fails() {
		let args = PlaygroundArgs::try_parse_from([
			"fractal-playground",
			"--config",
			"/nonexistent/fractal.toml",
		])
		.unwrap();
		let error = args.resolve().unwrap_err();
		assert!(error.to_string().contains("failed to read config file"));
	}
}
