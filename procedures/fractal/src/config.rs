use serde::{Deserialize, Serialize};

/// Deepest tree a configuration may ask for. A full tree has `5^max_depth` tips.
pub const MAX_DEPTH_LIMIT: u32 = 12;

/// Errors raised when a fractal configuration cannot grow a well-formed tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FractalConfigError {
	#[error("max depth of 1 makes the gradient ratio depth / (max_depth - 1) undefined")]
	DegenerateGradient,
	#[error("max depth must be at most {MAX_DEPTH_LIMIT}, got {0}")]
	MaxDepthTooLarge(u32),
	#[error("the mesh set must contain at least one mesh")]
	EmptyMeshSet,
	#[error("child scale must be in (0, 1], got {0}")]
	InvalidChildScale(f32),
	#[error("spawn probability must be in [0, 1], got {0}")]
	InvalidSpawnProbability(f32),
	#[error("max rotation speed must be finite and non-negative, got {0}")]
	NegativeRotationSpeed(f32),
	#[error("max twist must be finite and non-negative, got {0}")]
	NegativeTwist(f32),
}

/// Configuration set on the root of a fractal and inherited unchanged by every descendant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalConfig {
	/// Depth of the tips. The root is at depth 0.
	pub max_depth: u32,
	/// Size of a child relative to its parent.
	pub child_scale: f32,
	/// Chance that a node spawns a child into a given slot.
	pub spawn_probability: f32,
	/// Bound of the per-node rotation speed, in degrees per second.
	pub max_rotation_speed: f32,
	/// Bound of the one-off twist applied on creation, in degrees.
	pub max_twist: f32,
	/// Seed for the root's random source. `None` draws one from the thread rng.
	pub seed: Option<u64>,
}

impl Default for FractalConfig {
	fn default() -> Self {
		Self {
			max_depth: 4,
			child_scale: 0.5,
			spawn_probability: 0.7,
			max_rotation_speed: 60.0,
			max_twist: 20.0,
			seed: None,
		}
	}
}

impl FractalConfig {
	pub fn with_max_depth(mut self, max_depth: u32) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn with_child_scale(mut self, child_scale: f32) -> Self {
		self.child_scale = child_scale;
		self
	}

	pub fn with_spawn_probability(mut self, spawn_probability: f32) -> Self {
		self.spawn_probability = spawn_probability;
		self
	}

	pub fn with_max_rotation_speed(mut self, max_rotation_speed: f32) -> Self {
		self.max_rotation_speed = max_rotation_speed;
		self
	}

	pub fn with_max_twist(mut self, max_twist: f32) -> Self {
		self.max_twist = max_twist;
		self
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Rejects configurations the generator cannot honor. Nothing is clamped.
	pub fn validate(&self) -> Result<(), FractalConfigError> {
		if self.max_depth == 1 {
			return Err(FractalConfigError::DegenerateGradient);
		}

		if self.max_depth > MAX_DEPTH_LIMIT {
			return Err(FractalConfigError::MaxDepthTooLarge(self.max_depth));
		}

		if !(self.child_scale > 0.0 && self.child_scale <= 1.0) {
			return Err(FractalConfigError::InvalidChildScale(self.child_scale));
		}

		if !(0.0..=1.0).contains(&self.spawn_probability) {
			return Err(FractalConfigError::InvalidSpawnProbability(self.spawn_probability));
		}

		if !(self.max_rotation_speed.is_finite() && self.max_rotation_speed >= 0.0) {
			return Err(FractalConfigError::NegativeRotationSpeed(self.max_rotation_speed));
		}

		if !(self.max_twist.is_finite() && self.max_twist >= 0.0) {
			return Err(FractalConfigError::NegativeTwist(self.max_twist));
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_is_valid() {
		assert_eq!(FractalConfig::default().validate(), Ok(()));
	}

	#[test]
	fn test_max_depth_one_is_rejected() {
		let config = FractalConfig::default().with_max_depth(1);
		assert_eq!(config.validate(), Err(FractalConfigError::DegenerateGradient));

		// depth 0 is a lone tip and stays legal
		assert_eq!(FractalConfig::default().with_max_depth(0).validate(), Ok(()));
	}

	#[test]
	fn test_max_depth_is_bounded() {
		let config = FractalConfig::default().with_max_depth(MAX_DEPTH_LIMIT);
		assert_eq!(config.validate(), Ok(()));

		let config = FractalConfig::default().with_max_depth(4_000_000_000);
		assert_eq!(config.validate(), Err(FractalConfigError::MaxDepthTooLarge(4_000_000_000)));
	}

	#[test]
	fn test_out_of_range_values_are_rejected() {
		let config = FractalConfig::default().with_child_scale(0.0);
		assert_eq!(config.validate(), Err(FractalConfigError::InvalidChildScale(0.0)));

		let config = FractalConfig::default().with_child_scale(f32::NAN);
		assert!(matches!(config.validate(), Err(FractalConfigError::InvalidChildScale(_))));

		let config = FractalConfig::default().with_spawn_probability(1.5);
		assert_eq!(config.validate(), Err(FractalConfigError::InvalidSpawnProbability(1.5)));

		let config = FractalConfig::default().with_max_rotation_speed(-1.0);
		assert_eq!(config.validate(), Err(FractalConfigError::NegativeRotationSpeed(-1.0)));

		let config = FractalConfig::default().with_max_twist(f32::INFINITY);
		assert!(matches!(config.validate(), Err(FractalConfigError::NegativeTwist(_))));
	}

	#[test]
	fn test_edge_values_are_accepted() {
		let config = FractalConfig::default()
			.with_child_scale(1.0)
			.with_spawn_probability(0.0)
			.with_max_rotation_speed(0.0)
			.with_max_twist(0.0);
		assert_eq!(config.validate(), Ok(()));
	}
}
