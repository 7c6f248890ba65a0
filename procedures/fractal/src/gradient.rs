use bevy::color::Srgba;
use bevy::prelude::*;
use std::sync::Arc;

/// Number of color variants per depth.
pub const VARIANT_COUNT: usize = 2;

pub const BASE_COLOR: Srgba = Srgba::rgb(1.0, 1.0, 1.0);

/// Colors each variant fades towards as depth increases: yellow and cyan.
pub const TARGET_COLORS: [Srgba; VARIANT_COUNT] = [Srgba::rgb(1.0, 1.0, 0.0), Srgba::rgb(0.0, 1.0, 1.0)];

/// Markers for the deepest level of the tree: magenta and red.
pub const TIP_COLORS: [Srgba; VARIANT_COUNT] = [Srgba::rgb(1.0, 0.0, 1.0), Srgba::rgb(1.0, 0.0, 0.0)];

fn lerp(from: Srgba, to: Srgba, t: f32) -> Srgba {
	Srgba::new(
		from.red + (to.red - from.red) * t,
		from.green + (to.green - from.green) * t,
		from.blue + (to.blue - from.blue) * t,
		from.alpha + (to.alpha - from.alpha) * t,
	)
}

/// Depth by variant color table of a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientColors {
	rows: Vec<[Srgba; VARIANT_COUNT]>,
}

impl GradientColors {
	/// Computes `max_depth + 1` rows, fading with `t = (depth / (max_depth - 1))^2`.
	///
	/// # Panics
	///
	/// When `max_depth` is 1, for which the ratio is undefined. Larger depths are bounded only
	/// by [`FractalConfig::validate`](crate::FractalConfig::validate).
	pub fn new(max_depth: u32) -> Self {
		assert_ne!(max_depth, 1, "gradient ratio is undefined for a max depth of 1");

		let span = max_depth as f32 - 1.0;
		let mut rows: Vec<[Srgba; VARIANT_COUNT]> = (0..=max_depth)
			.map(|depth| {
				let t = (depth as f32 / span).powi(2);
				TARGET_COLORS.map(|target| lerp(BASE_COLOR, target, t))
			})
			.collect();

		// the tip row ignores the fade
		if let Some(tips) = rows.last_mut() {
			*tips = TIP_COLORS;
		}

		Self { rows }
	}

	pub fn get(&self, depth: u32, variant: usize) -> Srgba {
		self.rows[depth as usize][variant]
	}

	pub fn max_depth(&self) -> u32 {
		(self.rows.len() - 1) as u32
	}

	pub fn rows(&self) -> impl Iterator<Item = &[Srgba; VARIANT_COUNT]> {
		self.rows.iter()
	}
}

/// Materials shared by every node of one tree, one independent asset per table entry.
#[derive(Debug, Clone)]
pub struct MaterialGradient {
	materials: Arc<[[Handle<StandardMaterial>; VARIANT_COUNT]]>,
}

impl MaterialGradient {
	/// Adds a tinted copy of `base` to `materials` for every entry of the gradient.
	///
	/// # Panics
	///
	/// When `max_depth` is 1, see [`GradientColors::new`].
	pub fn build(
		base: &StandardMaterial,
		max_depth: u32,
		materials: &mut Assets<StandardMaterial>,
	) -> Self {
		let colors = GradientColors::new(max_depth);

		let rows: Vec<[Handle<StandardMaterial>; VARIANT_COUNT]> = colors
			.rows()
			.map(|row| {
				row.map(|color| {
					materials.add(StandardMaterial { base_color: color.into(), ..base.clone() })
				})
			})
			.collect();

		log::debug!("Built material gradient with {} entries", rows.len() * VARIANT_COUNT);

		Self { materials: rows.into() }
	}

	pub fn get(&self, depth: u32, variant: usize) -> &Handle<StandardMaterial> {
		&self.materials[depth as usize][variant]
	}

	/// Number of depths covered, `max_depth + 1`.
	pub fn depth_count(&self) -> usize {
		self.materials.len()
	}

	pub fn handles(&self) -> impl Iterator<Item = &Handle<StandardMaterial>> {
		self.materials.iter().flatten()
	}

	/// Whether both gradients are the same shared table.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.materials, &other.materials)
	}
}
