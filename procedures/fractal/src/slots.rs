use bevy::prelude::*;
use std::f32::consts::FRAC_1_SQRT_2;

/// Number of slots a node can spawn children into.
pub const SLOT_COUNT: usize = 5;

/// Placement directions around a parent: up, right, left, forward, back.
pub const DIRECTIONS: [Vec3; SLOT_COUNT] = [Vec3::Y, Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z];

/// Orientations aligned with [`DIRECTIONS`]; each maps the local up axis onto its direction.
pub const ORIENTATIONS: [Quat; SLOT_COUNT] = [
	Quat::IDENTITY,
	// -90 degrees about Z
	Quat::from_xyzw(0.0, 0.0, -FRAC_1_SQRT_2, FRAC_1_SQRT_2),
	// +90 degrees about Z
	Quat::from_xyzw(0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2),
	// +90 degrees about X
	Quat::from_xyzw(FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2),
	// -90 degrees about X
	Quat::from_xyzw(-FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2),
];

pub fn direction(slot: usize) -> Vec3 {
	DIRECTIONS[slot]
}

pub fn orientation(slot: usize) -> Quat {
	ORIENTATIONS[slot]
}

/// Local placement of a child in `slot`, expressed in the parent's frame.
///
/// The offset keeps the child tangent to its parent for any scale: half the parent's
/// extent plus half the child's.
pub fn child_transform(slot: usize, child_scale: f32) -> Transform {
	Transform {
		translation: direction(slot) * (0.5 + 0.5 * child_scale),
		rotation: orientation(slot),
		scale: Vec3::splat(child_scale),
	}
}
