use crate::config::{FractalConfig, FractalConfigError};
use crate::gradient::{MaterialGradient, VARIANT_COUNT};
use crate::slots::child_transform;
use crate::spawn::SpawnProcess;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Non-empty set of meshes a node picks its shape from.
#[derive(Debug, Clone)]
pub struct MeshSet {
	meshes: Arc<[Handle<Mesh>]>,
}

impl MeshSet {
	pub fn new(meshes: Vec<Handle<Mesh>>) -> Result<Self, FractalConfigError> {
		if meshes.is_empty() {
			return Err(FractalConfigError::EmptyMeshSet);
		}
		Ok(Self { meshes: meshes.into() })
	}

	pub fn choose(&self, rng: &mut impl Rng) -> &Handle<Mesh> {
		&self.meshes[rng.gen_range(0..self.meshes.len())]
	}

	pub fn len(&self) -> usize {
		self.meshes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.meshes.is_empty()
	}

	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.meshes, &other.meshes)
	}
}

/// Everything a child copies from its parent.
#[derive(Debug, Clone)]
pub struct FractalShared {
	pub config: FractalConfig,
	pub meshes: MeshSet,
	pub gradient: MaterialGradient,
}

/// Request to grow a fractal from this entity.
///
/// Spawn it with an optional [`Transform`]; the plugin turns the entity into the root node.
#[derive(Component, Debug, Clone)]
pub struct FractalRoot {
	config: FractalConfig,
	meshes: MeshSet,
	base_material: StandardMaterial,
}

impl FractalRoot {
	pub fn new(
		config: FractalConfig,
		meshes: Vec<Handle<Mesh>>,
		base_material: StandardMaterial,
	) -> Result<Self, FractalConfigError> {
		config.validate()?;
		let meshes = MeshSet::new(meshes)?;
		Ok(Self { config, meshes, base_material })
	}

	pub fn config(&self) -> &FractalConfig {
		&self.config
	}

	pub fn meshes(&self) -> &MeshSet {
		&self.meshes
	}

	pub fn base_material(&self) -> &StandardMaterial {
		&self.base_material
	}

	/// Random source of the root node, seeded from the config when it carries a seed.
	pub fn rng(&self) -> StdRng {
		match self.config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::seed_from_u64(rand::thread_rng().gen()),
		}
	}
}

/// Random source owned by a single node.
#[derive(Component, Debug, Clone)]
pub struct NodeRng(pub StdRng);

impl NodeRng {
	/// Derives a fresh source for a child from this node's draws.
	pub fn fork(&mut self) -> NodeRng {
		NodeRng(StdRng::seed_from_u64(self.0.gen()))
	}
}

/// One instance of the fractal.
#[derive(Component, Debug, Clone)]
pub struct FractalNode {
	depth: u32,
	rotation_speed: f32,
	variant: usize,
	shared: FractalShared,
}

/// A created node and what it needs attached in the world.
#[derive(Debug)]
pub struct NodeBlueprint {
	pub node: FractalNode,
	pub transform: Transform,
	pub mesh: Handle<Mesh>,
	pub material: Handle<StandardMaterial>,
	pub spawn: Option<SpawnProcess>,
}

impl FractalNode {
	/// Creates a node at `depth`, drawing its random traits from `rng`.
	///
	/// `transform` is the placement before the creation twist is applied.
	pub fn create(
		shared: FractalShared,
		depth: u32,
		mut transform: Transform,
		rng: &mut impl Rng,
	) -> NodeBlueprint {
		let config = &shared.config;
		assert!(depth <= config.max_depth, "node depth {} exceeds max depth {}", depth, config.max_depth);

		let rotation_speed = rng.gen_range(-config.max_rotation_speed..=config.max_rotation_speed);

		let twist = rng.gen_range(-config.max_twist..=config.max_twist);
		transform.rotate_local_x(twist.to_radians());

		let mesh = shared.meshes.choose(rng).clone();
		let variant = rng.gen_range(0..VARIANT_COUNT);
		let material = shared.gradient.get(depth, variant).clone();

		let spawn = (depth < config.max_depth)
			.then(|| SpawnProcess::start(config.spawn_probability, rng));

		NodeBlueprint {
			node: FractalNode { depth, rotation_speed, variant, shared },
			transform,
			mesh,
			material,
			spawn,
		}
	}

	/// Creates the child placed in `slot`.
	pub fn child(&self, slot: usize, rng: &mut impl Rng) -> NodeBlueprint {
		let transform = child_transform(slot, self.shared.config.child_scale);
		FractalNode::create(self.shared.clone(), self.depth + 1, transform, rng)
	}

	/// Advances the spin about the local up axis by `dt` seconds.
	pub fn tick(&self, transform: &mut Transform, dt: f32) {
		transform.rotate_local_y((self.rotation_speed * dt).to_radians());
	}

	pub fn depth(&self) -> u32 {
		self.depth
	}

	pub fn is_tip(&self) -> bool {
		self.depth == self.shared.config.max_depth
	}

	/// Rotation speed in degrees per second.
	pub fn rotation_speed(&self) -> f32 {
		self.rotation_speed
	}

	pub fn variant(&self) -> usize {
		self.variant
	}

	pub fn shared(&self) -> &FractalShared {
		&self.shared
	}

	pub fn config(&self) -> &FractalConfig {
		&self.shared.config
	}
}

impl NodeBlueprint {
	/// Components of the node, to spawn or insert on an entity.
	pub fn into_components(self, rng: NodeRng) -> (impl Bundle, Option<SpawnProcess>) {
		((self.node, self.transform, Mesh3d(self.mesh), MeshMaterial3d(self.material), rng), self.spawn)
	}
}
