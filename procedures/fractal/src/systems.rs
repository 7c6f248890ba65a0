use crate::gradient::MaterialGradient;
use crate::node::{FractalNode, FractalRoot, FractalShared, NodeRng};
use crate::spawn::{SpawnProcess, SpawnStep};
use bevy::prelude::*;

/// Turns newly added [`FractalRoot`]s into root nodes.
///
/// The gradient is built here, once per tree, before any child can read it. An entity that
/// is already a node is never grown again, even if its `FractalRoot` is re-inserted.
pub fn grow_roots(
	mut commands: Commands,
	mut materials: ResMut<Assets<StandardMaterial>>,
	roots: Query<(Entity, &FractalRoot, Option<&Transform>, Has<FractalNode>), Added<FractalRoot>>,
) {
	for (entity, root, transform, grown) in &roots {
		if grown {
			log::warn!("Fractal {:?} is already grown, ignoring its new root", entity);
			continue;
		}

		let config = root.config();
		log::info!(
			"Growing fractal {:?} to depth {} (spawn probability {})",
			entity,
			config.max_depth,
			config.spawn_probability
		);

		let gradient =
			MaterialGradient::build(root.base_material(), config.max_depth, &mut materials);
		let shared =
			FractalShared { config: config.clone(), meshes: root.meshes().clone(), gradient };

		let mut rng = NodeRng(root.rng());
		let placement = transform.copied().unwrap_or_default();
		let blueprint = FractalNode::create(shared, 0, placement, &mut rng.0);

		let (components, spawn) = blueprint.into_components(rng);
		let mut root_commands = commands.entity(entity);
		root_commands.insert(components);
		if let Some(spawn) = spawn {
			root_commands.insert(spawn);
		}
	}
}

/// Ticks every running spawn process and spawns the children whose delay elapsed.
pub fn advance_spawn_processes(
	mut commands: Commands,
	time: Res<Time>,
	mut nodes: Query<(Entity, &FractalNode, &mut SpawnProcess, &mut NodeRng)>,
) {
	let dt = time.delta_secs();

	for (entity, node, mut process, mut rng) in &mut nodes {
		match process.tick(dt, &mut rng.0) {
			SpawnStep::Waiting => {}
			SpawnStep::Spawn(slot) => {
				let mut child_rng = rng.fork();
				let blueprint = node.child(slot, &mut child_rng.0);
				let (components, spawn) = blueprint.into_components(child_rng);

				let mut child = commands.spawn((components, ChildOf(entity)));
				if let Some(spawn) = spawn {
					child.insert(spawn);
				}

				log::debug!(
					"Node {:?} spawned child {:?} in slot {} at depth {}",
					entity,
					child.id(),
					slot,
					node.depth() + 1
				);
			}
			SpawnStep::Finished => {
				if process.is_cancelled() {
					log::debug!("Spawn process of node {:?} was cancelled", entity);
				}
				commands.entity(entity).remove::<SpawnProcess>();
			}
		}
	}
}

/// Spins every node about its local up axis.
pub fn rotate_nodes(time: Res<Time>, mut nodes: Query<(&FractalNode, &mut Transform)>) {
	let dt = time.delta_secs();
	for (node, mut transform) in &mut nodes {
		node.tick(&mut transform, dt);
	}
}

/// Cancels every spawn process still running. Returns how many were stopped.
pub fn halt_growth(processes: &mut Query<&mut SpawnProcess>) -> usize {
	let mut halted = 0;
	for mut process in processes.iter_mut() {
		if !process.is_finished() {
			process.cancel();
			halted += 1;
		}
	}

	if halted > 0 {
		log::info!("Halted {} spawn processes", halted);
	}
	halted
}

/// Number of nodes at each depth, indexed by depth.
pub fn depth_counts<'a>(nodes: impl IntoIterator<Item = &'a FractalNode>) -> Vec<usize> {
	let mut counts = Vec::new();
	for node in nodes {
		let depth = node.depth() as usize;
		if counts.len() <= depth {
			counts.resize(depth + 1, 0);
		}
		counts[depth] += 1;
	}
	counts
}
