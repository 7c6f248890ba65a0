pub mod config;
pub mod gradient;
pub mod node;
pub mod slots;
pub mod spawn;
pub mod systems;

use bevy::prelude::*;

pub use config::{FractalConfig, FractalConfigError, MAX_DEPTH_LIMIT};
pub use gradient::{GradientColors, MaterialGradient};
pub use node::{FractalNode, FractalRoot, FractalShared, MeshSet, NodeBlueprint, NodeRng};
pub use spawn::{SpawnProcess, SpawnStep};
pub use systems::{depth_counts, halt_growth};

/// Systems that grow and animate fractals, in the order they run.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FractalSystems;

/// Grows a fractal from every entity a [`FractalRoot`] is added to.
///
/// Requires `Assets<StandardMaterial>`, which the PBR plugin provides.
pub struct FractalPlugin;

impl Plugin for FractalPlugin {
	fn build(&self, app: &mut App) {
		// spawn processes tick before roots grow, so a root's first delay starts counting
		// on the frame after its creation, like its children's
		app.add_systems(
			Update,
			(systems::advance_spawn_processes, systems::grow_roots, systems::rotate_nodes)
				.chain()
				.in_set(FractalSystems),
		);
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use bevy::asset::{AssetApp, AssetPlugin};
	use bevy::prelude::*;
	use bevy::time::TimeUpdateStrategy;
	use std::time::Duration;

	/// Simulated length of one frame.
	pub const FRAME: Duration = Duration::from_millis(100);

	/// App without a window or renderer that steps time by [`FRAME`] per update.
	pub fn headless_app() -> App {
		let mut app = App::new();
		app.add_plugins((MinimalPlugins, AssetPlugin::default()))
			.init_asset::<Mesh>()
			.init_asset::<StandardMaterial>()
			.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
		app
	}
}
