use bevy::prelude::*;
use std::f32::consts::PI;

mod camera;
pub mod config;
mod ui;

use fractal::{halt_growth, FractalConfig, FractalPlugin, FractalRoot, FractalSystems, SpawnProcess};

pub use camera::OrbitCamera;

pub use fractal;

/// Configuration new fractals are grown with.
#[derive(Resource, Clone)]
pub struct PlaygroundConfig(pub FractalConfig);

/// Meshes and base material shared by every fractal of the playground.
#[derive(Resource, Clone)]
pub struct FractalAssets {
	pub meshes: Vec<Handle<Mesh>>,
	pub base_material: StandardMaterial,
}

pub struct FractalPlaygroundPlugin {
	pub config: FractalConfig,
}

impl Plugin for FractalPlaygroundPlugin {
	fn build(&self, app: &mut App) {
		app.add_plugins(FractalPlugin);

		app.insert_resource(ClearColor(Color::hsla(201.0, 0.69, 0.62, 1.0)))
			.insert_resource(PlaygroundConfig(self.config.clone()))
			.add_systems(
				Startup,
				(camera::setup_camera, setup_lighting, ui::setup_debug_ui, setup_fractal),
			)
			.add_systems(
				Update,
				(
					camera::orbit_camera,
					control_growth.before(FractalSystems),
					ui::update_growth_display.after(FractalSystems),
				),
			);
	}
}

fn setup_lighting(mut commands: Commands) {
	commands.insert_resource(AmbientLight {
		color: Color::WHITE,
		brightness: 400.0,
		affects_lightmapped_meshes: true,
	});

	// Sun
	commands.spawn((
		DirectionalLight { illuminance: 10000.0, shadows_enabled: true, ..default() },
		Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -PI / 4.0, PI / 4.0, 0.0)),
	));

	// Fill from the opposite side
	commands.spawn((
		DirectionalLight { illuminance: 1500.0, shadows_enabled: false, ..default() },
		Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, PI / 4.0, -PI / 4.0, 0.0)),
	));
}

fn setup_fractal(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	config: Res<PlaygroundConfig>,
) {
	// unit sized so children stay tangent to their parent
	let assets = FractalAssets {
		meshes: vec![meshes.add(Cuboid::new(1.0, 1.0, 1.0)), meshes.add(Sphere::new(0.5))],
		base_material: StandardMaterial { perceptual_roughness: 0.6, metallic: 0.1, ..default() },
	};

	plant_fractal(&mut commands, &assets, config.0.clone());
	commands.insert_resource(assets);
}

fn plant_fractal(commands: &mut Commands, assets: &FractalAssets, config: FractalConfig) {
	match FractalRoot::new(config, assets.meshes.clone(), assets.base_material.clone()) {
		Ok(root) => {
			commands.spawn((root, Transform::from_xyz(0.0, 0.5, 0.0), Name::new("Fractal")));
		}
		Err(e) => {
			log::error!("Failed to plant fractal: {}", e);
		}
	}
}

/// R regrows the fractal from a fresh seed, G stops all pending growth.
fn control_growth(
	mut commands: Commands,
	keyboard_input: Res<ButtonInput<KeyCode>>,
	config: Res<PlaygroundConfig>,
	assets: Option<Res<FractalAssets>>,
	roots: Query<Entity, With<FractalRoot>>,
	mut processes: Query<&mut SpawnProcess>,
) {
	if keyboard_input.just_pressed(KeyCode::KeyG) {
		halt_growth(&mut processes);
	}

	if keyboard_input.just_pressed(KeyCode::KeyR) {
		let Some(assets) = assets else {
			return;
		};

		for root in &roots {
			commands.entity(root).despawn();
		}

		let config = config.0.clone().with_seed(rand::random());
		log::info!("Regrowing fractal with seed {:?}", config.seed);
		plant_fractal(&mut commands, &assets, config);
	}
}
