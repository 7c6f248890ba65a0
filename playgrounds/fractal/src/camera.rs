use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use std::f32::consts::PI;

/// Camera circling a focus point.
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
	pub focus: Vec3,
	pub radius: f32,
	pub yaw: f32,
	pub pitch: f32,
	/// Radians per second when orbiting with the keyboard
	pub speed: f32,
	pub sensitivity: f32,
}

impl Default for OrbitCamera {
	fn default() -> Self {
		Self {
			focus: Vec3::new(0.0, 0.5, 0.0),
			radius: 4.0,
			yaw: PI / 6.0,
			pitch: -0.35,
			speed: 1.0,
			sensitivity: 0.005,
		}
	}
}

impl OrbitCamera {
	pub fn transform(&self) -> Transform {
		let rotation = Quat::from_axis_angle(Vec3::Y, self.yaw)
			* Quat::from_axis_angle(Vec3::X, self.pitch);
		Transform::from_translation(self.focus + rotation * Vec3::Z * self.radius)
			.looking_at(self.focus, Vec3::Y)
	}
}

pub fn setup_camera(mut commands: Commands) {
	let orbit = OrbitCamera::default();

	log::info!("Setting up camera orbiting {:?} at radius {}", orbit.focus, orbit.radius);

	commands.spawn((Camera3d::default(), orbit.transform(), orbit));
}

/// Drag with the right mouse button or use A/D to orbit, scroll or W/S to zoom.
pub fn orbit_camera(
	keyboard_input: Res<ButtonInput<KeyCode>>,
	mouse_buttons: Res<ButtonInput<MouseButton>>,
	mut mouse_motion: MessageReader<MouseMotion>,
	mut mouse_wheel: MessageReader<MouseWheel>,
	time: Res<Time>,
	mut query: Query<(&mut Transform, &mut OrbitCamera), With<Camera3d>>,
) {
	let Ok((mut transform, mut orbit)) = query.single_mut() else {
		return;
	};

	let mut mouse_delta = Vec2::ZERO;
	for event in mouse_motion.read() {
		mouse_delta += event.delta;
	}
	if !mouse_buttons.pressed(MouseButton::Right) {
		mouse_delta = Vec2::ZERO;
	}

	let mut zoom = 0.0;
	for event in mouse_wheel.read() {
		zoom -= event.y * 0.1;
	}

	let dt = time.delta_secs();
	if keyboard_input.pressed(KeyCode::KeyA) {
		orbit.yaw -= orbit.speed * dt;
	}
	if keyboard_input.pressed(KeyCode::KeyD) {
		orbit.yaw += orbit.speed * dt;
	}
	if keyboard_input.pressed(KeyCode::KeyW) {
		zoom -= dt;
	}
	if keyboard_input.pressed(KeyCode::KeyS) {
		zoom += dt;
	}

	orbit.yaw -= mouse_delta.x * orbit.sensitivity;
	orbit.pitch -= mouse_delta.y * orbit.sensitivity;
	orbit.pitch = orbit.pitch.clamp(-PI / 2.0 + 0.1, PI / 2.0 - 0.1);
	orbit.radius = (orbit.radius * (1.0 + zoom)).clamp(0.5, 50.0);

	*transform = orbit.transform();
}
