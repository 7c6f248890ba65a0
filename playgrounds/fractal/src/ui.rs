use bevy::prelude::*;
use fractal::{depth_counts, FractalNode, SpawnProcess};

#[derive(Component)]
pub struct GrowthDisplay;

pub fn setup_debug_ui(mut commands: Commands) {
	log::info!("Setting up debug UI");

	commands
		.spawn((
			Node {
				position_type: PositionType::Absolute,
				top: Val::Px(10.0),
				left: Val::Px(10.0),
				padding: UiRect::all(Val::Px(10.0)),
				..default()
			},
			BackgroundColor(Color::srgba(0.05, 0.05, 0.1, 0.7)),
			GrowthDisplay,
		))
		.with_children(|parent| {
			parent.spawn((
				Text::new(format_growth(&[], 0)),
				TextFont { font_size: 18.0, ..default() },
				TextColor(Color::WHITE),
			));
		});
}

/// Renders node counts per depth plus the controls.
pub fn format_growth(counts: &[usize], growing: usize) -> String {
	let total: usize = counts.iter().sum();
	let mut text = format!("Nodes: {} ({} growing)", total, growing);
	for (depth, count) in counts.iter().enumerate() {
		text.push_str(&format!("\n  depth {}: {}", depth, count));
	}
	text.push_str("\n[R] regrow  [G] halt growth");
	text
}

pub fn update_growth_display(
	nodes: Query<&FractalNode>,
	processes: Query<(), With<SpawnProcess>>,
	display_query: Query<&Children, With<GrowthDisplay>>,
	mut text_query: Query<&mut Text>,
) {
	let Ok(children) = display_query.single() else {
		return;
	};

	if let Some(&text_entity) = children.first() {
		if let Ok(mut text) = text_query.get_mut(text_entity) {
			text.0 = format_growth(&depth_counts(&nodes), processes.iter().count());
		}
	}
}
