use bevy::prelude::*;
use clap::Parser;
use fractal_playground::{config::PlaygroundArgs, FractalPlaygroundPlugin};

fn main() -> anyhow::Result<()> {
	let config = PlaygroundArgs::parse().resolve()?;

	println!("Starting fractal playground with {:?}", config);

	App::new()
		.add_plugins(DefaultPlugins.set(WindowPlugin {
			primary_window: Some(Window {
				title: "Fractal Playground".to_string(),
				resolution: (1280, 720).into(),
				..default()
			}),
			..default()
		}))
		.add_plugins(FractalPlaygroundPlugin { config })
		.run();

	Ok(())
}
