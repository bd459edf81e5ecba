//! Frame player CLI demo
//!
//! Loads a manifest written by the `ingest` demo and drives it with a
//! fixed-tick simulated wall clock, printing the current animation and
//! frame index whenever either changes. Stands in for the on-screen
//! widget and UI toolkit glue, which are out of this crate's scope.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example player_demo -- out/clippy/manifest.json --clip Wave
//! ```

use clap::Parser;
use log::info;
use msagent_rs::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "player_demo")]
#[command(author = "msagent-rs project")]
#[command(version)]
#[command(about = "Simulate a frame player driving an ingested manifest", long_about = None)]
struct Cli {
	/// Path to a manifest written by the `ingest` demo.
	#[arg(value_name = "MANIFEST_JSON")]
	manifest: PathBuf,

	/// Animation clip to start playing; defaults to the manifest's first clip.
	#[arg(short, long)]
	clip: Option<String>,

	/// Whether the clip should loop; defaults to the clip's own flag.
	#[arg(long)]
	looping: Option<bool>,

	/// Seconds to hold on the last frame before looping back to the first.
	#[arg(long, default_value_t = 0.0)]
	loop_delay: f64,

	/// Simulated ticks per second driving `update`.
	#[arg(long, default_value_t = 60)]
	tick_rate: u32,

	/// Total simulated seconds to run before exiting.
	#[arg(long, default_value_t = 2.0)]
	simulate_seconds: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	let manifest = AssistantManifest::open(&cli.manifest)?;
	let mut player = FramePlayer::new(manifest, cli.clip.as_deref())?;
	player.configure_playback(cli.looping, cli.loop_delay);

	let dt = 1.0 / f64::from(cli.tick_rate.max(1));
	let total_ticks = (cli.simulate_seconds / dt).round() as u64;

	info!("playing '{}' at frame {}", player.current_animation_name(), player.current_global_frame_index());

	let mut last_animation = player.current_animation_name().to_string();
	let mut last_frame = player.current_global_frame_index();

	for _ in 0..total_ticks {
		player.update(dt);

		let animation = player.current_animation_name();
		let frame = player.current_global_frame_index();
		if animation != last_animation || frame != last_frame {
			info!("-> '{animation}' frame {frame}");
			last_animation = animation.to_string();
			last_frame = frame;
		}
	}

	Ok(())
}
