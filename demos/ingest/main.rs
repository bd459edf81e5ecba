//! ACS ingest CLI
//!
//! Converts a legacy Microsoft Agent 2.0 character file (`.acs`) into
//! a portable JSON manifest plus a sprite atlas.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example ingest -- CLIPPY.ACS --output-directory out/clippy
//! ```

use clap::Parser;
use log::info;
use msagent_rs::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ingest")]
#[command(author = "msagent-rs project")]
#[command(version)]
#[command(about = "Ingest a Microsoft Agent 2.0 (.acs) character file into a manifest + atlas", long_about = None)]
struct Cli {
	/// Input `.acs` file path.
	#[arg(value_name = "INPUT_ACS")]
	input: PathBuf,

	/// Directory the atlas and manifest are written into.
	#[arg(short, long, env = "ASSISTANT_OUTPUT_DIRECTORY", value_name = "DIR")]
	output_directory: PathBuf,

	/// Overrides the character name derived from the input filename.
	#[arg(long, env = "ASSISTANT_CHARACTER_NAME")]
	character_name: Option<String>,

	/// Duration, in seconds, assigned to frames with an unspecified duration.
	#[arg(long, env = "ASSISTANT_FALLBACK_DURATION", default_value_t = 1.0 / 12.0)]
	fallback_frame_duration: f64,

	/// Upper bound on either atlas dimension.
	#[arg(long, env = "ASSISTANT_MAX_ATLAS_DIMENSION", default_value_t = 16384)]
	max_atlas_dimension: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	let data = std::fs::read(&cli.input)?;
	let source_name = cli
		.input
		.file_name()
		.and_then(|name| name.to_str())
		.ok_or("input path has no file name")?
		.to_string();

	let options = IngestOptions {
		output_directory: cli.output_directory,
		character_name: cli.character_name,
		fallback_frame_duration: cli.fallback_frame_duration,
		max_atlas_dimension: cli.max_atlas_dimension,
	};

	let output = ingest(&data, &source_name, &options)?;

	info!("ingested '{}'", output.manifest.character_name);
	info!("  frames:     {}", output.manifest.frames.len());
	info!("  animations: {}", output.manifest.animations.len());
	info!("  atlas:      {}", output.atlas_path.display());
	info!("  manifest:   {}", output.manifest_path.display());

	Ok(())
}
