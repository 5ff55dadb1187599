use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use placa::config::Config;
use placa::models::{CropRegion, DetectionMode, ImageDimensions, RecognizedText};
use placa::pipeline::{detect_from_recognized_text, PlateDetector};
use placa::recognition::{
    advise_preprocessing, FixtureGenerator, PassthroughPreprocessor, SyntheticRecognitionEngine,
};
use placa::{format_plate, validate_plate_format};

#[derive(Parser)]
#[command(name = "placa")]
#[command(about = "License-plate detection over text-recognition output", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect a plate in a saved recognition dump or a synthetic scene
    Detect {
        /// Path to a recognition dump (JSON)
        #[arg(long, conflicts_with = "synthetic")]
        input: Option<PathBuf>,
        /// Generate the recognition scene instead of reading a dump
        #[arg(long)]
        synthetic: bool,
        /// Capture mode: general or cropped
        #[arg(long, default_value = "general", value_parser = parse_mode)]
        mode: DetectionMode,
        /// Seed for --synthetic
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Check a plate against the registered shapes
    Validate {
        plate: String,
    },
    /// Print the canonical display form of a plate
    Format {
        plate: String,
    },
    /// Print the preprocessing profile for a capture
    Advise {
        /// Source image width in pixels
        #[arg(long)]
        width: u32,
        /// Source image height in pixels
        #[arg(long)]
        height: u32,
        /// Capture mode: general or cropped
        #[arg(long, default_value = "general", value_parser = parse_mode)]
        mode: DetectionMode,
        /// Crop region as x,y,width,height
        #[arg(long, value_parser = parse_crop)]
        crop: Option<CropRegion>,
    },
    /// Emit deterministic recognition fixtures as JSON, one per line
    Synth {
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Override the default plate pool (repeatable)
        #[arg(long = "plate")]
        plates: Vec<String>,
    },
}

fn parse_mode(s: &str) -> Result<DetectionMode, String> {
    s.parse()
}

fn parse_crop(s: &str) -> Result<CropRegion, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "placa=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    match args.command {
        Command::Detect { input, synthetic, mode, seed } => {
            let result = if let Some(path) = input {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let recognized = RecognizedText::from_json(&json)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                detect_from_recognized_text(&recognized, mode, &config)
            } else if synthetic {
                let detector = PlateDetector::new(
                    Arc::new(PassthroughPreprocessor),
                    Arc::new(SyntheticRecognitionEngine::new(seed)),
                    config,
                );
                detector.detect_plate_prepared("synthetic://scene", mode).await
            } else {
                anyhow::bail!("either --input or --synthetic is required");
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Validate { plate } => {
            if validate_plate_format(&plate) {
                println!("valid");
            } else {
                println!("invalid");
                std::process::exit(1);
            }
        }
        Command::Format { plate } => {
            println!("{}", format_plate(&plate));
        }
        Command::Advise { width, height, mode, crop } => {
            let profile = advise_preprocessing(
                mode,
                ImageDimensions { width, height },
                crop,
                &config.preprocessing,
            );
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Command::Synth { count, seed, plates } => {
            let mut generator = FixtureGenerator::new(seed).with_plates(plates);
            for _ in 0..count {
                println!("{}", serde_json::to_string(&generator.scene())?);
            }
        }
    }

    Ok(())
}
