//! predict_once - one-shot prediction for a stored image
//!
//! Sends a single image through the concept endpoint (and optionally
//! face detection) and prints the results. Useful for checking
//! credentials and model selection without running the daemon.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use predict_overlay::{ModelKind, PredictionClient, Predictor};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a JPEG image.
    image: Option<PathBuf>,
    /// Concept model name (see --list-models).
    #[arg(long, default_value = "GeneralModel")]
    model: String,
    /// Also run face detection.
    #[arg(long)]
    faces: bool,
    /// API key for the prediction service.
    #[arg(long, env = "CLARIFAI_API_KEY")]
    api_key: Option<String>,
    /// Service base URL.
    #[arg(long, default_value = "https://api.clarifai.com")]
    base_url: String,
    /// List the known concept models and exit.
    #[arg(long)]
    list_models: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_models {
        for model in ModelKind::ALL {
            println!("{:<28} {}", model.name(), model.id());
        }
        return Ok(());
    }

    let image = args
        .image
        .ok_or_else(|| anyhow!("an image path is required (or use --list-models)"))?;
    let api_key = args
        .api_key
        .ok_or_else(|| anyhow!("--api-key or CLARIFAI_API_KEY must be set"))?;

    let bytes = fs::read(&image).with_context(|| format!("reading {}", image.display()))?;
    let client = PredictionClient::with_base_url(api_key, &args.base_url);

    let concepts = client.predict_concepts(&bytes, &args.model)?;
    println!("concepts ({}):", concepts.len());
    for concept in &concepts {
        println!("  {} ({:.2}%)", concept.name, concept.value * 100.0);
    }

    if args.faces {
        let crops = client.predict_faces(&bytes)?;
        println!("faces ({}):", crops.len());
        for crop in &crops {
            println!(
                "  top={:.3} left={:.3} bottom={:.3} right={:.3}",
                crop.top, crop.left, crop.bottom, crop.right
            );
        }
    }

    Ok(())
}
