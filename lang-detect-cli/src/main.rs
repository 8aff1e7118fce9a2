use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use lang_detect_core::training::{train_from_corpora, train_from_frequency_lists};
use lang_detect_core::{LanguageDetector, ModelKind, ProfileSet};
use log::info;

/// Identify the language of a text with character n-gram profiles.
#[derive(Parser, Debug)]
#[command(name = "lang-detect", version, about)]
struct Cli {
    /// Directory holding the `model-<kind>.bin` files
    #[arg(long, global = true, env = "LANG_DETECT_MODEL_DIR", default_value = "./models")]
    model_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the `tc` model from TextCat frequency lists (`*.lm`)
    TrainTc {
        /// Directory containing the `.lm` files
        #[arg(long, default_value = "./textcat_ngrams")]
        input: PathBuf,
    },

    /// Build the `fm` model from raw text corpora (`*.txt`, one per language)
    TrainFm {
        /// Directory containing the `.txt` files
        #[arg(long, default_value = "./training_data")]
        input: PathBuf,
    },

    /// Print the language of TEXT (read from stdin when omitted)
    Detect {
        /// Model to detect with
        #[arg(long, env = "LANG_DETECT_MODEL", default_value_t = ModelKind::Tc)]
        model: ModelKind,

        /// Also print the raw distance of the winning profile
        #[arg(long)]
        distance: bool,

        text: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::TrainTc { input } => {
            let profiles = train_from_frequency_lists(&input)?;
            save(&profiles, &cli.model_dir, ModelKind::Tc)?;
        }
        Command::TrainFm { input } => {
            let profiles = train_from_corpora(&input)?;
            save(&profiles, &cli.model_dir, ModelKind::Fm)?;
        }
        Command::Detect { model, distance, text } => {
            let detector = LanguageDetector::open(&cli.model_dir, model)?;

            let text = if text.is_empty() {
                let mut bytes = Vec::new();
                std::io::stdin().read_to_end(&mut bytes)?;
                String::from_utf8(bytes)?
            } else {
                text.join(" ")
            };

            let (name, d) = detector.detect_with_distance(&text)?;
            if distance {
                println!("{name}\t{d}");
            } else {
                println!("{name}");
            }
        }
    }

    Ok(())
}

fn save(profiles: &ProfileSet, model_dir: &Path, kind: ModelKind) -> Result<(), Box<dyn std::error::Error>> {
    let path = ProfileSet::model_path(model_dir, kind);
    println!("saving model...");
    profiles.save(&path)?;
    info!("{} languages: {}", profiles.len(), profiles.names().join(", "));
    println!("{} profiles written to {}", profiles.len(), path.display());
    Ok(())
}
