//! Command-line front end for building word lists and prompts.
//!
//! ```text
//! ocr-fewshot wordlist --ots-folder sunda/ots --output sunda/wordlist --dict kamus.xlsx -k 3 -t 0.8
//! ocr-fewshot prompts --model-name meta/llama-3.1-8b-instruct --word-list sunda/wordlist \
//!     --input-folder sunda/ots --language Sundanese --few-shot
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ocr_fewshot::prompt::{Language, ShotType, prompt_output_dir, write_prompts};
use ocr_fewshot::{MatchConfig, dictionary, process_files};

#[derive(Parser)]
#[command(name = "ocr-fewshot", about = "Few-shot word lists and prompts for OCR correction")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a JSON-lines word list per OCR document
    Wordlist {
        /// Folder with plain OCR output (*.txt)
        #[arg(long)]
        ots_folder: PathBuf,
        /// Output folder for the JSON word lists
        #[arg(long)]
        output: PathBuf,
        /// Dictionary: spreadsheet or CSV with an `input` column, or one word per line
        #[arg(long)]
        dict: PathBuf,
        /// Maximum similar words per token
        #[arg(short, default_value_t = 3, allow_negative_numbers = true)]
        k: i64,
        /// LCS threshold in [0, 1]
        #[arg(short, default_value_t = 0.8, allow_negative_numbers = true)]
        t: f64,
        /// Seed for the per-document example sample
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write a correction prompt per OCR document
    Prompts {
        #[arg(long)]
        model_name: String,
        /// Folder with the JSON word lists (few-shot only)
        #[arg(long)]
        word_list: PathBuf,
        #[arg(long)]
        input_folder: PathBuf,
        /// Sundanese, Javanese, Minangkabau or Balinese
        #[arg(long)]
        language: String,
        #[arg(long)]
        few_shot: bool,
        /// Defaults to <lang>/prompt-template/<model>_<shot>
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> ocr_fewshot::Result<()> {
    match cli.command {
        Command::Wordlist {
            ots_folder,
            output,
            dict,
            k,
            t,
            seed,
        } => {
            let config = MatchConfig::new(k, t)?;
            let dictionary = dictionary::load_any(&dict)?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let summary = process_files(&ots_folder, &output, &dictionary, &config, &mut rng)?;
            info!(
                documents = summary.documents,
                records = summary.records,
                "Word lists complete"
            );
        }
        Command::Prompts {
            model_name,
            word_list,
            input_folder,
            language,
            few_shot,
            output,
        } => {
            let language: Language = language.parse()?;
            let shot = ShotType::from_flag(few_shot);
            let output =
                output.unwrap_or_else(|| prompt_output_dir(&model_name, language, shot));
            let written = write_prompts(&word_list, &input_folder, &output, language, shot)?;
            info!(prompts = written, output = %output.display(), "Prompts complete");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
