//! # Video Compressor - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Validazione dell'estensione del file in input
//! - Creazione della configurazione e avvio della compressione
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (input, crf, tool, json, verbose)
//! 2. Configura il logging su stderr (INFO o DEBUG, `RUST_LOG` ha la precedenza)
//! 3. Carica la configurazione e applica gli override da CLI
//! 4. Esegue la compressione mostrando il progresso (barra o JSON)
//! 5. Stampa il messaggio di stato; exit code 1 se non c'è output
//!
//! ## Esempio di utilizzo:
//! ```bash
//! video-compressor holiday.mp4 --crf 30 --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use video_compressor::file_manager::{FileManager, SUPPORTED_EXTENSIONS};
use video_compressor::json_output::{JsonMessage, JsonProgressSink};
use video_compressor::platform::{PlatformCommands, REQUIRED_TOOLS};
use video_compressor::progress::ProgressBarSink;
use video_compressor::{CompressionRequest, CompressionResult, Compressor, Config};

#[derive(Parser)]
#[command(name = "video-compressor", version)]
#[command(about = "Shrink a video with ffmpeg (libx265 + AAC) and report the size reduction")]
struct Args {
    /// Video to compress (.mp4, .avi, .mov, .mkv)
    input: Option<PathBuf>,

    /// Compression level (CRF, 23-32, lower = better quality)
    #[arg(short, long)]
    crf: Option<f64>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// ffmpeg executable
    #[arg(long)]
    ffmpeg: Option<String>,

    /// ffprobe executable
    #[arg(long)]
    ffprobe: Option<String>,

    /// Output progress and status as JSON
    #[arg(long)]
    json: bool,

    /// Report whether ffmpeg and ffprobe are available, then exit
    #[arg(long)]
    check_tools: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match args.config {
        Some(ref path) => Config::from_file(path).await?,
        None => Config::default(),
    };
    if let Some(crf) = args.crf {
        config.crf = crf;
    }
    if let Some(ffmpeg) = args.ffmpeg {
        config.ffmpeg = ffmpeg;
    }
    if let Some(ffprobe) = args.ffprobe {
        config.ffprobe = ffprobe;
    }
    config.json_output |= args.json;
    config.validate()?;

    if args.check_tools {
        return check_tools(&config).await;
    }

    if let Some(ref input) = args.input {
        if !FileManager::is_supported_video(input) {
            return Err(anyhow::anyhow!(
                "Unsupported input {}: expected one of .{}",
                input.display(),
                SUPPORTED_EXTENSIONS.join(", .")
            ));
        }
    }

    let request = CompressionRequest {
        input: args.input,
        crf: config.crf,
    };
    let compressor = Compressor::new(&config);

    let result = if config.json_output {
        JsonMessage::start(request.input.clone(), request.output_path(), request.crf).emit();
        let result = compressor.compress(&request, &JsonProgressSink).await;
        JsonMessage::finished(&result).emit();
        result
    } else {
        let bar = ProgressBarSink::new();
        let result = compressor.compress(&request, &bar).await;
        bar.clear();
        print_result(&result);
        result
    };

    if !result.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_result(result: &CompressionResult) {
    match result.output_path {
        Some(ref output) => {
            println!("{}", result.status_message);
            println!("Output: {}", output.display());
        }
        None => eprintln!("{}", result.status_message),
    }
}

async fn check_tools(config: &Config) -> Result<()> {
    let platform = PlatformCommands::instance();
    info!("System: {}", PlatformCommands::system_info());

    let mut missing = Vec::new();
    for (tool, program) in REQUIRED_TOOLS.iter().zip([&config.ffprobe, &config.ffmpeg]) {
        if platform.is_command_available(program).await {
            println!("✅ {}: {}", tool, program);
        } else {
            println!("❌ {}: {} not found", tool, program);
            missing.push(*tool);
        }
    }

    if !missing.is_empty() {
        return Err(anyhow::anyhow!("Missing tools: {}", missing.join(", ")));
    }
    Ok(())
}
