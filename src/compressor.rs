//! # Compression Orchestrator
//!
//! Questo modulo coordina una singola richiesta di compressione dall'inizio alla fine.
//!
//! ## Pipeline (lineare, senza retry):
//! 1. Verifica che sia presente un file in input
//! 2. Legge la durata del video con ffprobe
//! 3. Costruisce il comando ffmpeg (libx265 + AAC, CRF scelto)
//! 4. Avvia ffmpeg e legge stderr riga per riga, emettendo `ProgressEvent`
//! 5. Controlla l'exit code di ffmpeg
//! 6. Calcola il riepilogo delle dimensioni
//!
//! ## Gestione errori:
//! Ogni fallimento diventa un `CompressionResult` senza output e con il
//! messaggio di `CompressError`; nessun errore attraversa `compress()`.
//!
//! ## Concorrenza:
//! Nessuno stato condiviso tra richieste. Il path di output deriva dal path
//! di input, quindi due richieste sullo stesso input scrivono sullo stesso file.
//! Nessun timeout: un ffmpeg bloccato blocca la richiesta.
//!
//! ## Esempio:
//! ```no_run
//! use video_compressor::{CompressionRequest, Compressor, Config};
//! use video_compressor::progress::NoProgress;
//!
//! # async fn run() {
//! let compressor = Compressor::new(&Config::default());
//! let request = CompressionRequest::new("holiday.mp4", 28.0);
//! let result = compressor.compress(&request, &NoProgress).await;
//! println!("{}", result.status_message);
//! # }
//! ```

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::BufReader;
use tracing::{debug, info, warn};

use crate::command::EncodeCommand;
use crate::config::Config;
use crate::error::CompressError;
use crate::file_manager::FileManager;
use crate::probe::probe_duration;
use crate::progress::{progress_from_line, ProgressSink, StderrLines};
use crate::size_report::SizeReport;

/// Input of one compression
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionRequest {
    pub input: Option<PathBuf>,
    pub crf: f64,
}

impl CompressionRequest {
    pub fn new(input: impl Into<PathBuf>, crf: f64) -> Self {
        Self {
            input: Some(input.into()),
            crf,
        }
    }

    /// A request without an input file
    pub fn without_input(crf: f64) -> Self {
        Self { input: None, crf }
    }

    /// Where the compressed file will be written
    pub fn output_path(&self) -> Option<PathBuf> {
        self.input
            .as_deref()
            .map(FileManager::compressed_output_path)
    }
}

/// Terminal outcome of one compression; `output_path` is `None` on failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionResult {
    pub output_path: Option<PathBuf>,
    pub status_message: String,
}

impl CompressionResult {
    pub fn success(output_path: PathBuf, status_message: String) -> Self {
        Self {
            output_path: Some(output_path),
            status_message,
        }
    }

    pub fn failure(status_message: impl Into<String>) -> Self {
        Self {
            output_path: None,
            status_message: status_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.output_path.is_some()
    }
}

impl From<CompressError> for CompressionResult {
    fn from(err: CompressError) -> Self {
        Self::failure(err.to_string())
    }
}

/// Runs compressions through external ffprobe/ffmpeg executables
#[derive(Debug, Clone)]
pub struct Compressor {
    ffmpeg: String,
    ffprobe: String,
}

impl Compressor {
    pub fn new(config: &Config) -> Self {
        Self::with_tools(&config.ffmpeg, &config.ffprobe)
    }

    pub fn with_tools(ffmpeg: &str, ffprobe: &str) -> Self {
        Self {
            ffmpeg: ffmpeg.to_string(),
            ffprobe: ffprobe.to_string(),
        }
    }

    /// Compress `request.input`, reporting progress to `sink`. Never fails.
    pub async fn compress(
        &self,
        request: &CompressionRequest,
        sink: &dyn ProgressSink,
    ) -> CompressionResult {
        match self.try_compress(request, sink).await {
            Ok((output_path, summary)) => CompressionResult::success(output_path, summary),
            Err(e) => {
                match &e {
                    CompressError::SummaryFailure(io) => warn!("{} ({})", e, io),
                    _ => warn!("{}", e),
                }
                e.into()
            }
        }
    }

    /// Same pipeline as [`Compressor::compress`], keeping the error typed
    pub async fn try_compress(
        &self,
        request: &CompressionRequest,
        sink: &dyn ProgressSink,
    ) -> Result<(PathBuf, String), CompressError> {
        let input_path = request.input.as_deref().ok_or(CompressError::MissingInput)?;
        let output_path = FileManager::compressed_output_path(input_path);

        info!(
            "🎬 Compressing {} (CRF: {})",
            input_path.display(),
            request.crf
        );

        let duration = probe_duration(&self.ffprobe, input_path)
            .await
            .ok_or(CompressError::ProbeFailure)?;

        let command = EncodeCommand::new(&self.ffmpeg, input_path, &output_path, request.crf);
        self.run_encode(&command, duration, sink).await?;

        let report = SizeReport::from_paths(input_path, &output_path)
            .await
            .map_err(CompressError::SummaryFailure)?;

        info!(
            "✅ {} -> {} ({:.1}% smaller)",
            FileManager::format_size(report.original_bytes),
            FileManager::format_size(report.compressed_bytes),
            report.reduction_percent()
        );

        Ok((output_path, report.to_string()))
    }

    async fn run_encode(
        &self,
        command: &EncodeCommand,
        duration: f64,
        sink: &dyn ProgressSink,
    ) -> Result<(), CompressError> {
        debug!("Running: {}", command);

        let start_time = Instant::now();
        let mut child = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                warn!("Failed to execute {}: {}", command.program, e);
                CompressError::EncodeFailure
            })?;

        if let Some(stderr) = child.stderr.take() {
            let mut lines = StderrLines::new(BufReader::new(stderr));
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => match progress_from_line(&line, duration) {
                        Some(event) => sink.report(event),
                        None if !line.trim().is_empty() => debug!("ffmpeg: {}", line.trim()),
                        None => {}
                    },
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Stopped reading {} output: {}", command.program, e);
                        break;
                    }
                }
            }
        }

        let status = child.wait().await.map_err(|e| {
            warn!("Failed to wait for {}: {}", command.program, e);
            CompressError::EncodeFailure
        })?;

        let elapsed = start_time.elapsed().as_secs_f64();
        if !status.success() {
            warn!("{} failed after {:.1}s: {}", command.program, elapsed, status);
            return Err(CompressError::EncodeFailure);
        }

        info!("Encode completed in {:.1}s", elapsed);
        Ok(())
    }
}
