//! # Video Compressor Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tassonomia degli errori della compressione
//! - `platform`: Nomi dei tool per piattaforma e verifica disponibilità
//! - `file_manager`: Naming dell'output, estensioni accettate, dimensioni file
//! - `probe`: Durata del video con ffprobe
//! - `command`: Costruzione del comando ffmpeg
//! - `size_report`: Riepilogo dimensioni e percentuale di riduzione
//! - `progress`: Parsing del progresso di ffmpeg e sink degli eventi
//! - `json_output`: Messaggi JSON per uso programmatico
//! - `compressor`: Orchestratore della singola compressione
//!
//! ## Utilizzo:
//! ```no_run
//! use video_compressor::{CompressionRequest, Compressor, Config};
//! use video_compressor::progress::ProgressBarSink;
//!
//! # async fn run() {
//! let compressor = Compressor::new(&Config::default());
//! let bar = ProgressBarSink::new();
//! let result = compressor
//!     .compress(&CompressionRequest::new("clip.mkv", 26.0), &bar)
//!     .await;
//! bar.finish(&result.status_message);
//! # }
//! ```

pub mod command;
pub mod compressor;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod json_output;
pub mod platform;
pub mod probe;
pub mod progress;
pub mod size_report;
pub mod utils;

pub use compressor::{CompressionRequest, CompressionResult, Compressor};
pub use config::Config;
pub use error::CompressError;
pub use progress::{ProgressEvent, ProgressSink};
