//! # Error Types Module
//!
//! Questo modulo definisce la tassonomia degli errori della compressione.
//!
//! ## Responsabilità:
//! - Definisce `CompressError` enum per categorizzare i fallimenti di una richiesta
//! - Il messaggio `Display` di ogni variante è esattamente il testo mostrato all'utente
//! - Integra con `thiserror` per la conversione e il chaining degli errori
//!
//! ## Categorie di errori:
//! - `MissingInput`: Nessun file in input
//! - `ProbeFailure`: ffprobe assente, fallito o output non numerico
//! - `EncodeFailure`: ffmpeg assente o terminato con exit code diverso da zero
//! - `SummaryFailure`: Errore di stat sui file dopo la compressione
//!
//! ## Esempio:
//! ```ignore
//! let duration = probe_duration(ffprobe, &input).await.ok_or(CompressError::ProbeFailure)?;
//! ```

/// Terminal failure of a compression request
#[derive(thiserror::Error, Debug)]
pub enum CompressError {
    #[error("No input file provided.")]
    MissingInput,

    #[error("Could not determine video duration. Ensure ffprobe is installed.")]
    ProbeFailure,

    #[error("Compression failed. Ensure ffmpeg is installed.")]
    EncodeFailure,

    #[error("Compression finished but error getting file size.")]
    SummaryFailure(#[source] std::io::Error),
}
