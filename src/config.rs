//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione del compressore.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con i parametri della compressione
//! - Fornisce validazione dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `crf`: Livello di compressione (default: 28, range consigliato 23-32)
//! - `ffmpeg`: Eseguibile dell'encoder (default: `ffmpeg` della piattaforma)
//! - `ffprobe`: Eseguibile del probe (default: `ffprobe` della piattaforma)
//! - `json_output`: Output JSON per uso programmatico (default: false)
//!
//! ## Validazione:
//! - Controlla che `ffmpeg` e `ffprobe` non siano vuoti
//! - Controlla che `crf` sia un numero finito
//! - Un `crf` fuori dal range consigliato genera solo un warning
//!
//! ## Esempio:
//! ```rust
//! use video_compressor::Config;
//!
//! let config = Config {
//!     crf: 24.0,
//!     ..Default::default()
//! };
//! config.validate().unwrap();
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::platform::PlatformCommands;

/// Lowest CRF offered to users
pub const CRF_MIN: f64 = 23.0;
/// Highest CRF offered to users
pub const CRF_MAX: f64 = 32.0;
/// CRF used when none is given
pub const CRF_DEFAULT: f64 = 28.0;

/// Configuration for video compression
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Constant rate factor (lower = better quality, larger file)
    pub crf: f64,
    /// Encoder executable
    pub ffmpeg: String,
    /// Probe executable
    pub ffprobe: String,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        let platform = PlatformCommands::instance();
        Self {
            crf: CRF_DEFAULT,
            ffmpeg: platform.get_command("ffmpeg").to_string(),
            ffprobe: platform.get_command("ffprobe").to_string(),
            json_output: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.ffmpeg.trim().is_empty() {
            return Err(anyhow::anyhow!("ffmpeg executable must not be empty"));
        }

        if self.ffprobe.trim().is_empty() {
            return Err(anyhow::anyhow!("ffprobe executable must not be empty"));
        }

        if !self.crf.is_finite() {
            return Err(anyhow::anyhow!("CRF must be a finite number"));
        }

        // Passed through to the encoder as-is; ffmpeg decides what it accepts.
        if !crf_in_recommended_range(self.crf) {
            warn!(
                "CRF {} is outside the recommended range {}-{}",
                self.crf, CRF_MIN, CRF_MAX
            );
        }

        Ok(())
    }

    /// Load configuration from file
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

/// Whether `crf` lies within the range offered to users
pub fn crf_in_recommended_range(crf: f64) -> bool {
    (CRF_MIN..=CRF_MAX).contains(&crf)
}
