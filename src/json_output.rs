//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso programmatico
//! del compressore (una riga JSON per messaggio su stdout).
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio compressione (input, output, crf)
//! - `progress`: Percentuale corrente
//! - `complete`: Compressione riuscita con messaggio di riepilogo
//! - `error`: Compressione fallita con messaggio di stato

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::compressor::CompressionResult;
use crate::progress::{ProgressEvent, ProgressSink};

/// Tipo di messaggio JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonMessage {
    /// Inizio della compressione
    Start {
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        crf: f64,
    },

    /// Progresso corrente
    Progress { percent: u8, description: String },

    /// Compressione completata
    Complete { output: PathBuf, message: String },

    /// Compressione fallita
    Error { message: String },
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(input: Option<PathBuf>, output: Option<PathBuf>, crf: f64) -> Self {
        Self::Start { input, output, crf }
    }

    pub fn progress(event: ProgressEvent) -> Self {
        Self::Progress {
            percent: event.percent,
            description: event.description,
        }
    }

    /// `complete` for a produced output, `error` otherwise
    pub fn finished(result: &CompressionResult) -> Self {
        match &result.output_path {
            Some(output) => Self::Complete {
                output: output.clone(),
                message: result.status_message.clone(),
            },
            None => Self::Error {
                message: result.status_message.clone(),
            },
        }
    }
}

/// Emits every progress event as a JSON `progress` message
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonProgressSink;

impl ProgressSink for JsonProgressSink {
    fn report(&self, event: ProgressEvent) {
        JsonMessage::progress(event).emit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_progress_message_shape() {
        let msg = JsonMessage::progress(ProgressEvent::new(37));
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({ "type": "progress", "percent": 37, "description": "Compressing... 37%" })
        );
    }

    #[test]
    fn test_finished_maps_outcome() {
        let ok = CompressionResult::success(PathBuf::from("a_compressed.mp4"), "done".to_string());
        let value = serde_json::to_value(JsonMessage::finished(&ok)).unwrap();
        assert_eq!(value["type"], "complete");
        assert_eq!(value["output"], "a_compressed.mp4");

        let failed = CompressionResult::failure("No input file provided.");
        let value = serde_json::to_value(JsonMessage::finished(&failed)).unwrap();
        assert_eq!(
            value,
            json!({ "type": "error", "message": "No input file provided." })
        );
    }

    #[test]
    fn test_start_message_parses_back() {
        let msg = JsonMessage::start(Some(PathBuf::from("in.mkv")), None, 28.0);
        let text = serde_json::to_string(&msg).unwrap();
        let parsed: JsonMessage = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, msg);
    }
}
