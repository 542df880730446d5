//! # Platform-specific utilities
//!
//! Questo modulo centralizza la risoluzione cross-platform dei tool esterni
//! (`ffmpeg`, `ffprobe`) e la verifica della loro disponibilità.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// Tools the compressor shells out to
pub const REQUIRED_TOOLS: [&str; 2] = ["ffprobe", "ffmpeg"];

/// Platform-specific command manager
pub struct PlatformCommands {
    commands: HashMap<&'static str, &'static str>,
    which_command: &'static str,
}

impl PlatformCommands {
    /// Get the singleton instance
    pub fn instance() -> &'static Self {
        static INSTANCE: OnceLock<PlatformCommands> = OnceLock::new();
        INSTANCE.get_or_init(Self::new)
    }

    fn new() -> Self {
        let mut commands = HashMap::new();
        let which_command = if cfg!(windows) {
            commands.insert("ffmpeg", "ffmpeg.exe");
            commands.insert("ffprobe", "ffprobe.exe");
            "where"
        } else {
            commands.insert("ffmpeg", "ffmpeg");
            commands.insert("ffprobe", "ffprobe");
            "which"
        };

        Self {
            commands,
            which_command,
        }
    }

    /// Get the platform-specific command name
    pub fn get_command<'a>(&self, base_name: &'a str) -> &'a str {
        self.commands.get(base_name).copied().unwrap_or(base_name)
    }

    /// Get the command used to check if a program exists
    pub fn which_command(&self) -> &str {
        self.which_command
    }

    /// Find a program in the directories listed in `PATH`.
    ///
    /// A program given as a path (contains a separator) is checked directly.
    pub fn find_in_system_path(&self, program: &str) -> Option<PathBuf> {
        let candidate = Path::new(program);
        if candidate.components().count() > 1 {
            return candidate.is_file().then(|| candidate.to_path_buf());
        }

        let found = env::split_paths(&env::var_os("PATH")?)
            .map(|dir| dir.join(program))
            .find(|path| path.is_file());
        debug!("PATH lookup for {}: {:?}", program, found);
        found
    }

    /// Check if a program is available, first via `PATH` and then via `which`/`where`
    pub async fn is_command_available(&self, program: &str) -> bool {
        if self.find_in_system_path(program).is_some() {
            return true;
        }

        let result = tokio::process::Command::new(self.which_command)
            .arg(program)
            .output()
            .await;

        match result {
            Ok(output) => output.status.success(),
            Err(_) => false,
        }
    }

    /// Get system information for debugging
    pub fn system_info() -> SystemInfo {
        SystemInfo {
            os: env::consts::OS,
            arch: env::consts::ARCH,
            family: env::consts::FAMILY,
        }
    }
}

/// System information structure
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub os: &'static str,
    pub arch: &'static str,
    pub family: &'static str,
}

impl std::fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.os, self.arch, self.family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_commands() {
        let platform = PlatformCommands::instance();

        let ffmpeg = platform.get_command("ffmpeg");
        assert!(ffmpeg.starts_with("ffmpeg"));
        assert_eq!(platform.get_command("unknown-tool"), "unknown-tool");
        assert!(!platform.which_command().is_empty());
    }

    #[tokio::test]
    async fn test_missing_command_is_unavailable() {
        let platform = PlatformCommands::instance();
        assert!(
            !platform
                .is_command_available("definitely-not-a-real-tool-4f1c9e")
                .await
        );
    }

    #[test]
    fn test_explicit_path_lookup() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = dir.path().join("fake-tool");
        std::fs::write(&tool, b"").unwrap();

        let platform = PlatformCommands::instance();
        let found = platform.find_in_system_path(tool.to_str().unwrap());
        assert_eq!(found, Some(tool.clone()));
        assert_eq!(
            platform.find_in_system_path(dir.path().join("missing").to_str().unwrap()),
            None
        );
    }

    #[test]
    fn test_system_info() {
        let info = PlatformCommands::system_info();
        assert!(!info.os.is_empty());
        assert!(!info.to_string().is_empty());
    }
}
