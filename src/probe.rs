// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::error::ProbeError;

/// Audio properties needed to publish an episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMetadata {
    /// Duration in whole seconds, rounded to the nearest second
    pub duration_secs: u64,
    /// Container format identifier as reported by the prober (e.g. `mp3`)
    pub format: String,
}

/// Audio probing abstraction for testability
#[async_trait]
pub trait MediaProber: Send + Sync {
    /// Read duration and container format of a local audio file
    async fn probe(&self, path: &Path) -> Result<MediaMetadata, ProbeError>;
}

/// Prober that shells out to `ffprobe`
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    binary: PathBuf,
}

impl FfprobeProber {
    /// Use `ffprobe` from `PATH`
    pub fn new() -> Self {
        Self::with_binary("ffprobe")
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn tool_name(&self) -> String {
        self.binary.display().to_string()
    }
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaProber for FfprobeProber {
    async fn probe(&self, path: &Path) -> Result<MediaMetadata, ProbeError> {
        // Lookup errors other than "absent" are left for ffprobe to report
        if let Ok(false) = tokio::fs::try_exists(path).await {
            return Err(ProbeError::FileNotFound(path.to_path_buf()));
        }

        tracing::debug!("Probing file: {}", path.display());

        let output = Command::new(&self.binary)
            .args(["-v", "error", "-show_format", "-of", "json"])
            .arg(path)
            .output()
            .await
            .map_err(|e| ProbeError::SpawnFailed {
                tool: self.tool_name(),
                path: path.to_path_buf(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProbeError::CommandFailed {
                tool: self.tool_name(),
                path: path.to_path_buf(),
                exit_code: output.status.code().unwrap_or(-1),
                message: stderr.trim().to_string(),
            });
        }

        parse_ffprobe_output(&output.stdout, path)
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    /// ffprobe reports the duration as a decimal string
    duration: Option<String>,
}

/// Parse the JSON written by `ffprobe -show_format -of json`
fn parse_ffprobe_output(stdout: &[u8], path: &Path) -> Result<MediaMetadata, ProbeError> {
    let parsed: FfprobeOutput =
        serde_json::from_slice(stdout).map_err(|e| ProbeError::InvalidOutput {
            path: path.to_path_buf(),
            source: e,
        })?;

    let format = parsed.format.ok_or_else(|| ProbeError::MissingField {
        path: path.to_path_buf(),
        field: "format",
    })?;

    let duration = format
        .duration
        .as_deref()
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite())
        .ok_or_else(|| ProbeError::MissingField {
            path: path.to_path_buf(),
            field: "format.duration",
        })?;

    let format_name = format
        .format_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ProbeError::MissingField {
            path: path.to_path_buf(),
            field: "format.format_name",
        })?;

    Ok(MediaMetadata {
        duration_secs: round_seconds(duration),
        format: format_name,
    })
}

/// Round a duration to the nearest whole second
pub fn round_seconds(duration: f64) -> u64 {
    duration.round().max(0.0) as u64
}
