// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading a feed descriptor
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Failed to read descriptor file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse descriptor JSON in {path}: {source}")]
    JsonParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur while probing an audio file
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Media file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to run {tool} on {path}: {source}")]
    SpawnFailed {
        tool: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with code {exit_code} for {path}: {message}")]
    CommandFailed {
        tool: String,
        path: PathBuf,
        exit_code: i32,
        message: String,
    },

    #[error("Failed to parse probe output for {path}: {source}")]
    InvalidOutput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Probe output for {path} has no {field}")]
    MissingField { path: PathBuf, field: &'static str },
}

/// Errors reported by the object storage collaborator
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("S3 {operation} failed for {target}: {source}")]
    Service {
        operation: &'static str,
        target: String,
        #[source]
        source: Box<aws_sdk_s3::Error>,
    },

    #[error("Bucket {0} does not exist")]
    NoSuchBucket(String),
}

/// Top-level errors for a sync run
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Unknown audio format '{format}' for episode '{title}'")]
    UnsupportedFormat { title: String, format: String },

    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("Failed to read media file {path}: {source}")]
    ReadMedia {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to render feed: {0}")]
    Render(#[from] rss::Error),
}
