// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use bytes::Bytes;

use crate::error::SyncError;
use crate::metadata::MediaItem;
use crate::storage::{Bucket, ObjectStore};

use super::key::object_key;

/// Outcome of uploading one episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedEpisode {
    pub title: String,
    /// Storage key the audio was written under
    pub key: String,
    pub bytes: u64,
}

/// Guess the Content-Type of an uploaded file from its extension
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        _ => "application/octet-stream",
    }
}

/// Upload an episode's audio file to the bucket
///
/// The whole file is read into memory and written under
/// `slug(filename) + extension`, overwriting any previous object.
pub async fn upload_episode<S: ObjectStore + ?Sized>(
    bucket: &Bucket<'_, S>,
    item: &MediaItem,
) -> Result<UploadedEpisode, SyncError> {
    let data = tokio::fs::read(&item.local_path)
        .await
        .map_err(|e| SyncError::ReadMedia {
            path: item.local_path.clone(),
            source: e,
        })?;

    let key = object_key(&item.filename, &item.local_path);
    let bytes = data.len() as u64;

    bucket
        .upsert_object(&key, Bytes::from(data), content_type_for(&item.local_path))
        .await?;

    Ok(UploadedEpisode {
        title: item.title.clone(),
        key,
        bytes,
    })
}
