// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;

use super::episode::MediaItem;
use super::itunes::ExplicitFlag;

/// Channel-level metadata plus the ordered list of episodes to publish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedDescriptor {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_build_date: Option<String>,
    #[serde(flatten)]
    pub itunes: ItunesChannelFields,
    #[serde(default)]
    pub items: Vec<MediaItem>,
}

/// iTunes namespaced fields of the channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItunesChannelFields {
    /// `episodic` or `serial`
    #[serde(rename = "itunes:type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(
        rename = "itunes:subtitle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subtitle: Option<String>,
    #[serde(
        rename = "itunes:summary",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    #[serde(
        rename = "itunes:author",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,
    #[serde(
        rename = "itunes:category",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub categories: Vec<ItunesCategory>,
    #[serde(
        rename = "itunes:explicit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub explicit: Option<ExplicitFlag>,
    /// URL of the artwork
    #[serde(
        rename = "itunes:image",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(
        rename = "itunes:owner",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub owner: Option<ItunesOwner>,
}

/// A podcast directory category, optionally nested one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItunesCategory {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<Box<ItunesCategory>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItunesOwner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl FeedDescriptor {
    /// Resolve relative episode paths against `base_dir`
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        for item in &mut self.items {
            if item.local_path.is_relative() {
                item.local_path = base_dir.join(&item.local_path);
            }
        }
    }
}

/// Read a feed descriptor from a JSON file
///
/// Relative `localPath` entries are resolved against the directory that
/// contains the descriptor.
pub fn read_feed_descriptor(path: &Path) -> Result<FeedDescriptor, DescriptorError> {
    let content = std::fs::read_to_string(path).map_err(|e| DescriptorError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut descriptor: FeedDescriptor =
        serde_json::from_str(&content).map_err(|e| DescriptorError::JsonParseFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    if let Some(base_dir) = path.parent() {
        descriptor.resolve_paths(base_dir);
    }

    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use tempfile::tempdir;

    const SAMPLE_DESCRIPTOR: &str = r#"{
        "title": "Test Podcast",
        "description": "A test podcast",
        "copyright": "2024 Test",
        "language": "en-us",
        "pubDate": "Mon, 01 Jan 2024 12:00:00 +0000",
        "lastBuildDate": "Tue, 02 Jan 2024 12:00:00 +0000",
        "itunes:type": "episodic",
        "itunes:author": "Test Author",
        "itunes:category": [
            {"text": "Technology"},
            {"text": "Arts", "subcategory": {"text": "Books"}}
        ],
        "itunes:explicit": true,
        "itunes:image": "https://example.com/cover.jpg",
        "itunes:owner": {"name": "Owner", "email": "owner@example.com"},
        "items": [
            {"localPath": "audio/ep1.mp3", "title": "Episode 1", "filename": "ep1"},
            {"localPath": "/abs/ep2.ogg", "title": "Episode 2", "filename": "ep2"}
        ]
    }"#;

    #[test]
    fn parses_channel_fields() {
        let descriptor: FeedDescriptor = serde_json::from_str(SAMPLE_DESCRIPTOR).unwrap();

        assert_eq!(descriptor.title, "Test Podcast");
        assert_eq!(descriptor.copyright, Some("2024 Test".to_string()));
        assert_eq!(descriptor.language, Some("en-us".to_string()));
        assert_eq!(descriptor.itunes.kind, Some("episodic".to_string()));
        assert_eq!(descriptor.itunes.author, Some("Test Author".to_string()));
        assert_eq!(descriptor.itunes.explicit, Some(ExplicitFlag::Bool(true)));
        assert_eq!(descriptor.itunes.categories.len(), 2);
        assert_eq!(
            descriptor.itunes.categories[1]
                .subcategory
                .as_ref()
                .map(|c| c.text.as_str()),
            Some("Books")
        );
        assert_eq!(
            descriptor.itunes.owner.as_ref().and_then(|o| o.email.clone()),
            Some("owner@example.com".to_string())
        );
        assert_eq!(descriptor.items.len(), 2);
    }

    #[test]
    fn parses_explicit_words() {
        for word in ["yes", "no", "clean", "true"] {
            let json = format!(
                r#"{{"title": "T", "description": "D", "itunes:explicit": "{word}"}}"#
            );
            let descriptor: FeedDescriptor = serde_json::from_str(&json).unwrap();
            assert_eq!(
                descriptor.itunes.explicit,
                Some(ExplicitFlag::Text(word.to_string()))
            );
        }
    }

    #[test]
    fn read_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("podcast.json");
        std::fs::write(&path, SAMPLE_DESCRIPTOR).unwrap();

        let descriptor = read_feed_descriptor(&path).unwrap();

        assert_eq!(descriptor.items[0].local_path, dir.path().join("audio/ep1.mp3"));
        assert_eq!(descriptor.items[1].local_path, PathBuf::from("/abs/ep2.ogg"));
    }

    #[test]
    fn read_preserves_item_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("podcast.json");
        std::fs::write(&path, SAMPLE_DESCRIPTOR).unwrap();

        let descriptor = read_feed_descriptor(&path).unwrap();
        let titles: Vec<_> = descriptor.items.iter().map(|i| i.title.as_str()).collect();

        assert_eq!(titles, ["Episode 1", "Episode 2"]);
    }

    #[test]
    fn read_nonexistent_returns_error() {
        let dir = tempdir().unwrap();
        let result = read_feed_descriptor(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(DescriptorError::ReadFailed { .. })));
    }

    #[test]
    fn read_invalid_json_returns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = read_feed_descriptor(&path);
        assert!(matches!(result, Err(DescriptorError::JsonParseFailed { .. })));
    }
}
