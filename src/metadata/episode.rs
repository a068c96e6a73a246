// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::itunes::{ExplicitFlag, deserialize_season};

/// A locally described episode: the audio file plus its feed metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Path of the audio file on the local disk
    pub local_path: PathBuf,
    pub title: String,
    /// Seed for the storage key
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    #[serde(flatten)]
    pub itunes: ItunesItemFields,
}

/// iTunes namespaced fields of an episode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItunesItemFields {
    #[serde(
        rename = "itunes:title",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        rename = "itunes:summary",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    #[serde(
        rename = "itunes:episodeType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub episode_type: Option<String>,
    #[serde(
        rename = "itunes:explicit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub explicit: Option<ExplicitFlag>,
    #[serde(
        rename = "itunes:season",
        default,
        deserialize_with = "deserialize_season",
        skip_serializing_if = "Option::is_none"
    )]
    pub season: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_all_fields() {
        let json = r#"{
            "localPath": "/media/ep1.mp3",
            "title": "Episode 1",
            "filename": "Episode One",
            "description": "First episode",
            "pubDate": "Mon, 15 Jan 2024 12:00:00 +0000",
            "itunes:title": "The First One",
            "itunes:summary": "Summary",
            "itunes:episodeType": "full",
            "itunes:explicit": false,
            "itunes:season": 2
        }"#;

        let item: MediaItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.local_path, PathBuf::from("/media/ep1.mp3"));
        assert_eq!(item.title, "Episode 1");
        assert_eq!(item.filename, "Episode One");
        assert_eq!(item.description, Some("First episode".to_string()));
        assert_eq!(
            item.pub_date,
            Some("Mon, 15 Jan 2024 12:00:00 +0000".to_string())
        );
        assert_eq!(item.itunes.title, Some("The First One".to_string()));
        assert_eq!(item.itunes.summary, Some("Summary".to_string()));
        assert_eq!(item.itunes.episode_type, Some("full".to_string()));
        assert_eq!(item.itunes.explicit, Some(ExplicitFlag::Bool(false)));
        assert_eq!(item.itunes.season, Some(2));
    }

    #[test]
    fn handles_missing_optional_fields() {
        let json = r#"{"localPath": "ep.ogg", "title": "Minimal", "filename": "minimal"}"#;

        let item: MediaItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.title, "Minimal");
        assert!(item.description.is_none());
        assert!(item.pub_date.is_none());
        assert_eq!(item.itunes, ItunesItemFields::default());
    }

    #[test]
    fn accepts_textual_explicit_and_season() {
        let json = r#"{
            "localPath": "ep.mp3",
            "title": "Episode 2",
            "filename": "ep2",
            "itunes:explicit": "clean",
            "itunes:season": "2"
        }"#;

        let item: MediaItem = serde_json::from_str(json).unwrap();

        assert_eq!(
            item.itunes.explicit,
            Some(ExplicitFlag::Text("clean".to_string()))
        );
        assert_eq!(item.itunes.season, Some(2));
    }

    #[test]
    fn rejects_missing_filename() {
        let json = r#"{"localPath": "ep.ogg", "title": "No key seed"}"#;
        assert!(serde_json::from_str::<MediaItem>(json).is_err());
    }
}
