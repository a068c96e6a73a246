// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use rss::extension::itunes::{
    ITunesCategory, ITunesCategoryBuilder, ITunesChannelExtensionBuilder,
    ITunesItemExtensionBuilder, ITunesOwnerBuilder,
};
use rss::extension::{Extension, ExtensionMap};
use rss::{Channel, ChannelBuilder, EnclosureBuilder, Item, ItemBuilder};

use crate::error::SyncError;
use crate::metadata::{FeedDescriptor, ItunesCategory, MediaItem};
use crate::probe::MediaMetadata;

/// Audio container formats that can be published
///
/// The set is closed: anything else is rejected before the feed is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Ogg,
}

impl AudioFormat {
    /// Map a probed container format to a publishable format
    pub fn from_probe(format: &str) -> Option<Self> {
        match format {
            "mp3" => Some(AudioFormat::Mp3),
            "ogg" => Some(AudioFormat::Ogg),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Ogg => "audio/ogg",
        }
    }
}

/// Wrap a single `itunes:*` element the `rss` crate has no typed field for
fn itunes_extension(name: &str, value: &str) -> ExtensionMap {
    let mut extension = Extension::default();
    extension.name = format!("itunes:{name}");
    extension.value = Some(value.to_string());

    let mut elements = BTreeMap::new();
    elements.insert(name.to_string(), vec![extension]);

    let mut map = ExtensionMap::new();
    map.insert("itunes".to_string(), elements);
    map
}

/// Derive the feed entry for an uploaded and probed episode
///
/// The enclosure length carries the duration in seconds, not the byte size.
pub fn build_feed_item(
    item: &MediaItem,
    enclosure_url: String,
    metadata: &MediaMetadata,
) -> Result<Item, SyncError> {
    let format =
        AudioFormat::from_probe(&metadata.format).ok_or_else(|| SyncError::UnsupportedFormat {
            title: item.title.clone(),
            format: metadata.format.clone(),
        })?;

    let enclosure = EnclosureBuilder::default()
        .url(enclosure_url)
        .length(metadata.duration_secs.to_string())
        .mime_type(format.mime_type())
        .build();

    let itunes = ITunesItemExtensionBuilder::default()
        .summary(item.itunes.summary.clone())
        .episode_type(item.itunes.episode_type.clone())
        .explicit(item.itunes.explicit.as_ref().map(ToString::to_string))
        .season(item.itunes.season.map(|s| s.to_string()))
        .build();

    let extensions = item
        .itunes
        .title
        .as_deref()
        .map(|title| itunes_extension("title", title))
        .unwrap_or_default();

    Ok(ItemBuilder::default()
        .title(item.title.clone())
        .description(item.description.clone())
        .pub_date(item.pub_date.clone())
        .enclosure(enclosure)
        .itunes_ext(itunes)
        .extensions(extensions)
        .build())
}

fn convert_category(category: &ItunesCategory) -> ITunesCategory {
    ITunesCategoryBuilder::default()
        .text(category.text.clone())
        .subcategory(
            category
                .subcategory
                .as_deref()
                .map(|sub| Box::new(convert_category(sub))),
        )
        .build()
}

/// Assemble the channel around the derived episode entries
///
/// `link` points at the published feed document; `items` keep their order.
pub fn build_channel(descriptor: &FeedDescriptor, link: String, items: Vec<Item>) -> Channel {
    let fields = &descriptor.itunes;

    let owner = fields.owner.as_ref().map(|owner| {
        ITunesOwnerBuilder::default()
            .name(owner.name.clone())
            .email(owner.email.clone())
            .build()
    });

    let itunes = ITunesChannelExtensionBuilder::default()
        .author(fields.author.clone())
        .categories(fields.categories.iter().map(convert_category).collect::<Vec<_>>())
        .explicit(fields.explicit.as_ref().map(ToString::to_string))
        .image(fields.image.clone())
        .owner(owner)
        .subtitle(fields.subtitle.clone())
        .summary(fields.summary.clone())
        .build();

    let extensions = fields
        .kind
        .as_deref()
        .map(|kind| itunes_extension("type", kind))
        .unwrap_or_default();

    ChannelBuilder::default()
        .title(descriptor.title.clone())
        .link(link)
        .description(descriptor.description.clone())
        .copyright(descriptor.copyright.clone())
        .language(descriptor.language.clone())
        .pub_date(descriptor.pub_date.clone())
        .last_build_date(descriptor.last_build_date.clone())
        .items(items)
        .itunes_ext(itunes)
        .extensions(extensions)
        .build()
}
