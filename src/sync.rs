// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use bytes::Bytes;
use rss::Item;

use crate::episode::{FEED_KEY, UploadedEpisode, upload_episode};
use crate::error::SyncError;
use crate::feed::{FEED_CONTENT_TYPE, build_channel, build_feed_item, render_feed};
use crate::metadata::{FeedDescriptor, MediaItem};
use crate::probe::MediaProber;
use crate::progress::{NoopReporter, SharedSyncReporter, SyncEvent};
use crate::storage::{Bucket, ObjectStore};

/// Options for a sync run
#[derive(Clone)]
pub struct SyncOptions {
    /// Name of the destination bucket
    pub bucket: String,
    /// Receives progress events; defaults to [`NoopReporter`]
    pub reporter: SharedSyncReporter,
}

impl SyncOptions {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            reporter: NoopReporter::shared(),
        }
    }

    pub fn with_reporter(mut self, reporter: SharedSyncReporter) -> Self {
        self.reporter = reporter;
        self
    }
}

impl fmt::Debug for SyncOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOptions")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

/// Result of a sync run
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub bucket: String,
    /// Whether the bucket had to be created during this run
    pub created_bucket: bool,
    /// Uploaded episodes, in descriptor order
    pub episodes: Vec<UploadedEpisode>,
    /// Public URL of the published feed
    pub feed_url: String,
    /// Size of the published feed document
    pub feed_bytes: u64,
}

/// Push a podcast to object storage and publish its feed
///
/// This is the main entry point for the library. Stages run strictly in
/// order and the first failure aborts the run:
/// 1. Ensure the bucket exists
/// 2. For each episode: upload the audio, probe it, derive its feed entry
/// 3. Assemble the channel from all entries
/// 4. Render the feed document
/// 5. Upload the feed as `feed.rss`
///
/// Objects written before a failure stay in storage. Every write is keyed
/// deterministically, so rerunning with the same input converges.
pub async fn sync_podcast<S, P>(
    store: &S,
    prober: &P,
    descriptor: &FeedDescriptor,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError>
where
    S: ObjectStore + ?Sized,
    P: MediaProber + ?Sized,
{
    let reporter = &options.reporter;
    let bucket = Bucket::new(store, options.bucket.as_str());
    let total_items = descriptor.items.len();

    reporter.report(SyncEvent::SyncStarted {
        bucket: bucket.name().to_string(),
        total_items,
    });

    let created_bucket = bucket.ensure(reporter.as_ref()).await?;

    let mut episodes = Vec::with_capacity(total_items);
    let mut feed_items = Vec::with_capacity(total_items);

    for (item_index, item) in descriptor.items.iter().enumerate() {
        reporter.report(SyncEvent::ProcessingItem {
            title: item.title.clone(),
            item_index,
            total_items,
        });

        let (uploaded, feed_item) = publish_episode(&bucket, prober, item, reporter).await?;
        episodes.push(uploaded);
        feed_items.push(feed_item);
    }

    let feed_url = bucket.url_for(FEED_KEY);
    let channel = build_channel(descriptor, feed_url.clone(), feed_items);
    let document = render_feed(&channel)?;
    let feed_bytes = document.len() as u64;

    reporter.report(SyncEvent::FeedGenerated {
        item_count: episodes.len(),
        bytes: feed_bytes,
    });

    bucket
        .upsert_object(FEED_KEY, Bytes::from(document), FEED_CONTENT_TYPE)
        .await?;

    reporter.report(SyncEvent::SyncCompleted {
        feed_url: feed_url.clone(),
        item_count: episodes.len(),
    });

    Ok(SyncReport {
        bucket: bucket.name().to_string(),
        created_bucket,
        episodes,
        feed_url,
        feed_bytes,
    })
}

/// Upload one episode, probe it and derive its feed entry
async fn publish_episode<S, P>(
    bucket: &Bucket<'_, S>,
    prober: &P,
    item: &MediaItem,
    reporter: &SharedSyncReporter,
) -> Result<(UploadedEpisode, Item), SyncError>
where
    S: ObjectStore + ?Sized,
    P: MediaProber + ?Sized,
{
    let uploaded = upload_episode(bucket, item).await?;
    reporter.report(SyncEvent::ItemUploaded {
        title: item.title.clone(),
        key: uploaded.key.clone(),
        bytes: uploaded.bytes,
    });

    let metadata = prober.probe(&item.local_path).await?;
    reporter.report(SyncEvent::ItemProbed {
        title: item.title.clone(),
        duration_secs: metadata.duration_secs,
        format: metadata.format.clone(),
    });

    let feed_item = build_feed_item(item, bucket.url_for(&uploaded.key), &metadata)?;
    Ok((uploaded, feed_item))
}
