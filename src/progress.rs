// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

/// Events emitted during a sync run for progress reporting
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// A run against `bucket` has started
    SyncStarted { bucket: String, total_items: usize },

    /// The bucket existence check has completed
    BucketChecked { bucket: String, exists: bool },

    /// The bucket is missing and is being created
    CreatingBucket { bucket: String },

    /// The bucket was created
    BucketCreated { bucket: String },

    /// An episode is about to be uploaded
    ProcessingItem {
        title: String,
        /// Index of this episode in the descriptor
        item_index: usize,
        total_items: usize,
    },

    /// An episode's audio file has been written to storage
    ItemUploaded {
        title: String,
        key: String,
        bytes: u64,
    },

    /// An episode's audio file has been probed
    ItemProbed {
        title: String,
        duration_secs: u64,
        format: String,
    },

    /// The feed document has been rendered
    FeedGenerated { item_count: usize, bytes: u64 },

    /// Sync operation completed
    SyncCompleted { feed_url: String, item_count: usize },
}

/// Trait for observing a sync run.
///
/// Implementations can use this to display progress, write log records,
/// or collect statistics. Reporters never influence the run itself.
pub trait SyncReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: SyncEvent);
}

/// A shared reference to a sync reporter
pub type SharedSyncReporter = Arc<dyn SyncReporter>;

/// A no-op reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl SyncReporter for NoopReporter {
    fn report(&self, _event: SyncEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedSyncReporter {
        Arc::new(Self)
    }
}

/// A reporter that writes every event as a structured `tracing` record
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl TracingReporter {
    /// Create a new TracingReporter wrapped in an Arc
    pub fn shared() -> SharedSyncReporter {
        Arc::new(Self)
    }
}

impl SyncReporter for TracingReporter {
    fn report(&self, event: SyncEvent) {
        match event {
            SyncEvent::SyncStarted {
                bucket,
                total_items,
            } => {
                tracing::info!(%bucket, total_items, "starting sync");
            }
            SyncEvent::BucketChecked { bucket, exists } => {
                tracing::info!(%bucket, exists, "bucket exists");
            }
            SyncEvent::CreatingBucket { bucket } => {
                tracing::info!(%bucket, "creating bucket");
            }
            SyncEvent::BucketCreated { bucket } => {
                tracing::info!(%bucket, "bucket created");
            }
            SyncEvent::ProcessingItem {
                title,
                item_index,
                total_items,
            } => {
                tracing::info!(%title, item = item_index + 1, total_items, "processing item");
            }
            SyncEvent::ItemUploaded { title, key, bytes } => {
                tracing::info!(%title, %key, bytes, "item uploaded");
            }
            SyncEvent::ItemProbed {
                title,
                duration_secs,
                format,
            } => {
                tracing::info!(%title, duration_secs, %format, "item probed");
            }
            SyncEvent::FeedGenerated { item_count, bytes } => {
                tracing::info!(item_count, bytes, "generated feed");
            }
            SyncEvent::SyncCompleted {
                feed_url,
                item_count,
            } => {
                tracing::info!(%feed_url, item_count, "sync completed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_events() -> Vec<SyncEvent> {
        vec![
            SyncEvent::SyncStarted {
                bucket: "my-podcast".to_string(),
                total_items: 2,
            },
            SyncEvent::BucketChecked {
                bucket: "my-podcast".to_string(),
                exists: false,
            },
            SyncEvent::CreatingBucket {
                bucket: "my-podcast".to_string(),
            },
            SyncEvent::BucketCreated {
                bucket: "my-podcast".to_string(),
            },
            SyncEvent::ProcessingItem {
                title: "Episode 1".to_string(),
                item_index: 0,
                total_items: 2,
            },
            SyncEvent::ItemUploaded {
                title: "Episode 1".to_string(),
                key: "episode-1.mp3".to_string(),
                bytes: 1024,
            },
            SyncEvent::ItemProbed {
                title: "Episode 1".to_string(),
                duration_secs: 126,
                format: "mp3".to_string(),
            },
            SyncEvent::FeedGenerated {
                item_count: 2,
                bytes: 2048,
            },
            SyncEvent::SyncCompleted {
                feed_url: "https://s3.amazonaws.com/my-podcast/feed.rss".to_string(),
                item_count: 2,
            },
        ]
    }

    #[test]
    fn noop_reporter_handles_all_events() {
        let reporter = NoopReporter;
        for event in all_events() {
            reporter.report(event);
        }
    }

    #[test]
    fn tracing_reporter_handles_all_events_without_subscriber() {
        let reporter = TracingReporter::shared();
        for event in all_events() {
            reporter.report(event);
        }
    }
}
