pub mod episode;
pub mod error;
pub mod feed;
pub mod metadata;
pub mod probe;
pub mod progress;
pub mod storage;
pub mod sync;

// Re-export main types for convenience
pub use episode::{FEED_KEY, UploadedEpisode, object_key, slug, upload_episode};
pub use error::{DescriptorError, ProbeError, StorageError, SyncError};
pub use feed::{AudioFormat, build_channel, build_feed_item, render_feed};
pub use metadata::{ExplicitFlag, FeedDescriptor, MediaItem, read_feed_descriptor};
pub use probe::{FfprobeProber, MediaMetadata, MediaProber};
pub use progress::{NoopReporter, SharedSyncReporter, SyncEvent, SyncReporter, TracingReporter};
pub use storage::{Acl, Bucket, MemoryStore, ObjectStore, S3Client, S3Config};
pub use sync::{SyncOptions, SyncReport, sync_podcast};
