mod key;
mod upload;

pub use key::{FEED_KEY, object_key, original_extension, slug};
pub use upload::{UploadedEpisode, content_type_for, upload_episode};
