mod build;
mod render;

pub use build::{AudioFormat, build_channel, build_feed_item};
pub use render::{FEED_CONTENT_TYPE, render_feed};
