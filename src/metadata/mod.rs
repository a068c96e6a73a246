mod episode;
mod itunes;
mod podcast;

pub use episode::{ItunesItemFields, MediaItem};
pub use itunes::ExplicitFlag;
pub use podcast::{
    FeedDescriptor, ItunesCategory, ItunesChannelFields, ItunesOwner, read_feed_descriptor,
};
