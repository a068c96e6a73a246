// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rss::Channel;

/// Content-Type the feed document is published with
pub const FEED_CONTENT_TYPE: &str = "application/rss+xml";

/// Serialize a channel into an RSS 2.0 document
pub fn render_feed(channel: &Channel) -> Result<Vec<u8>, rss::Error> {
    channel.write_to(Vec::new())
}
