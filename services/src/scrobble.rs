use plex_scrobbler_core::ListenData;
use serde::Serialize;

use crate::{
    event::RawTrack,
    normalize::clean,
};


/// A cleaned play, ready for submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrobbleRecord {
    pub artist: String,
    pub title: String,
    pub album: String,
    pub timestamp: i64,
}

impl ScrobbleRecord {
    /// Cleans each raw title on its own and stamps the result with `timestamp`
    pub fn new(raw: &RawTrack, timestamp: i64) -> Self {
        Self {
            artist: clean(raw.artist.as_deref()),
            title: clean(raw.title.as_deref()),
            album: clean(raw.album.as_deref()),
            timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Info {
    media_player: &'static str,
}

impl ListenData for ScrobbleRecord {
    type MetaType<'m> = Info where Self: 'm;

    #[inline]
    fn listened_at(&self) -> i64 { self.timestamp }

    #[inline]
    fn track_name(&self) -> &str { self.title.as_str() }

    #[inline]
    fn artist_name(&self) -> &str { self.artist.as_str() }

    #[inline]
    fn release_name(&self) -> Option<&str> { Some(self.album.as_str()).filter(|a| !a.is_empty()) }

    #[inline]
    fn track_metadata(&self) -> Option<Info> { Some(Info { media_player: "Plex" }) }
}
