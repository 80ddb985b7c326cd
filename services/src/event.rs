//! Classification of Plex webhook deliveries

use serde::Deserialize;
use serde_json::Value;

use crate::de;

/// Sent once playback passes the server's completion threshold
pub const SCROBBLE_EVENT: &str = "media.scrobble";
/// Media type of music library items
pub const TRACK_TYPE: &str = "track";

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_TRACK: &str = "Unknown Track";


/// Titles as found in the webhook, before cleaning
///
/// `None` means the server sent an explicit `null`; keys missing entirely are filled with the
/// placeholder text instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTrack {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub album: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Classification {
    /// A completed music play worth forwarding
    Proceed(RawTrack),
    /// Any lifecycle event other than [`SCROBBLE_EVENT`]
    IgnoredEventType(String),
    /// Movies, episodes, and anything else that is not a [`TRACK_TYPE`]
    IgnoredMediaType(Option<String>),
    /// Not JSON, or not shaped like a webhook
    Malformed(String),
}

/// Acknowledgment owed to the webhook sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    Accepted(&'static str),
    Rejected(&'static str),
}

impl Ack {
    /// Response text for the sender
    pub fn message(self) -> &'static str {
        match self {
            Ack::Accepted(msg) | Ack::Rejected(msg) => msg,
        }
    }
}

impl Classification {
    /// What to answer the sender, independent of whether a scrobble is eventually submitted
    pub fn ack(&self) -> Ack {
        match self {
            Classification::Proceed(_) => Ack::Accepted("OK"),
            Classification::IgnoredEventType(_) => Ack::Accepted("Event ignored"),
            Classification::IgnoredMediaType(_) => Ack::Accepted("Not a music track"),
            Classification::Malformed(_) => Ack::Rejected("Invalid JSON"),
        }
    }
}


#[derive(Debug, Deserialize)]
struct Webhook {
    event: String,
    #[serde(rename = "Metadata", default, deserialize_with = "de::object")]
    metadata: Metadata,
}

/// Plex nests music as Artist (grandparent) > Album (parent) > Track
#[derive(Debug, Default, Deserialize)]
struct Metadata {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(rename = "grandparentTitle", default = "unknown_artist")]
    grandparent_title: Option<String>,
    #[serde(rename = "parentTitle", default = "no_album")]
    parent_title: Option<String>,
    #[serde(default = "unknown_track")]
    title: Option<String>,
}

fn unknown_artist() -> Option<String> { Some(UNKNOWN_ARTIST.to_owned()) }

fn unknown_track() -> Option<String> { Some(UNKNOWN_TRACK.to_owned()) }

fn no_album() -> Option<String> { Some(String::new()) }


/// Decides whether a raw webhook payload describes a completed music play
///
/// Checks run in order: shape, event type, media type. Pure; performs no I/O.
pub fn classify(payload: &str) -> Classification {
    let webhook = match serde_json::from_str::<Value>(payload).and_then(de::object::<_, Webhook>) {
        Ok(webhook) => webhook,
        Err(e) => return Classification::Malformed(e.to_string()),
    };

    if webhook.event != SCROBBLE_EVENT {
        return Classification::IgnoredEventType(webhook.event);
    }

    let Metadata {
        kind,
        grandparent_title,
        parent_title,
        title,
    } = webhook.metadata;
    if kind.as_deref() != Some(TRACK_TYPE) {
        return Classification::IgnoredMediaType(kind);
    }

    Classification::Proceed(RawTrack {
        artist: grandparent_title,
        title,
        album: parent_title,
    })
}
