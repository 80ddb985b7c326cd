use anyhow::Result;
use serde_json::Value;

use crate::ScrobbleRecord;

pub mod lastfm;
pub mod listenbrainz;
pub use self::{
    lastfm::LastFm,
    listenbrainz::ListenBrainz,
};


/// An external listening-history service
///
/// A single `submit` call is the whole transaction; nothing is sent if it is never reached.
pub trait Scrobbler: Send + Sync {
    /// Human readable service name for logs
    fn name(&self) -> &'static str;

    fn submit(&self, listen: &ScrobbleRecord) -> Result<()>;
}


fn additional_info<T: serde::Serialize>(data: &T) -> Option<serde_json::Map<String, Value>> {
    serde_json::to_value(data).ok().and_then(|v| match v {
        Value::Object(mut m) => {
            m.insert("submission_client".to_owned(), "plex-scrobbler".into());
            m.insert("submission_client_version".to_owned(), env!("CARGO_PKG_VERSION").into());
            Some(m)
        },
        _ => None,
    })
}
