pub use plex_scrobbler_core::*;
use time::OffsetDateTime;
use tracing::{
    error,
    info,
};

pub use crate::{
    event::{
        classify,
        Ack,
        Classification,
        RawTrack,
    },
    normalize::clean,
    scrobble::ScrobbleRecord,
    service::Scrobbler,
};

mod de;
pub mod event;
pub mod normalize;
mod scrobble;
pub mod service;


/// Result of forwarding one play
#[derive(Debug)]
pub enum Outcome {
    Scrobbled(ScrobbleRecord),
    Failed(ScrobbleRecord, anyhow::Error),
}

/// Cleans a classified play, stamps it with the current time, and submits it exactly once
///
/// Submission errors are logged and returned in the [`Outcome`], never raised; the webhook sender
/// is owed an acknowledgment either way.
pub fn forward<S: Scrobbler + ?Sized>(raw: &RawTrack, scrobbler: &S) -> Outcome {
    let listen = ScrobbleRecord::new(raw, OffsetDateTime::now_utc().unix_timestamp());
    info!("Scrobbling: {} - {} (Album: {})", listen.artist, listen.title, listen.album);

    match scrobbler.submit(&listen) {
        Ok(()) => {
            info!("-> Scrobble Success ({})", scrobbler.name());
            Outcome::Scrobbled(listen)
        },
        Err(e) => {
            error!("-> Scrobble Failed ({}): {e:#}", scrobbler.name());
            Outcome::Failed(listen, e)
        },
    }
}


#[cfg(test)]
mod tests;
