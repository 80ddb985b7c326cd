use ::listenbrainz::raw::{
    request::{
        ListenType,
        Payload,
        SubmitListens,
        TrackMetadata,
    },
    Client,
};
use anyhow::{
    Context,
    Result,
};
use plex_scrobbler_core::ListenData;
use tracing::warn;
use uuid::Uuid;

use super::{
    additional_info,
    Scrobbler,
};
use crate::ScrobbleRecord;


/// Submits plays to a listenbrainz compatible API
pub struct ListenBrainz {
    client: Client,
    token: String,
}

impl ListenBrainz {
    /// Connects to `url`, or the public ListenBrainz instance, and validates `token`
    ///
    /// # Errors
    ///
    /// Fails if the service can't be reached or rejects the token.
    pub fn connect(url: Option<&str>, token: &Uuid) -> Result<Self> {
        let client = url.map(Client::new_with_url).unwrap_or_else(Client::new);

        let token = token.as_hyphenated().to_string();
        if !client.validate_token(token.as_str()).context("Validating ListenBrainz token")?.valid {
            return Err(::listenbrainz::Error::InvalidToken.into());
        }

        Ok(Self { client, token })
    }
}

impl Scrobbler for ListenBrainz {
    fn name(&self) -> &'static str { "ListenBrainz" }

    fn submit(&self, listen: &ScrobbleRecord) -> Result<()> {
        let payload = [Payload::from(listen)];
        let resp = self.client.submit_listens(self.token.as_str(), SubmitListens {
            listen_type: ListenType::Single,
            payload: &payload,
        })?;

        if let Some(limit) = resp.rate_limit {
            if limit.remaining == 0 {
                warn!("ListenBrainz rate limit reached; resets in {} seconds", limit.reset_in);
            }
        }
        Ok(())
    }
}

impl<'l> From<&'l ScrobbleRecord> for Payload<&'l str> {
    fn from(listen: &'l ScrobbleRecord) -> Self {
        Payload {
            listened_at: Some(listen.listened_at()),
            track_metadata: TrackMetadata {
                additional_info: listen.track_metadata().as_ref().and_then(additional_info),
                track_name: listen.track_name(),
                artist_name: listen.artist_name(),
                release_name: listen.release_name(),
            },
        }
    }
}
