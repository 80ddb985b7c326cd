//! Last.fm scrobbling through the 2.0 web service API

use std::{
    fmt,
    time::Duration,
};

use anyhow::{
    anyhow,
    bail,
    Context,
    Result,
};
use plex_scrobbler_core::ListenData;
use serde_json::Value;

use super::Scrobbler;
use crate::ScrobbleRecord;

pub const API_ROOT: &str = "https://ws.audioscrobbler.com/2.0/";


#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}


/// An authenticated Last.fm session
pub struct LastFm {
    agent: ureq::Agent,
    api_root: String,
    api_key: String,
    api_secret: String,
    session_key: String,
}

impl LastFm {
    /// Opens a mobile session for the configured user
    ///
    /// Every request, this one included, is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Fails if Last.fm can't be reached or rejects the credentials.
    pub fn connect(credentials: &Credentials, timeout: Duration) -> Result<Self> {
        Self::connect_to(API_ROOT, credentials, timeout)
    }

    pub fn connect_to(api_root: &str, credentials: &Credentials, timeout: Duration) -> Result<Self> {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        let mut client = Self {
            agent,
            api_root: api_root.to_owned(),
            api_key: credentials.api_key.clone(),
            api_secret: credentials.api_secret.clone(),
            session_key: String::new(),
        };

        let session = client
            .call("auth.getMobileSession", vec![
                ("username", credentials.username.clone()),
                ("password", credentials.password.clone()),
            ])
            .context("Authenticating with Last.fm")?;
        client.session_key = session
            .pointer("/session/key")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("Last.fm session response is missing a key"))?
            .to_owned();

        Ok(client)
    }

    fn call(&self, method: &'static str, mut params: Vec<(&'static str, String)>) -> Result<Value> {
        params.push(("method", method.to_owned()));
        params.push(("api_key", self.api_key.clone()));
        let sig = api_signature(&params, &self.api_secret);
        params.push(("api_sig", sig));
        params.push(("format", "json".to_owned()));

        let form: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        // Failures come back as 4xx with an error document
        let response = match self.agent.post(&self.api_root).send_form(&form) {
            Ok(resp) | Err(ureq::Error::Status(_, resp)) => resp,
            Err(e) => return Err(e).with_context(|| format!("Last.fm request failed ({method})")),
        };
        let body: Value = response
            .into_json()
            .with_context(|| format!("Last.fm response parse failed ({method})"))?;
        check_error(body)
    }
}

impl Scrobbler for LastFm {
    fn name(&self) -> &'static str { "Last.fm" }

    fn submit(&self, listen: &ScrobbleRecord) -> Result<()> {
        let mut params = scrobble_params(listen);
        params.push(("sk", self.session_key.clone()));
        let body = self.call("track.scrobble", params)?;
        check_accepted(&body)
    }
}


/// Signs a request: every parameter except `format`, sorted by name, concatenated as name then
/// value, followed by the shared secret, hashed with MD5
fn api_signature(params: &[(&str, String)], secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(k, _)| *k != "format").collect();
    sorted.sort_unstable_by_key(|(k, _)| *k);

    let mut raw: String = sorted.iter().flat_map(|(k, v)| [*k, v.as_str()]).collect();
    raw.push_str(secret);
    format!("{:x}", md5::compute(raw))
}

fn scrobble_params(listen: &ScrobbleRecord) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("artist", listen.artist_name().to_owned()),
        ("track", listen.track_name().to_owned()),
        ("timestamp", listen.listened_at().to_string()),
    ];
    if let Some(album) = listen.release_name() {
        params.push(("album", album.to_owned()));
    }
    params
}

fn check_error(body: Value) -> Result<Value> {
    match body.get("error") {
        Some(code) => {
            let message = body.get("message").and_then(Value::as_str).unwrap_or("unknown error");
            bail!("Last.fm error {code}: {message}")
        },
        None => Ok(body),
    }
}

/// Last.fm answers 200 even when it drops a scrobble, reporting it in the `ignored` count
fn check_accepted(body: &Value) -> Result<()> {
    let ignored = body
        .pointer("/scrobbles/@attr/ignored")
        .and_then(|v| v.as_u64().or_else(|| v.as_str()?.parse().ok()))
        .unwrap_or(0);
    if ignored == 0 {
        return Ok(());
    }

    let reason = body
        .pointer("/scrobbles/scrobble/ignoredMessage/#text")
        .and_then(Value::as_str)
        .filter(|r| !r.is_empty())
        .unwrap_or("no reason given");
    bail!("Last.fm ignored the scrobble: {reason}")
}
