use std::{
    fmt,
    fs,
    io,
    net::SocketAddr,
    path::{
        Path,
        PathBuf,
    },
    sync::Arc,
    time::Duration,
};

use anyhow::{
    bail,
    Context,
    Result,
};
use plex_scrobbler_services::service::{
    lastfm::Credentials,
    LastFm,
    ListenBrainz,
    Scrobbler,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::args::{
    Args,
    LastFmArgs,
    ListenBrainzArgs,
    Service,
};


/// Settings resolved once at startup
#[derive(Debug)]
pub(crate) struct Config {
    pub bind: SocketAddr,
    pub submit_timeout: Duration,
    pub backend: Backend,
    pub source: Source,
}

#[derive(Debug, Clone)]
pub(crate) enum Backend {
    LastFm(Credentials),
    ListenBrainz { token: Uuid, url: Option<String> },
}

/// Where the service credentials came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Source {
    File(PathBuf),
    Environment,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Environment => f.write_str("environment"),
        }
    }
}


#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    lastfm: Option<LastFmSection>,
    listenbrainz: Option<ListenBrainzSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LastFmSection {
    api_key: Option<String>,
    api_secret: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListenBrainzSection {
    token: Option<Uuid>,
    url: Option<String>,
}

impl FileConfig {
    /// Reads `path` if it exists
    ///
    /// # Errors
    ///
    /// A file that exists but can't be read or parsed is an error, not a fallback.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).with_context(|| path.display().to_string()).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| path.display().to_string()),
        }
    }

    pub fn parse(text: &str) -> Result<Self> { toml::from_str(text).map_err(Into::into) }
}


impl Config {
    /// Merges command line and environment settings with the config file, if any
    ///
    /// # Errors
    ///
    /// Fails when the config file is unreadable or a required credential is missing everywhere.
    pub fn resolve(args: Args) -> Result<Self> {
        let file = FileConfig::load(&args.config)?;
        Self::from_parts(args, file)
    }

    pub fn from_parts(args: Args, file: Option<FileConfig>) -> Result<Self> {
        let (backend, from_file) = match args.service {
            Service::LastFm(lastfm) => {
                let section = file.and_then(|f| f.lastfm);
                let from_file = section.is_some();
                (lastfm_backend(lastfm, section.unwrap_or_default())?, from_file)
            },
            Service::ListenBrainz(lb) => {
                let section = file.and_then(|f| f.listenbrainz);
                let from_file = section.is_some();
                (listenbrainz_backend(lb, section.unwrap_or_default())?, from_file)
            },
        };

        Ok(Self {
            bind: args.bind,
            submit_timeout: Duration::from_secs(args.submit_timeout),
            backend,
            source: if from_file { Source::File(args.config) } else { Source::Environment },
        })
    }
}

impl Backend {
    /// Opens a connection to the configured service. Blocks on network I/O.
    pub fn connect(self, timeout: Duration) -> Result<Arc<dyn Scrobbler>> {
        let scrobbler: Arc<dyn Scrobbler> = match self {
            Backend::LastFm(credentials) => Arc::new(LastFm::connect(&credentials, timeout)?),
            Backend::ListenBrainz { token, url } => Arc::new(ListenBrainz::connect(url.as_deref(), &token)?),
        };
        Ok(scrobbler)
    }
}


fn lastfm_backend(args: LastFmArgs, file: LastFmSection) -> Result<Backend> {
    let mut missing = Vec::new();
    let mut require = |name: &'static str, file: Option<String>, arg: Option<String>| {
        file.or(arg).filter(|v| !v.is_empty()).unwrap_or_else(|| {
            missing.push(name);
            String::new()
        })
    };

    let credentials = Credentials {
        api_key: require("LASTFM_API_KEY", file.api_key, args.api_key),
        api_secret: require("LASTFM_API_SECRET", file.api_secret, args.api_secret),
        username: require("LASTFM_USERNAME", file.username, args.username),
        password: require("LASTFM_PASSWORD", file.password, args.password),
    };

    if !missing.is_empty() {
        bail!("Missing required settings: {}", missing.join(", "));
    }
    Ok(Backend::LastFm(credentials))
}

fn listenbrainz_backend(args: ListenBrainzArgs, file: ListenBrainzSection) -> Result<Backend> {
    let Some(token) = file.token.or(args.token) else {
        bail!("Missing required settings: LISTENBRAINZ_TOKEN");
    };
    Ok(Backend::ListenBrainz {
        token,
        url: file.url.or(args.url),
    })
}
