use std::{
    net::SocketAddr,
    path::PathBuf,
};

use clap::{
    arg,
    ArgGroup,
    Args as _,
    Command,
    FromArgMatches,
    Parser,
};
use uuid::Uuid;

/// Forward completed Plex music plays to a scrobbling service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Address to accept webhook deliveries on
    #[arg(short, long, env = "PLEX_SCROBBLER_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// TOML file with service credentials, preferred over flags and environment when it exists
    #[arg(short, long, env = "PLEX_SCROBBLER_CONFIG", default_value = "config.toml")]
    pub config: PathBuf,

    /// Seconds to wait on the scrobbling service before giving up on a request
    #[arg(long, default_value_t = 10)]
    pub submit_timeout: u64,

    /// The service to submit scrobbles to
    #[command(flatten)]
    pub service: Service,
}

#[derive(Debug)]
pub(crate) enum Service {
    LastFm(LastFmArgs),
    ListenBrainz(ListenBrainzArgs),
}

impl clap::Args for Service {
    fn augment_args(cmd: clap::Command) -> clap::Command {
        const HEADING: &str = "Services";
        cmd.group(ArgGroup::new("service").args(["lastfm", "listenbrainz"]))
            .arg(
                arg!(--lastfm)
                    .help_heading(HEADING)
                    .help("Scrobble to Last.fm [default]"),
            )
            .arg(
                arg!(--listenbrainz)
                    .help_heading(HEADING)
                    .help("Submit listens to a listenbrainz compatible service"),
            )
            .args(
                LastFmArgs::augment_args(Command::new(""))
                    .get_arguments()
                    .cloned()
                    .map(|a| a.help_heading("Last.fm Options")),
            )
            .args(
                ListenBrainzArgs::augment_args(Command::new(""))
                    .get_arguments()
                    .cloned()
                    .map(|a| a.help_heading("ListenBrainz Options")),
            )
    }

    fn augment_args_for_update(cmd: clap::Command) -> clap::Command { Self::augment_args(cmd) }

    fn group_id() -> Option<clap::Id> { Some("service".into()) }
}

impl clap::FromArgMatches for Service {
    fn from_arg_matches(matches: &clap::ArgMatches) -> std::result::Result<Self, clap::Error> {
        if matches.get_flag("listenbrainz") {
            Ok(Self::ListenBrainz(ListenBrainzArgs::from_arg_matches(matches)?))
        } else {
            Ok(Self::LastFm(LastFmArgs::from_arg_matches(matches)?))
        }
    }

    fn update_from_arg_matches(&mut self, matches: &clap::ArgMatches) -> std::result::Result<(), clap::Error> {
        match self {
            Service::LastFm(ref mut a) => a.update_from_arg_matches(matches),
            Service::ListenBrainz(ref mut a) => a.update_from_arg_matches(matches),
        }
    }
}

#[derive(clap::Args, Debug, Default)]
pub(crate) struct LastFmArgs {
    /// Last.fm API key
    #[arg(long = "lastfm-api-key", env = "LASTFM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Last.fm API shared secret
    #[arg(long = "lastfm-api-secret", env = "LASTFM_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    /// Last.fm account name
    #[arg(long = "lastfm-username", env = "LASTFM_USERNAME")]
    pub username: Option<String>,

    /// Last.fm account password
    #[arg(long = "lastfm-password", env = "LASTFM_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(clap::Args, Debug, Default)]
pub(crate) struct ListenBrainzArgs {
    /// ListenBrainz API token
    #[arg(short, long, env = "LISTENBRAINZ_TOKEN", hide_env_values = true)]
    pub token: Option<Uuid>,

    /// Url of the listenbrainz compatible API to submit to
    #[arg(short, long)]
    pub url: Option<String>,
}
