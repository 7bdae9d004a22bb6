use std::sync::Arc;

use clap::Parser;
use snafu::prelude::*;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Spotify application client id.
    #[clap(long, env = "SPOTIFY_CLIENT_ID")]
    client_id: String,

    /// Spotify application client secret.
    #[clap(long, env = "SPOTIFY_CLIENT_SECRET")]
    client_secret: String,

    /// Redirect URI registered for the application; must point at this
    /// server's /api/auth route.
    #[clap(long, env = "SPOTIFY_REDIRECT_URI")]
    redirect_uri: String,

    #[clap(short, long)]
    /// Log level
    verbosity: Option<tracing::Level>,

    #[clap(long, default_value = "0.0.0.0:3000")]
    /// Specify a different interface and port for the web server to listen on.
    interface: String,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{error}"))]
    ClientError { error: String },
}

impl From<spotify_profile_client::Error> for Error {
    fn from(error: spotify_profile_client::Error) -> Self {
        Error::ClientError {
            error: error.to_string(),
        }
    }
}

pub async fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_target(false)
        .compact()
        .init();

    let client = Arc::new(spotify_profile_client::client::new(
        cli.client_id,
        cli.client_secret,
        cli.redirect_uri,
    ));

    spotify_profile_web::init(cli.interface, client).await;

    Ok(())
}
