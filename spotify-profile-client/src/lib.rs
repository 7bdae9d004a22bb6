#[macro_use]
extern crate tracing;

use snafu::prelude::*;

pub mod client;
pub mod parse;
pub mod spotify_models;

pub use client::Client;

#[derive(Snafu, Debug)]
pub enum Error {
    #[snafu(display("{message}"))]
    Api { message: String },
    #[snafu(display("failed to deserialize response: {message}"))]
    DeserializeJSON { message: String },
    #[snafu(display("upstream request failed with status {status}"))]
    Upstream { status: u16 },
    #[snafu(display("token exchange failed: {message}"))]
    TokenExchange { message: String },
}

impl Error {
    /// Upstream HTTP status, where the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Upstream { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Api {
            message: value.to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
