use std::fmt::Display;

use reqwest::{Method, Response, StatusCode};
use spotify_profile_models::{
    AlbumDetail, NowPlaying, Page, Profile, SavedAlbum, TimeRange, TopArtist,
};

use crate::{
    Error, Result, parse,
    spotify_models::{
        Paged, TokenResponse, album::Album, album::SavedAlbumItem, artist::Artist, player::Player,
        profile, track::Track,
    },
};

const SCOPES: &str = "user-read-private user-read-email user-top-read user-read-playback-state";

#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    api_base: String,
    accounts_base: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Client {
    let http_client = reqwest::Client::new();

    Client {
        client: http_client,
        api_base: "https://api.spotify.com/v1/".to_string(),
        accounts_base: "https://accounts.spotify.com/".to_string(),
        client_id,
        client_secret,
        redirect_uri,
    }
}

enum Endpoint {
    Profile,
    Player,
    SavedAlbums,
    TopArtists,
    Albums,
    Artists,
    Authorize,
    Token,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let endpoint = match self {
            Endpoint::Profile => "me",
            Endpoint::Player => "me/player",
            Endpoint::SavedAlbums => "me/albums",
            Endpoint::TopArtists => "me/top/artists",
            Endpoint::Albums => "albums",
            Endpoint::Artists => "artists",
            Endpoint::Authorize => "authorize",
            Endpoint::Token => "api/token",
        };

        f.write_str(endpoint)
    }
}

macro_rules! get {
    ($self:ident, $endpoint:expr, $token:expr, $params:expr) => {
        match $self.make_get_call($endpoint, $token, $params).await {
            Ok(response) => match serde_json::from_str(response.as_str()) {
                Ok(item) => Ok(item),
                Err(error) => Err(Error::DeserializeJSON {
                    message: error.to_string(),
                }),
            },
            Err(error) => Err(error),
        }
    };
}

impl Client {
    pub async fn profile(&self, token: &str) -> Result<Profile> {
        let endpoint = format!("{}{}", self.api_base, Endpoint::Profile);
        let raw: profile::Profile = get!(self, &endpoint, token, None)?;

        Ok(parse::profile(raw))
    }

    /// `None` when no player is active: the upstream answers 204 with an
    /// empty body, or a 200 whose `item` is null.
    pub async fn player(&self, token: &str) -> Result<Option<NowPlaying>> {
        let endpoint = format!("{}{}", self.api_base, Endpoint::Player);

        let response = self
            .client
            .request(Method::GET, &endpoint)
            .bearer_auth(token)
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = self.handle_response(response).await?;
        let raw: Player = serde_json::from_str(&body).map_err(|error| Error::DeserializeJSON {
            message: error.to_string(),
        })?;

        Ok(parse::now_playing(raw))
    }

    pub async fn saved_albums(
        &self,
        token: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Page<SavedAlbum>> {
        let endpoint = format!("{}{}", self.api_base, Endpoint::SavedAlbums);
        let offset = offset.to_string();
        let limit = limit.to_string();
        let params = vec![("offset", offset.as_str()), ("limit", limit.as_str())];

        let raw: Paged<SavedAlbumItem> = get!(self, &endpoint, token, Some(&params))?;

        Ok(parse::page(raw).map(parse::saved_album))
    }

    pub async fn top_artists(
        &self,
        token: &str,
        time_range: TimeRange,
        offset: usize,
        limit: usize,
    ) -> Result<Page<TopArtist>> {
        let endpoint = format!("{}{}", self.api_base, Endpoint::TopArtists);
        let offset = offset.to_string();
        let limit = limit.to_string();
        let params = vec![
            ("time_range", time_range.as_str()),
            ("limit", limit.as_str()),
            ("offset", offset.as_str()),
        ];

        let raw: Paged<Artist> = get!(self, &endpoint, token, Some(&params))?;

        Ok(parse::page(raw).map(parse::top_artist))
    }

    /// Album metadata, track listing and lead-artist image, flattened into
    /// one detail object.
    pub async fn album_detail(&self, token: &str, album_id: &str) -> Result<AlbumDetail> {
        let album_endpoint = format!("{}{}/{}", self.api_base, Endpoint::Albums, album_id);
        let album: Album = get!(self, &album_endpoint, token, None)?;

        let tracks_endpoint = format!("{album_endpoint}/tracks");
        let tracks: Paged<Track> = get!(self, &tracks_endpoint, token, None)?;

        let lead_artist_id = album.artists.first().and_then(|artist| artist.id.clone());
        let artist = match lead_artist_id {
            Some(id) => {
                let artist_endpoint = format!("{}{}/{}", self.api_base, Endpoint::Artists, id);
                let artist: Artist = get!(self, &artist_endpoint, token, None)?;
                Some(artist)
            }
            None => None,
        };

        Ok(parse::album_detail(album, tracks.items, artist))
    }

    /// Authorization-code entry URL the browser is redirected to.
    pub fn authorize_url(&self) -> String {
        let endpoint = format!("{}{}", self.accounts_base, Endpoint::Authorize);
        let mut url = url::Url::parse(&endpoint).expect("static base url");

        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", SCOPES);

        url.to_string()
    }

    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        let params = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        self.token_request(&params).await
    }

    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        let params = vec![
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        self.token_request(&params).await
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let endpoint = format!("{}{}", self.accounts_base, Endpoint::Token);

        debug!("calling {} endpoint", endpoint);
        let response = self
            .client
            .request(Method::POST, &endpoint)
            .form(params)
            .send()
            .await?;

        if !response.status().is_success() {
            error!("token exchange failed with status {}", response.status());
            return Err(Error::TokenExchange {
                message: response.status().to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|error| Error::DeserializeJSON {
            message: error.to_string(),
        })
    }

    async fn make_get_call(
        &self,
        endpoint: &str,
        token: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<String> {
        debug!("calling {} endpoint, with params {params:?}", endpoint);
        let request = self
            .client
            .request(Method::GET, endpoint)
            .bearer_auth(token);

        if let Some(p) = params {
            let response = request.query(&p).send().await?;
            self.handle_response(response).await
        } else {
            let response = request.send().await?;
            self.handle_response(response).await
        }
    }

    async fn handle_response(&self, response: Response) -> Result<String> {
        let status = response.status();

        if status.is_success() {
            Ok(response.text().await?)
        } else {
            Err(Error::Upstream {
                status: status.as_u16(),
            })
        }
    }
}
