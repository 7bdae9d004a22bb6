use serde::{Deserialize, Serialize};

use super::{Copyright, ExternalUrls, Image, artist::ArtistRef};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub copyrights: Vec<Copyright>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub total_tracks: u32,
}

/// Library entry wrapping an album, as returned by the saved-albums endpoint.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAlbumItem {
    pub added_at: Option<String>,
    pub album: Album,
}
