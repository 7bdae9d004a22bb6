use serde::{Deserialize, Serialize};

use super::{Image, artist::ArtistRef};

/// Playback state. The upstream responds 204 with no body at all when there
/// is no active player; `item` can still be null inside a 200.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub device: Option<Device>,
    pub item: Option<PlayingItem>,
    #[serde(default)]
    pub is_playing: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayingItem {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: PlayingAlbum,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayingAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}
