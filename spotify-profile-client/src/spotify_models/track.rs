use serde::{Deserialize, Serialize};

use super::artist::ArtistRef;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub track_number: Option<u32>,
}
