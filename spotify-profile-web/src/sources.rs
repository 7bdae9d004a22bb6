use std::sync::Arc;

use spotify_profile_client::Client;
use spotify_profile_models::{Page, SavedAlbum, TimeRange, TopArtist};
use spotify_profile_paging::{PageError, PageSource, Result};

/// Saved-albums page source; the key is the single implicit library key.
pub(crate) struct SavedAlbumsSource {
    pub client: Arc<Client>,
    pub token: String,
}

#[async_trait::async_trait]
impl PageSource<SavedAlbum> for SavedAlbumsSource {
    async fn fetch_page(&self, _key: &str, offset: usize) -> Result<Page<SavedAlbum>> {
        self.client
            .saved_albums(&self.token, offset, crate::INITIAL_PAGE_LIMIT)
            .await
            .map_err(|error| PageError::Fetch {
                message: error.to_string(),
            })
    }
}

/// Top-artists page source, keyed by the time-window id.
pub(crate) struct TopArtistsSource {
    pub client: Arc<Client>,
    pub token: String,
}

#[async_trait::async_trait]
impl PageSource<TopArtist> for TopArtistsSource {
    async fn fetch_page(&self, key: &str, offset: usize) -> Result<Page<TopArtist>> {
        let time_range: TimeRange = key.parse().map_err(|_| PageError::Fetch {
            message: format!("unknown time range: {key}"),
        })?;

        self.client
            .top_artists(&self.token, time_range, offset, crate::INITIAL_PAGE_LIMIT)
            .await
            .map_err(|error| PageError::Fetch {
                message: error.to_string(),
            })
    }
}
