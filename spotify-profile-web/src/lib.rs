use std::sync::Arc;

use axum::Router;
use routes::{album, api, auth, dashboard, time_machine};
use spotify_profile_client::Client;
use spotify_profile_models::{SavedAlbum, TimeRange, TopArtist};
use spotify_profile_paging::SessionPagers;

mod components;
mod page;
mod routes;
mod sources;
mod view;

/// Page size requested from the upstream on every fetch. The pager strides by
/// 10 after the first page; the mismatch is inherited from the call sites and
/// kept.
pub(crate) const INITIAL_PAGE_LIMIT: usize = 8;

pub(crate) const SAVED_ALBUMS_KEY: &str = "saved";

pub async fn init(interface: String, spotify: Arc<Client>) {
    let listener = tokio::net::TcpListener::bind(&interface).await.unwrap();
    tracing::info!("listening on {interface}");

    let router = create_router(spotify).await;

    axum::serve(listener, router).await.unwrap();
}

async fn create_router(spotify: Arc<Client>) -> Router {
    let shared_state = Arc::new(AppState {
        spotify,
        albums_pagers: SessionPagers::new(SAVED_ALBUMS_KEY, None),
        artists_pagers: SessionPagers::new(TimeRange::MediumTerm.as_str(), None),
    });

    axum::Router::new()
        .merge(dashboard::routes())
        .merge(album::routes())
        .merge(time_machine::routes())
        .layer(axum::middleware::from_fn(auth::auth_middleware))
        .merge(auth::routes())
        .merge(api::routes())
        .with_state(shared_state)
}

/// Pagination state is scoped to the session whose cookie carries the bearer
/// token; only the upstream client is truly process-wide.
pub(crate) struct AppState {
    pub spotify: Arc<Client>,
    pub albums_pagers: SessionPagers<SavedAlbum>,
    pub artists_pagers: SessionPagers<TopArtist>,
}
