use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::CookieJar;
use leptos::{IntoView, component, prelude::*};
use spotify_profile_models::{NowPlaying, Profile, SavedAlbum};
use spotify_profile_paging::PagerView;

use crate::{
    AppState,
    components::{ErrorMessage, button_class},
    html,
    page::Page,
    routes::api::bearer_token,
    sources::SavedAlbumsSource,
    view::render,
};

pub(crate) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(index))
        .route("/dashboard/profile", get(profile_partial))
        .route("/dashboard/player", get(player_partial))
        .route("/dashboard/albums", get(albums_partial))
        .route("/dashboard/albums/more", get(albums_more))
}

async fn index() -> impl IntoResponse {
    render(html! {
        <Page active_page=Page::Dashboard>
            <div class="flex flex-col gap-4 mx-auto w-full max-w-3xl">
                <div hx-get="/dashboard/profile" hx-target="this" hx-trigger="load">
                    <p class="text-gray-400">"Loading profile..."</p>
                </div>
                <div hx-get="/dashboard/player" hx-target="this" hx-trigger="load, every 5s"></div>
                <div hx-get="/dashboard/albums" hx-target="this" hx-trigger="load">
                    <p class="text-gray-400">"Loading albums..."</p>
                </div>
            </div>
        </Page>
    })
}

async fn profile_partial(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let Ok(token) = bearer_token(&jar) else {
        return render(html! { <ErrorMessage message="No access token found".to_string() /> });
    };

    match state.spotify.profile(&token).await {
        Ok(profile) => render(html! { <ProfileCard profile=profile /> }),
        Err(error) => render(html! { <ErrorMessage message=error.to_string() /> }),
    }
}

async fn player_partial(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let Ok(token) = bearer_token(&jar) else {
        return render(html! { <ErrorMessage message="No access token found".to_string() /> });
    };

    match state.spotify.player(&token).await {
        Ok(playing) => render(html! { <PlayerCard playing=playing /> }),
        Err(error) => render(html! { <ErrorMessage message=error.to_string() /> }),
    }
}

async fn albums_partial(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let Ok(token) = bearer_token(&jar) else {
        return render(html! { <ErrorMessage message="No access token found".to_string() /> });
    };

    let pager = state.albums_pagers.for_session(&token).await;
    let source = SavedAlbumsSource {
        client: state.spotify.clone(),
        token,
    };
    pager.ensure_initial(&source).await;
    let view = pager.view().await;

    render(html! { <AlbumsCard view=view /> })
}

async fn albums_more(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let Ok(token) = bearer_token(&jar) else {
        return render(html! { <ErrorMessage message="No access token found".to_string() /> });
    };

    let pager = state.albums_pagers.for_session(&token).await;
    let source = SavedAlbumsSource {
        client: state.spotify.clone(),
        token,
    };
    pager.load_more(&source).await;
    let view = pager.view().await;

    render(html! { <AlbumsCard view=view /> })
}

#[component]
fn profile_card(profile: Profile) -> impl IntoView {
    html! {
        <div class="flex gap-4 items-center p-4 bg-gray-900 rounded-lg">
            {profile
                .avatar_url
                .map(|url| {
                    html! {
                        <img src=url alt="avatar" class="object-cover rounded-full size-16" />
                    }
                })}
            <div class="flex flex-col">
                <span class="text-xl font-semibold">{profile.display_name}</span>
                {profile.email.map(|email| html! { <span class="text-gray-400">{email}</span> })}
                {profile
                    .product
                    .map(|product| html! { <span class="text-sm text-green-500">{product}</span> })}
                {profile
                    .profile_url
                    .map(|url| {
                        html! {
                            <a href=url class="text-sm text-gray-400 underline">
                                "Open in Spotify"
                            </a>
                        }
                    })}
            </div>
        </div>
    }
}

#[component]
fn player_card(playing: Option<NowPlaying>) -> impl IntoView {
    html! {
        <div class="flex gap-4 items-center p-4 bg-gray-900 rounded-lg">
            {match playing {
                Some(playing) => {
                    html! {
                        <>
                            {playing
                                .album_art
                                .map(|url| {
                                    html! {
                                        <img
                                            src=url
                                            alt=playing.album.clone()
                                            class="object-cover rounded size-16"
                                        />
                                    }
                                })}
                            <div class="flex flex-col">
                                <span class="font-semibold">{playing.track}</span>
                                <span class="text-gray-400">{playing.artists}</span>
                                {playing
                                    .device
                                    .map(|device| {
                                        html! {
                                            <span class="text-sm text-gray-500">
                                                {format!("Playing on {device}")}
                                            </span>
                                        }
                                    })}
                            </div>
                        </>
                    }
                        .into_any()
                }
                None => html! { <p class="text-gray-400">"Nothing playing right now."</p> }
                    .into_any(),
            }}
        </div>
    }
}

#[component]
fn albums_card(view: PagerView<SavedAlbum>) -> impl IntoView {
    html! {
        <div id="albums-card" class="flex flex-col gap-4 p-4 bg-gray-900 rounded-lg">
            <h2 class="text-lg font-semibold">"Saved albums"</h2>

            {view.error.map(|message| html! { <ErrorMessage message=message /> })}

            <div class="grid grid-cols-2 gap-4 sm:grid-cols-4">
                {view
                    .items
                    .into_iter()
                    .map(|album| {
                        html! {
                            <a
                                href=format!("/album/{}", album.id)
                                class="flex flex-col gap-2"
                            >
                                {album
                                    .image
                                    .map(|url| {
                                        html! {
                                            <img
                                                src=url
                                                alt=album.title.clone()
                                                class="object-cover w-full rounded"
                                            />
                                        }
                                    })}
                                <span class="text-sm font-medium">{album.title.clone()}</span>
                                <span class="text-xs text-gray-400">{album.artist.clone()}</span>
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>

            {view
                .has_more
                .then(|| {
                    html! {
                        <button
                            class=button_class()
                            hx-get="/dashboard/albums/more"
                            hx-target="#albums-card"
                            hx-swap="outerHTML"
                        >
                            "Load More"
                        </button>
                    }
                })}
        </div>
    }
}
