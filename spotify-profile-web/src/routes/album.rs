use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::CookieJar;
use leptos::{IntoView, component, prelude::*};
use spotify_profile_models::AlbumDetail;

use crate::{
    AppState,
    components::{ErrorMessage, parse_duration},
    html,
    page::Page,
    routes::api::bearer_token,
    view::{LazyLoadComponent, render},
};

pub(crate) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/album/{id}", get(index))
        .route("/album/{id}/content", get(content))
}

async fn index(Path(id): Path<String>) -> impl IntoResponse {
    let url = format!("/album/{id}/content");

    render(html! {
        <Page active_page=Page::None>
            <LazyLoadComponent url=url />
        </Page>
    })
}

async fn content(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Ok(token) = bearer_token(&jar) else {
        return render(html! { <ErrorMessage message="No access token found".to_string() /> });
    };

    match state.spotify.album_detail(&token, &id).await {
        Ok(detail) => render(html! { <Album detail=detail /> }),
        Err(error) => {
            tracing::warn!("album {id} failed to load: {error}");
            render(html! { <ErrorMessage message="No album found".to_string() /> })
        }
    }
}

#[component]
fn album(detail: AlbumDetail) -> impl IntoView {
    html! {
        <div class="flex flex-col gap-6 mx-auto w-full max-w-3xl">
            <div class="flex flex-wrap gap-4 items-end">
                {detail
                    .image
                    .map(|url| {
                        html! {
                            <img
                                src=url
                                alt=detail.name.clone()
                                class="object-contain rounded-lg size-48"
                            />
                        }
                    })}
                <div class="flex flex-col gap-2">
                    <span class="text-2xl font-semibold">{detail.name.clone()}</span>
                    <div class="flex gap-2 items-center">
                        {detail
                            .artist_image
                            .map(|url| {
                                html! {
                                    <img
                                        src=url
                                        alt=detail.main_artist.clone()
                                        class="object-cover rounded-full size-8"
                                    />
                                }
                            })}
                        <span class="text-gray-400">{detail.main_artist.clone()}</span>
                    </div>
                    <span class="flex gap-2 text-sm text-gray-400">
                        {detail.release_date.map(|date| html! { <span>{date}</span> })}
                        <span>"•︎"</span>
                        <span>{format!("{} tracks", detail.total_tracks)}</span>
                    </span>
                </div>
            </div>

            <table class="w-full text-left">
                <thead>
                    <tr class="text-sm text-gray-400 border-b border-gray-800">
                        <th class="py-2">"#"</th>
                        <th class="py-2">"Title"</th>
                        <th class="py-2">"Artists"</th>
                        <th class="py-2 text-right">"Duration"</th>
                    </tr>
                </thead>
                <tbody>
                    {detail
                        .tracks
                        .into_iter()
                        .enumerate()
                        .map(|(index, track)| {
                            html! {
                                <tr class="border-b border-gray-900">
                                    <td class="py-2 text-gray-500">{index + 1}</td>
                                    <td class="py-2">{track.name.clone()}</td>
                                    <td class="py-2 text-gray-400">{track.artists.clone()}</td>
                                    <td class="py-2 text-right text-gray-400">
                                        {parse_duration(track.duration_ms).to_string()}
                                    </td>
                                </tr>
                            }
                        })
                        .collect::<Vec<_>>()}
                </tbody>
            </table>

            {detail
                .copyright
                .map(|text| html! { <p class="text-xs text-gray-500">{text}</p> })}
        </div>
    }
}
