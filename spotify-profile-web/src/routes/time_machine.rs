use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::CookieJar;
use leptos::{IntoView, component, prelude::*};
use serde::Deserialize;
use spotify_profile_models::{TimeRange, TopArtist};
use spotify_profile_paging::PagerView;

use crate::{
    AppState,
    components::{ErrorMessage, LoadingIndicator, button_class},
    html,
    page::Page,
    routes::api::bearer_token,
    sources::TopArtistsSource,
    view::render,
};

pub(crate) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/time-machine", get(index))
        .route("/time-machine/content", get(content))
        .route("/time-machine/more", get(more))
}

async fn index() -> impl IntoResponse {
    render(html! {
        <Page active_page=Page::TimeMachine>
            <div class="flex flex-col gap-4 mx-auto w-full max-w-3xl">
                <h1 class="text-2xl font-semibold">"Your Time Machine"</h1>

                <div class="flex gap-2 items-center">
                    {TimeRange::ALL
                        .into_iter()
                        .map(|range| {
                            html! {
                                <button
                                    class="py-1 px-3 bg-gray-800 rounded-full transition-colors hover:bg-green-700"
                                    hx-get=format!("/time-machine/content?time_range={range}")
                                    hx-target="#time-machine-content"
                                    hx-indicator="#time-machine-indicator"
                                >
                                    {range.label()}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                    <LoadingIndicator id="time-machine-indicator" />
                </div>

                <div
                    id="time-machine-content"
                    hx-get="/time-machine/content"
                    hx-trigger="load"
                >
                    <p class="text-gray-400">"Loading artists..."</p>
                </div>
            </div>
        </Page>
    })
}

#[derive(Deserialize)]
struct ContentParameters {
    time_range: Option<TimeRange>,
}

async fn content(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(parameters): Query<ContentParameters>,
) -> impl IntoResponse {
    let Ok(token) = bearer_token(&jar) else {
        return render(html! { <ErrorMessage message="No access token found".to_string() /> });
    };

    let pager = state.artists_pagers.for_session(&token).await;
    let source = TopArtistsSource {
        client: state.spotify.clone(),
        token,
    };

    match parameters.time_range {
        Some(range) => pager.change_key(&source, range.as_str()).await,
        None => pager.ensure_initial(&source).await,
    }

    let view = pager.view().await;
    render(html! { <ArtistGrid view=view /> })
}

async fn more(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let Ok(token) = bearer_token(&jar) else {
        return render(html! { <ErrorMessage message="No access token found".to_string() /> });
    };

    let pager = state.artists_pagers.for_session(&token).await;
    let source = TopArtistsSource {
        client: state.spotify.clone(),
        token,
    };
    pager.load_more(&source).await;
    let view = pager.view().await;

    render(html! { <ArtistGrid view=view /> })
}

#[component]
fn artist_grid(view: PagerView<TopArtist>) -> impl IntoView {
    html! {
        <div class="flex flex-col gap-4">
            <p class="text-gray-400">{format!("Total items available: {}", view.total)}</p>

            {view.error.map(|message| html! { <ErrorMessage message=message /> })}

            <div class="grid grid-cols-1 gap-4 md:grid-cols-2 lg:grid-cols-3">
                {view
                    .items
                    .into_iter()
                    .map(|artist| {
                        html! {
                            <div class="flex flex-col gap-2 p-4 bg-gray-900 rounded shadow">
                                {artist
                                    .image
                                    .map(|url| {
                                        html! {
                                            <img
                                                src=url
                                                alt=artist.name.clone()
                                                class="object-cover w-full rounded"
                                            />
                                        }
                                    })}
                                <h3 class="text-lg font-medium">{artist.name.clone()}</h3>
                                {(!artist.genres.is_empty())
                                    .then(|| {
                                        html! {
                                            <p class="text-sm text-gray-400">
                                                {artist
                                                    .genres
                                                    .iter()
                                                    .take(3)
                                                    .cloned()
                                                    .collect::<Vec<_>>()
                                                    .join(", ")}
                                            </p>
                                        }
                                    })}
                            </div>
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
                            hx-get="/time-machine/more"
                            hx-target="#time-machine-content"
                            hx-indicator="#time-machine-indicator"
                        >
                            "Load More"
                        </button>
                    }
                })}
        </div>
    }
}
