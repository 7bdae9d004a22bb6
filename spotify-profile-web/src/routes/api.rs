use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;
use spotify_profile_models::TimeRange;

use crate::{AppState, routes::auth::ACCESS_TOKEN_COOKIE};

pub(crate) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(profile))
        .route("/api/player", get(player))
        .route("/api/albums", get(albums))
        .route("/api/time-machine", get(time_machine))
        .route("/api/album/{id}", get(album_detail))
}

/// Failure envelope for the proxy routes: always a JSON body with an `error`
/// message and an HTTP status, never a crash.
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn missing_token() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "No access token found")
    }
}

impl From<spotify_profile_client::Error> for ApiError {
    fn from(error: spotify_profile_client::Error) -> Self {
        let status = error
            .status()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        Self::new(status, error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

pub(crate) fn bearer_token(jar: &CookieJar) -> ApiResult<String> {
    jar.get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(ApiError::missing_token)
}

async fn profile(State(state): State<Arc<AppState>>, jar: CookieJar) -> ApiResult<Response> {
    let token = bearer_token(&jar)?;
    let profile = state.spotify.profile(&token).await?;

    Ok(Json(profile).into_response())
}

/// Nothing playing degrades to an empty object, not an error.
async fn player(State(state): State<Arc<AppState>>, jar: CookieJar) -> ApiResult<Response> {
    let token = bearer_token(&jar)?;

    let response = match state.spotify.player(&token).await? {
        Some(playing) => Json(playing).into_response(),
        None => Json(json!({})).into_response(),
    };

    Ok(response)
}

#[derive(Deserialize)]
struct AlbumsParameters {
    offset: Option<usize>,
    limit: Option<usize>,
}

async fn albums(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(parameters): Query<AlbumsParameters>,
) -> ApiResult<Response> {
    let token = bearer_token(&jar)?;
    let offset = parameters.offset.unwrap_or(0);
    let limit = parameters.limit.unwrap_or(20);

    match state.spotify.saved_albums(&token, offset, limit).await {
        Ok(page) => Ok(Json(page).into_response()),
        // The upstream failure envelope keeps the page shape so list views
        // can render an empty state alongside the message.
        Err(error) => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": error.to_string(),
                "items": [],
                "next": null,
                "total": 0,
            })),
        )
            .into_response()),
    }
}

#[derive(Deserialize)]
struct TimeMachineParameters {
    time_range: TimeRange,
    offset: Option<usize>,
}

async fn time_machine(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(parameters): Query<TimeMachineParameters>,
) -> ApiResult<Response> {
    let token = bearer_token(&jar)?;
    let offset = parameters.offset.unwrap_or(0);

    let page = state
        .spotify
        .top_artists(&token, parameters.time_range, offset, crate::INITIAL_PAGE_LIMIT)
        .await?;

    Ok(Json(page).into_response())
}

async fn album_detail(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let token = bearer_token(&jar)?;
    let detail = state.spotify.album_detail(&token, &id).await?;

    Ok(Json(detail).into_response())
}
