use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{Query, Request, State},
    http::{Response, StatusCode},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState, html,
    page::{ConnectPrompt, UnauthorizedPage},
    view::render,
};

pub(crate) const ACCESS_TOKEN_COOKIE: &str = "spotify_token";
pub(crate) const REFRESH_TOKEN_COOKIE: &str = "spotify_refresh_token";

/// Page prefixes that require a present access-token cookie.
const PROTECTED_ROUTES: [&str; 3] = ["/dashboard", "/album", "/time-machine"];

pub(crate) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/api/auth", get(oauth_entry))
        .route("/api/auth/get-token", get(get_token))
        .route("/api/auth/token", get(refresh_token))
        .route("/api/auth/logout", post(logout))
}

/// Redirects requests for protected pages to the entry page when no access
/// token is stored. API routes stay outside this layer and fail closed with
/// 401 on their own.
pub(crate) async fn auth_middleware(
    jar: CookieJar,
    request: Request,
    next: axum::middleware::Next,
) -> Response<Body> {
    let token = jar.get(ACCESS_TOKEN_COOKIE);

    if is_protected(request.uri().path()) && token.is_none() {
        return (
            StatusCode::FOUND,
            [(
                axum::http::header::LOCATION,
                axum::http::HeaderValue::from_static("/"),
            )],
        )
            .into_response();
    }

    next.run(request).await
}

fn is_protected(path: &str) -> bool {
    PROTECTED_ROUTES
        .iter()
        .any(|route| path == *route || path.starts_with(&format!("{route}/")))
}

/// Entry page; an already-authenticated browser is sent straight to the
/// dashboard.
async fn index(jar: CookieJar) -> axum::response::Response {
    if jar.get(ACCESS_TOKEN_COOKIE).is_some() {
        return Redirect::to("/dashboard").into_response();
    }

    render(html! {
        <UnauthorizedPage>
            <ConnectPrompt />
        </UnauthorizedPage>
    })
}

#[derive(Deserialize)]
struct OAuthCallbackParameters {
    code: Option<String>,
}

/// Without a `code`, redirect the browser to the upstream authorization page;
/// with one, exchange it for tokens and store them in HTTP-only cookies.
async fn oauth_entry(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(parameters): Query<OAuthCallbackParameters>,
) -> axum::response::Response {
    let Some(code) = parameters.code else {
        return Redirect::to(&state.spotify.authorize_url()).into_response();
    };

    match state.spotify.exchange_code(&code).await {
        Ok(tokens) => {
            let mut jar = jar.add(access_token_cookie(&tokens.access_token, tokens.expires_in));

            if let Some(refresh) = &tokens.refresh_token {
                jar = jar.add(token_cookie(REFRESH_TOKEN_COOKIE, refresh, None));
            }

            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(error) => {
            tracing::error!("code exchange failed: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to get access token" })),
            )
                .into_response()
        }
    }
}

/// Echoes the stored access token (empty string when absent) for clients
/// that talk to the upstream directly.
async fn get_token(jar: CookieJar) -> Json<serde_json::Value> {
    let token = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default();

    Json(json!({ "token": token }))
}

/// Independent refresh capability: exchanges the stored refresh token for a
/// fresh access token. Nothing invokes this automatically.
async fn refresh_token(State(state): State<Arc<AppState>>, jar: CookieJar) -> axum::response::Response {
    let Some(refresh) = jar.get(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string()) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "No refresh token found" })),
        )
            .into_response();
    };

    match state.spotify.refresh_access_token(&refresh).await {
        Ok(tokens) => {
            let jar = jar.add(access_token_cookie(&tokens.access_token, tokens.expires_in));
            (jar, Json(json!({ "access_token": tokens.access_token }))).into_response()
        }
        Err(error) => {
            tracing::error!("token refresh failed: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to refresh token" })),
            )
                .into_response()
        }
    }
}

async fn logout(jar: CookieJar) -> axum::response::Response {
    let jar = jar
        .remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_TOKEN_COOKIE).path("/"));

    (
        jar,
        [("HX-Redirect", "/")],
        Json(json!({ "message": "Logged out successfully" })),
    )
        .into_response()
}

fn access_token_cookie(token: &str, expires_in: i64) -> Cookie<'static> {
    token_cookie(
        ACCESS_TOKEN_COOKIE,
        token,
        Some(time::Duration::seconds(expires_in)),
    )
}

fn token_cookie(name: &'static str, value: &str, max_age: Option<time::Duration>) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value.to_string());
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");

    if let Some(max_age) = max_age {
        cookie.set_max_age(max_age);
    }

    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_matches_prefixes_not_substrings() {
        assert!(is_protected("/dashboard"));
        assert!(is_protected("/dashboard/albums/more"));
        assert!(is_protected("/album/2up3OPMp9Tb4dAKM2erWXQ"));
        assert!(is_protected("/time-machine/content"));

        assert!(!is_protected("/"));
        assert!(!is_protected("/api/auth"));
        assert!(!is_protected("/albums"));
        assert!(!is_protected("/dashboardia"));
    }

    #[test]
    fn access_cookie_is_http_only_and_expiring() {
        let cookie = access_token_cookie("abc", 3600);

        assert_eq!(cookie.name(), ACCESS_TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
    }

    #[test]
    fn refresh_cookie_has_no_max_age() {
        let cookie = token_cookie(REFRESH_TOKEN_COOKIE, "r", None);

        assert_eq!(cookie.max_age(), None);
        assert_eq!(cookie.http_only(), Some(true));
    }
}
