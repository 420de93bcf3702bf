//! Login, OAuth callback, and logout.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::auth::{Session, SESSION_COOKIE};
use crate::errors::AppError;
use crate::models::AuthenticatedUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: String,
    state: String,
}

/// GET /login/ - record a pending login and send the browser to Discord.
pub async fn login(State(state): State<AppState>) -> Redirect {
    let login_state = state.sessions.begin_login("/");
    Redirect::to(&state.discord.authorize_url(&login_state))
}

/// GET /callback/ - complete the OAuth flow.
///
/// Validates the `state` token, exchanges the code, fetches the profile and
/// guild memberships once, and stores them in a new session. The welcome DM
/// is best-effort.
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<(CookieJar, Redirect), AppError> {
    let redirect_target = state
        .sessions
        .take_login(&query.state)
        .ok_or_else(|| AppError::Unauthorized("unknown or reused login state".to_string()))?;

    let token = state.discord.exchange_code(&query.code).await?;
    let profile = state.discord.fetch_user(&token.access_token).await?;
    let guilds = state.discord.fetch_guilds(&token.access_token).await?;
    let user = AuthenticatedUser::from_discord(&profile, &guilds);

    if let Err(err) = state
        .discord
        .send_welcome_dm(&user.id, &user.display_name)
        .await
    {
        tracing::warn!(user = %user.id, "welcome DM failed: {}", err);
    }

    tracing::info!(user = %user.id, name = %user.display_name, "login completed");

    let expires_at = Utc::now() + Duration::seconds(token.expires_in);
    let session_id = state
        .sessions
        .insert(Session::new(token.access_token, expires_at, user));

    let cookie = Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .build();

    Ok((jar.add(cookie), Redirect::to(&redirect_target)))
}

/// GET /logout/ - revoke the session unconditionally and return to the index.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Some(session) = state.sessions.remove(cookie.value()) {
            if let Err(err) = state.discord.revoke_token(&session.access_token).await {
                tracing::warn!(user = %session.user.id, "token revocation failed: {}", err);
            }
        }
    }

    let removal = Cookie::build(SESSION_COOKIE).path("/").build();
    (jar.remove(removal), Redirect::to("/"))
}
