//! Index view: login prompt, dashboard, or denial depending on the visitor.

use askama::Template;
use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{resolve_access, Access, SESSION_COOKIE};
use crate::errors::AppError;
use crate::AppState;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    message: String,
}

#[derive(Template)]
#[template(path = "index.html")]
struct DashboardTemplate {
    display_name: String,
    user_id: String,
    guild_count: usize,
}

#[derive(Template)]
#[template(path = "denied.html")]
struct DeniedTemplate;

/// GET / - login prompt, access-denied view, or the admin dashboard.
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let session = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.get(cookie.value()));

    match resolve_access(session.as_ref()) {
        Access::Unauthenticated => {
            let view = LoginTemplate {
                message: String::new(),
            };
            Ok(super::render(&view)?.into_response())
        }
        Access::Denied(user) => {
            tracing::info!(user = %user.id, "non-admin visitor on index");
            Ok((StatusCode::FORBIDDEN, super::render(&DeniedTemplate)?).into_response())
        }
        Access::Admin(user) => {
            let view = DashboardTemplate {
                display_name: user.display_name,
                user_id: user.id,
                guild_count: user.guilds.len(),
            };
            Ok(super::render(&view)?.into_response())
        }
    }
}
