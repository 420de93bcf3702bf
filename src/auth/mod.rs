//! Session-based authorization.
//!
//! The policy itself is a pure function over the guild memberships already
//! cached in the session; handlers and the admin middleware match on the
//! resulting `Access` variant instead of catching exceptions.

mod session;

pub use session::*;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::errors::AppError;
use crate::models::AuthenticatedUser;
use crate::AppState;

/// The community whose administrators may use the dashboard.
pub const INSTITUTE_GUILD_ID: u64 = 819_751_859_945_996_300;

/// Where a request stands in the per-request state machine.
#[derive(Debug, Clone)]
pub enum Access {
    /// No session, or an expired one
    Unauthenticated,
    /// Logged in, but not an institute administrator
    Denied(AuthenticatedUser),
    /// Logged in as an institute administrator
    Admin(AuthenticatedUser),
}

/// True iff the user holds the administrator flag in the institute server.
/// Pure; a user with no memberships is simply not authorized.
pub fn is_authorized(user: &AuthenticatedUser) -> bool {
    user.guilds
        .iter()
        .any(|guild| guild.guild_id == INSTITUTE_GUILD_ID && guild.is_administrator)
}

/// Classify the current visitor from their (possibly absent) session.
pub fn resolve_access(session: Option<&Session>) -> Access {
    match session {
        None => Access::Unauthenticated,
        Some(session) if is_authorized(&session.user) => Access::Admin(session.user.clone()),
        Some(session) => Access::Denied(session.user.clone()),
    }
}

/// Middleware guarding the admin-only routes. Anything short of an admin
/// session is bounced back to the index, which renders the login prompt or
/// the denial view.
pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let session = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.get(cookie.value()));

    match resolve_access(session.as_ref()) {
        Access::Admin(user) => {
            tracing::debug!(user = %user.id, path = %request.uri().path(), "admin access granted");
            next.run(request).await
        }
        Access::Denied(user) => {
            tracing::info!(user = %user.id, path = %request.uri().path(), "admin access refused");
            AppError::AccessDenied(format!(
                "user {} is not an institute administrator",
                user.id
            ))
            .into_response()
        }
        Access::Unauthenticated => {
            AppError::Unauthorized("no session for admin route".to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GuildMembership;
    use chrono::{Duration, Utc};

    fn user(guilds: Vec<GuildMembership>) -> AuthenticatedUser {
        AuthenticatedUser {
            id: "100".to_string(),
            display_name: "tester".to_string(),
            guilds,
        }
    }

    #[test]
    fn test_admin_of_institute_is_authorized() {
        let user = user(vec![GuildMembership {
            guild_id: INSTITUTE_GUILD_ID,
            is_administrator: true,
        }]);
        assert!(is_authorized(&user));
    }

    #[test]
    fn test_member_of_institute_is_not_authorized() {
        let user = user(vec![GuildMembership {
            guild_id: INSTITUTE_GUILD_ID,
            is_administrator: false,
        }]);
        assert!(!is_authorized(&user));
    }

    #[test]
    fn test_admin_of_other_guild_is_not_authorized() {
        let user = user(vec![GuildMembership {
            guild_id: 1,
            is_administrator: true,
        }]);
        assert!(!is_authorized(&user));
    }

    #[test]
    fn test_no_memberships_is_not_authorized() {
        assert!(!is_authorized(&user(vec![])));
    }

    #[test]
    fn test_resolve_access_variants() {
        assert!(matches!(resolve_access(None), Access::Unauthenticated));

        let admin = Session::new(
            "token".to_string(),
            Utc::now() + Duration::hours(1),
            user(vec![GuildMembership {
                guild_id: INSTITUTE_GUILD_ID,
                is_administrator: true,
            }]),
        );
        assert!(matches!(resolve_access(Some(&admin)), Access::Admin(_)));

        let member = Session::new(
            "token".to_string(),
            Utc::now() + Duration::hours(1),
            user(vec![]),
        );
        assert!(matches!(resolve_access(Some(&member)), Access::Denied(_)));
    }
}
