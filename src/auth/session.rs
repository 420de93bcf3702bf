//! In-process session store.
//!
//! Sessions are keyed by an opaque uuid carried in an HttpOnly cookie. The
//! store also tracks pending OAuth logins so the callback can tie the `state`
//! parameter back to the browser that started the flow.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::AuthenticatedUser;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "modboard_session";

/// How long an issued OAuth `state` stays valid. Logins abandoned at the
/// Discord consent screen get dropped after this, so the pending map cannot
/// grow without bound.
const LOGIN_STATE_TTL_SECS: i64 = 600;

/// One logged-in visitor. Holds the OAuth access token (for revocation on
/// logout) and the profile fetched at login.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AuthenticatedUser,
}

impl Session {
    pub fn new(
        access_token: String,
        expires_at: DateTime<Utc>,
        user: AuthenticatedUser,
    ) -> Self {
        Self {
            access_token,
            expires_at,
            user,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// A login flow that has been started but not yet completed by the callback.
#[derive(Debug, Clone)]
struct PendingLogin {
    redirect_target: String,
    created_at: DateTime<Utc>,
}

impl PendingLogin {
    fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= chrono::Duration::seconds(LOGIN_STATE_TTL_SECS)
    }
}

/// Session and pending-login storage. Locks are held only across map
/// operations, never across an await point. Both maps are swept on the write
/// paths, so abandoned logins and expired sessions do not accumulate.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    pending_logins: RwLock<HashMap<String, PendingLogin>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pending login and return the OAuth `state` token for it.
    pub fn begin_login(&self, redirect_target: &str) -> String {
        let now = Utc::now();
        let state = Uuid::new_v4().to_string();
        let mut pending = self
            .pending_logins
            .write()
            .expect("pending login lock poisoned");
        pending.retain(|_, login| !login.is_stale(now));
        pending.insert(
            state.clone(),
            PendingLogin {
                redirect_target: redirect_target.to_string(),
                created_at: now,
            },
        );
        state
    }

    /// Consume a pending login, returning its redirect target. A state that
    /// was never issued, already consumed, or older than the login TTL
    /// returns `None`.
    pub fn take_login(&self, state: &str) -> Option<String> {
        let now = Utc::now();
        let mut pending = self
            .pending_logins
            .write()
            .expect("pending login lock poisoned");
        pending.retain(|_, login| !login.is_stale(now));
        pending.remove(state).map(|login| login.redirect_target)
    }

    /// Store a session and return its new id. Sessions that have expired
    /// since they were last touched are dropped on the same pass.
    pub fn insert(&self, session: Session) -> String {
        let id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        sessions.retain(|_, s| !s.is_expired());
        sessions.insert(id.clone(), session);
        id
    }

    /// Look up a session by id. Expired sessions are purged and read as
    /// absent, so an expired token behaves exactly like being logged out.
    pub fn get(&self, id: &str) -> Option<Session> {
        let expired = {
            let sessions = self.sessions.read().expect("session lock poisoned");
            match sessions.get(id) {
                None => return None,
                Some(session) if session.is_expired() => true,
                Some(session) => return Some(session.clone()),
            }
        };

        if expired {
            self.sessions
                .write()
                .expect("session lock poisoned")
                .remove(id);
        }
        None
    }

    /// Remove a session, returning it so the caller can revoke its token.
    pub fn remove(&self, id: &str) -> Option<Session> {
        self.sessions
            .write()
            .expect("session lock poisoned")
            .remove(id)
    }
}
