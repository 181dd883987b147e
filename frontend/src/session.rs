//! Session state.
//!
//! The session is the only process-wide mutable state: written at login,
//! cleared at logout, read everywhere through an injected context instead of
//! ambient storage lookups. It survives reloads through a single JSON
//! document in LocalStorage (explicit serialize/restore boundary).

use biblioteca_shared::Role;
use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::api::{LibraryApi, backend_url};

const SESSION_KEY: &str = "biblioteca_session";

/// Everything the backend handed us at login.
///
/// The token is opaque; the role is only trusted for UI branching, the
/// backend re-validates every privileged request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

/// Drops sessions that violate the token invariant (absent or non-empty).
fn sanitize(session: Option<Session>) -> Option<Session> {
    session.filter(|s| !s.token.is_empty())
}

/// Session context shared through Leptos `Context`.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<Option<Session>>,
    pub set_state: WriteSignal<Option<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(None);
        Self { state, set_state }
    }

    /// Current session, untracked. Guard evaluation and request dispatch read
    /// the session at a point in time; they do not re-run on session change.
    pub fn session(&self) -> Option<Session> {
        self.state.get_untracked()
    }

    pub fn token(&self) -> Option<String> {
        self.session().map(|s| s.token)
    }

    /// API client carrying the current bearer token (if any).
    pub fn api(&self) -> LibraryApi {
        LibraryApi::new(backend_url(), self.token())
    }

    /// In-memory transition, shared by login and logout. Pure with respect
    /// to the browser: the storage write lives in [`persist`] / [`clear`].
    pub fn apply(&self, session: Option<Session>) {
        self.set_state.set(sanitize(session));
    }

    /// Reactive display name for headers.
    pub fn display_name(&self) -> Signal<String> {
        let state = self.state;
        Signal::derive(move || {
            state
                .get()
                .map(|s| s.display_name)
                .unwrap_or_default()
        })
    }

    pub fn is_admin(&self) -> bool {
        self.session().map(|s| s.role.is_admin()).unwrap_or(false)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches the session context from Context.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// Restores a persisted session at process start.
pub fn restore(ctx: &SessionContext) {
    let stored: Option<Session> = LocalStorage::get(SESSION_KEY).ok();
    ctx.apply(stored);
}

/// Persists the session handed back by a successful login, overwriting any
/// prior one.
pub fn persist(ctx: &SessionContext, session: Session) {
    if LocalStorage::set(SESSION_KEY, &session).is_err() {
        // Storage full or unavailable: the in-memory session still works for
        // this page lifetime, it just will not survive a reload.
        web_sys::console::warn_1(&"[Session] Failed to persist session".into());
    }
    ctx.apply(Some(session));
}

/// Clears all session fields. Idempotent.
pub fn clear(ctx: &SessionContext) {
    LocalStorage::delete(SESSION_KEY);
    ctx.apply(None);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Session {
        Session {
            token: "tok-123".into(),
            display_name: "María Pérez".into(),
            email: "maria@example.com".into(),
            role: Role::Administrator,
        }
    }

    #[test]
    fn session_persists_all_four_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["token"], "tok-123");
        assert_eq!(json["displayName"], "María Pérez");
        assert_eq!(json["email"], "maria@example.com");
        assert_eq!(json["role"], "administrador");
    }

    #[test]
    fn restore_round_trips_the_stored_document() {
        let json = serde_json::to_string(&sample()).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, sample());
    }

    #[test]
    fn sanitize_rejects_empty_tokens() {
        let mut s = sample();
        s.token.clear();
        assert_eq!(sanitize(Some(s)), None);
        assert_eq!(sanitize(None), None);
        assert!(sanitize(Some(sample())).is_some());
    }

    #[test]
    fn clearing_empties_every_field_and_is_idempotent() {
        let owner = Owner::new();
        owner.set();

        let ctx = SessionContext::new();
        ctx.apply(Some(sample()));
        assert_eq!(ctx.token().as_deref(), Some("tok-123"));
        assert!(ctx.is_admin());

        // Logout: the whole document goes, not just the token.
        ctx.apply(None);
        assert_eq!(ctx.token(), None);
        assert_eq!(ctx.session(), None);
        assert!(!ctx.is_admin());

        ctx.apply(None);
        assert_eq!(ctx.token(), None);
    }

    #[test]
    fn applying_an_empty_token_session_leaves_the_store_unauthenticated() {
        let owner = Owner::new();
        owner.set();

        let ctx = SessionContext::new();
        let mut s = sample();
        s.token.clear();
        ctx.apply(Some(s));
        assert_eq!(ctx.token(), None);
        assert_eq!(ctx.session(), None);
    }
}
